//! Per-frame delta time.
//!
//! The clock is a plain value owned by whoever drives frames. Consumers never
//! read it directly; the driver passes the delta returned by [`FrameClock::tick`]
//! into every `update` call for that frame.

use tracing::debug;

/// Elapsed time between animation frames.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    delta_seconds: f32,
    last_timestamp_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock to `now_ms` and returns the new delta in seconds.
    ///
    /// The first tick, a timestamp earlier than the previous one and a
    /// non-finite timestamp all produce a delta of zero.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            debug!("Ignoring non-finite frame timestamp {}", now_ms);
            self.delta_seconds = 0.0;
            return 0.0;
        }

        self.delta_seconds = match self.last_timestamp_ms {
            Some(last) => {
                let delta = ((now_ms - last) / 1000.0) as f32;
                if delta.is_finite() && delta > 0.0 {
                    delta
                } else {
                    if delta < 0.0 {
                        debug!(
                            "Non-monotonic frame timestamp: {:.3}ms after {:.3}ms",
                            now_ms, last
                        );
                    }
                    0.0
                }
            }
            None => 0.0,
        };
        self.last_timestamp_ms = Some(now_ms);

        self.delta_seconds
    }

    /// Delta produced by the most recent tick.
    pub fn delta_seconds(&self) -> f32 {
        self.delta_seconds
    }

    pub fn last_timestamp_ms(&self) -> Option<f64> {
        self.last_timestamp_ms
    }
}
