//! Headless frame loop for machines without a display.
//!
//! Frames are paced by a tokio interval and stamped with monotonic time since
//! the loop started. No keyboard is available, so the controller always runs
//! with [`MergePolicy::ActiveKeyboard`]; under [`MergePolicy::Literal`] the idle
//! keyboard would pin both axes to zero. The loop stops when its cancellation
//! token fires.

use tokio::time::{interval, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::app::player_from;
use crate::config::Config;
use crate::controller::MergePolicy;
use crate::driver::FrameDriver;
use crate::input::{GamepadButton, GamepadSource};
use crate::math::Vector2;
use crate::sprite::Movable;

/// Outcome of a headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessReport {
    pub frames: u64,
    pub final_position: Vector2,
}

pub async fn run<S: GamepadSource>(
    config: &Config,
    gamepads: S,
    token: CancellationToken,
) -> HeadlessReport {
    let frame_interval = Duration::from_millis(config.display.frame_interval_ms);
    info!("Starting headless loop with {:?} frames", frame_interval);

    let mut settings = config.controller;
    if settings.merge_policy != MergePolicy::ActiveKeyboard {
        info!(
            "No keyboard in headless mode, using {:?} instead of {:?}",
            MergePolicy::ActiveKeyboard,
            settings.merge_policy
        );
        settings.merge_policy = MergePolicy::ActiveKeyboard;
    }

    let mut driver = FrameDriver::new(settings, gamepads);
    let mut player = player_from(&config.sprite);
    let mut last_position = player.sprite().position;

    let mut ticker = interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let started = Instant::now();

    loop {
        tokio::select! {
            biased;

            _ = token.cancelled() => {
                debug!("Headless loop cancelled");
                break;
            }
            _ = ticker.tick() => {
                let now_ms = started.elapsed().as_secs_f64() * 1000.0;
                driver.frame(now_ms, &mut player);

                let position = player.sprite().position;
                if position != last_position {
                    debug!("Player at ({:.1}, {:.1})", position.x, position.y);
                    last_position = position;
                }

                if driver
                    .controller()
                    .gamepad()
                    .button_pressed(GamepadButton::A, false)
                {
                    info!("A pressed at ({:.1}, {:.1})", position.x, position.y);
                }
            }
        }
    }

    info!("Headless loop stopped after {} frames", driver.frames());
    HeadlessReport {
        frames: driver.frames(),
        final_position: last_position,
    }
}
