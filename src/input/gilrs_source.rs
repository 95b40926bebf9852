//! Native gamepad backend on top of gilrs.
//!
//! The backend is a two-state machine:
//!
//! ```text
//! Initializing ──initialize()──► Polling
//! ```
//!
//! `create` opens the gilrs context, `initialize` announces every pad that is
//! already plugged in. Only the `Polling` state acts as a [`GamepadSource`]:
//! each call to `poll_notifications` drains gilrs events (which also refreshes
//! gilrs' cached pad state), and `snapshot` reads that cached state in the
//! standard button and axis order.

use chrono::Local;
use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use statum::{machine, state};
use tracing::{error, info, warn};

use super::gamepad::{
    GamepadNotification, GamepadSnapshot, GamepadSource, AXIS_LEFT_X, AXIS_LEFT_Y, AXIS_RIGHT_X,
    AXIS_RIGHT_Y, BUTTON_NAMES,
};

/// gilrs buttons in standard index order. Slot 17 (touchpad) has no gilrs
/// counterpart and always reads released.
const STANDARD_BUTTONS: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to initialize gamepad backend: {0}")]
    Init(String),
}

#[state]
#[derive(Debug, Clone)]
pub enum BackendState {
    Initializing,
    Polling,
}

#[machine]
#[derive(Debug)]
pub struct GilrsGamepads<S: BackendState> {
    // Gilrs context
    gilrs: Gilrs,

    // Connection changes not yet handed to the reader
    pending: Vec<GamepadNotification>,
}

impl GilrsGamepads<Initializing> {
    pub fn create() -> Result<Self, BackendError> {
        info!("Initializing gilrs gamepad backend");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(BackendError::Init(e.to_string()));
            }
        };

        Ok(Self::new(gilrs, Vec::new()))
    }

    /// Announces pads that were plugged in before the backend started.
    pub fn initialize(mut self) -> GilrsGamepads<Polling> {
        let announced: Vec<GamepadNotification> = {
            let gamepads: Vec<(GamepadId, Gamepad<'_>)> = self.gilrs.gamepads().collect();

            if gamepads.is_empty() {
                warn!("No gamepad connected, waiting for one");
            } else {
                info!("Found {} gamepads:", gamepads.len());
                for (id, gamepad) in &gamepads {
                    info!(
                        "  ID: {}, Name: {}, UUID: {:?}",
                        id,
                        gamepad.name(),
                        gamepad.uuid()
                    );
                }
            }

            gamepads
                .iter()
                .map(|(id, _)| GamepadNotification::Connected {
                    index: usize::from(*id),
                })
                .collect()
        };
        self.pending.extend(announced);

        info!("Gamepad backend initialized, transitioning to Polling state");
        self.transition()
    }
}

impl GilrsGamepads<Polling> {
    fn handle_event(&mut self, id: GamepadId, event: EventType) {
        let index = usize::from(id);
        let now = Local::now();

        match event {
            EventType::Connected => {
                info!(
                    "Gamepad {} connected at {}",
                    index,
                    now.format("%H:%M:%S.%3f")
                );
                self.pending.push(GamepadNotification::Connected { index });
            }
            EventType::Disconnected => {
                warn!(
                    "Gamepad {} disconnected at {}",
                    index,
                    now.format("%H:%M:%S.%3f")
                );
                self.pending.push(GamepadNotification::Disconnected { index });
            }
            _ => {}
        }
    }
}

impl GamepadSource for GilrsGamepads<Polling> {
    fn poll_notifications(&mut self) -> Vec<GamepadNotification> {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            self.handle_event(id, event);
        }
        std::mem::take(&mut self.pending)
    }

    fn snapshot(&self, index: usize) -> Option<GamepadSnapshot> {
        let (_, gamepad) = self
            .gilrs
            .gamepads()
            .find(|(id, _)| usize::from(*id) == index)?;
        Some(snapshot_of(&gamepad))
    }
}

fn snapshot_of(gamepad: &Gamepad<'_>) -> GamepadSnapshot {
    let mut buttons: Vec<bool> = STANDARD_BUTTONS
        .iter()
        .map(|button| gamepad.is_pressed(*button))
        .collect();
    buttons.resize(BUTTON_NAMES.len(), false);

    let mut axes = vec![0.0; 4];
    axes[AXIS_LEFT_X] = gamepad.value(Axis::LeftStickX);
    axes[AXIS_LEFT_Y] = -gamepad.value(Axis::LeftStickY);
    axes[AXIS_RIGHT_X] = gamepad.value(Axis::RightStickX);
    axes[AXIS_RIGHT_Y] = -gamepad.value(Axis::RightStickY);

    GamepadSnapshot { buttons, axes }
}

/// Opens gilrs and returns a backend ready for polling.
pub fn open() -> Result<GilrsGamepads<Polling>, BackendError> {
    Ok(GilrsGamepads::<Initializing>::create()?.initialize())
}

/// Standard slot of a gilrs button, if it has one.
pub fn standard_index(button: Button) -> Option<usize> {
    STANDARD_BUTTONS.iter().position(|b| *b == button)
}
