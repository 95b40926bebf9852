//! Gamepad polling with press-edge detection.
//!
//! The reader follows a small state machine:
//!
//! ```text
//! Disconnected ──connect(i)──► Connected(i) / turbo ──disconnect(i)──► Disconnected
//! ```
//!
//! While connected, [`GamepadReader::update`] is called once per frame. It
//! shifts the current button set into the previous one and resamples the
//! tracked pad from a [`GamepadSource`], which is what makes rising-edge
//! queries possible.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Canonical button names in platform index order.
///
/// The order is fixed; index `i` of a snapshot's button list is the button
/// named `BUTTON_NAMES[i]`.
pub const BUTTON_NAMES: [&str; 18] = [
    "A", "B", "X", "Y", "LB", "RB", "LT", "RT", "Share", "Option", "LS", "RS", "Up", "Down",
    "Left", "Right", "Power", "Touchpad",
];

/// Axis slots of a standard snapshot.
pub const AXIS_LEFT_X: usize = 0;
pub const AXIS_LEFT_Y: usize = 1;
pub const AXIS_RIGHT_X: usize = 2;
pub const AXIS_RIGHT_Y: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    LB,
    RB,
    LT,
    RT,
    Share,
    Options,
    LS,
    RS,
    Up,
    Down,
    Left,
    Right,
    Power,
    Touchpad,
    /// A pressed index past the known table.
    Unknown(usize),
}

const KNOWN_BUTTONS: [GamepadButton; 18] = [
    GamepadButton::A,
    GamepadButton::B,
    GamepadButton::X,
    GamepadButton::Y,
    GamepadButton::LB,
    GamepadButton::RB,
    GamepadButton::LT,
    GamepadButton::RT,
    GamepadButton::Share,
    GamepadButton::Options,
    GamepadButton::LS,
    GamepadButton::RS,
    GamepadButton::Up,
    GamepadButton::Down,
    GamepadButton::Left,
    GamepadButton::Right,
    GamepadButton::Power,
    GamepadButton::Touchpad,
];

impl GamepadButton {
    pub fn from_index(index: usize) -> Self {
        KNOWN_BUTTONS
            .get(index)
            .copied()
            .unwrap_or(GamepadButton::Unknown(index))
    }

    /// Slot of this button in [`BUTTON_NAMES`].
    pub fn index(&self) -> usize {
        match self {
            GamepadButton::A => 0,
            GamepadButton::B => 1,
            GamepadButton::X => 2,
            GamepadButton::Y => 3,
            GamepadButton::LB => 4,
            GamepadButton::RB => 5,
            GamepadButton::LT => 6,
            GamepadButton::RT => 7,
            GamepadButton::Share => 8,
            GamepadButton::Options => 9,
            GamepadButton::LS => 10,
            GamepadButton::RS => 11,
            GamepadButton::Up => 12,
            GamepadButton::Down => 13,
            GamepadButton::Left => 14,
            GamepadButton::Right => 15,
            GamepadButton::Power => 16,
            GamepadButton::Touchpad => 17,
            GamepadButton::Unknown(index) => *index,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GamepadButton::Unknown(_) => "Unknown",
            known => BUTTON_NAMES[known.index()],
        }
    }
}

impl fmt::Display for GamepadButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamepadButton::Unknown(index) => write!(f, "Unknown({})", index),
            known => f.write_str(known.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown gamepad button name: {0}")]
pub struct ParseButtonError(String);

impl FromStr for GamepadButton {
    type Err = ParseButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BUTTON_NAMES
            .iter()
            .position(|name| *name == s)
            .map(GamepadButton::from_index)
            .ok_or_else(|| ParseButtonError(s.to_owned()))
    }
}

/// State of one pad at the moment it was sampled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GamepadSnapshot {
    /// Pressed flag per button index.
    pub buttons: Vec<bool>,
    /// Raw axis values in -1.0..=1.0, y axes pointing down.
    pub axes: Vec<f32>,
}

/// Connection change forwarded from the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamepadNotification {
    Connected { index: usize },
    Disconnected { index: usize },
}

/// A platform that can report gamepad connections and sample pad state.
pub trait GamepadSource {
    /// Connection changes observed since the previous call, oldest first.
    fn poll_notifications(&mut self) -> Vec<GamepadNotification>;

    /// Current state of the pad at `index`, or `None` if the platform no
    /// longer knows it.
    fn snapshot(&self, index: usize) -> Option<GamepadSnapshot>;
}

impl<S: GamepadSource + ?Sized> GamepadSource for Box<S> {
    fn poll_notifications(&mut self) -> Vec<GamepadNotification> {
        (**self).poll_notifications()
    }

    fn snapshot(&self, index: usize) -> Option<GamepadSnapshot> {
        (**self).snapshot(index)
    }
}

/// Truncates an axis reading to two decimals.
fn truncate_axis(value: f32) -> f32 {
    if value.is_finite() {
        (value * 100.0).trunc() / 100.0
    } else {
        0.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct GamepadReader {
    connected_index: Option<usize>,
    previous_buttons: HashSet<GamepadButton>,
    current_buttons: HashSet<GamepadButton>,
    axes: Vec<f32>,
}

impl GamepadReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, notification: GamepadNotification) {
        match notification {
            GamepadNotification::Connected { index } => self.on_connected(index),
            GamepadNotification::Disconnected { index } => self.on_disconnected(index),
        }
    }

    /// Starts tracking the pad at `index`. The latest connected pad wins.
    pub fn on_connected(&mut self, index: usize) {
        match self.connected_index {
            Some(previous) if previous != index => {
                info!("Gamepad {} connected, switching from gamepad {}", index, previous)
            }
            Some(_) => debug!("Gamepad {} reported connected again", index),
            None => info!("Gamepad {} connected", index),
        }
        self.connected_index = Some(index);
        self.clear_state();
    }

    /// Stops tracking the pad at `index`. Untracked indices are ignored.
    pub fn on_disconnected(&mut self, index: usize) {
        match self.connected_index {
            Some(tracked) if tracked == index => {
                info!("Gamepad {} disconnected", index);
                self.connected_index = None;
                self.clear_state();
            }
            Some(tracked) => debug!(
                "Ignoring disconnect of gamepad {}, tracking gamepad {}",
                index, tracked
            ),
            None => debug!("Ignoring disconnect of gamepad {}, none tracked", index),
        }
    }

    fn clear_state(&mut self) {
        self.previous_buttons.clear();
        self.current_buttons.clear();
        self.axes.clear();
    }

    /// Samples the tracked pad for this frame.
    pub fn update<S: GamepadSource + ?Sized>(&mut self, source: &S) {
        let Some(index) = self.connected_index else {
            self.clear_state();
            return;
        };

        self.previous_buttons = std::mem::take(&mut self.current_buttons);
        self.axes.clear();

        let Some(snapshot) = source.snapshot(index) else {
            debug!("No snapshot for gamepad {}, treating as idle", index);
            return;
        };

        self.current_buttons.extend(
            snapshot
                .buttons
                .iter()
                .enumerate()
                .filter(|(_, pressed)| **pressed)
                .map(|(i, _)| GamepadButton::from_index(i)),
        );
        self.axes
            .extend(snapshot.axes.iter().copied().map(truncate_axis));

        for button in self.current_buttons.difference(&self.previous_buttons) {
            debug!("Gamepad {} button pressed: {}", index, button);
        }
    }

    /// Whether `button` is down this frame.
    ///
    /// With `hold == false` only the frame on which the button went down
    /// reports true; with `hold == true` every frame it stays down does.
    pub fn button_pressed(&self, button: GamepadButton, hold: bool) -> bool {
        self.current_buttons.contains(&button)
            && (hold || !self.previous_buttons.contains(&button))
    }

    pub fn pressed_buttons(&self) -> impl Iterator<Item = &GamepadButton> {
        self.current_buttons.iter()
    }

    pub fn axes(&self) -> &[f32] {
        &self.axes
    }

    /// Axis value for this frame, 0.0 when the pad reports no such axis.
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    pub fn connected_index(&self) -> Option<usize> {
        self.connected_index
    }

    /// "Turbo": a pad is connected and polled.
    pub fn is_turbo(&self) -> bool {
        self.connected_index.is_some()
    }
}
