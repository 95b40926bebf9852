//! Character controller: fuses gamepad and keyboard input into one movement
//! vector and writes it onto a [`Movable`].
//!
//! # Merge policy
//!
//! Each input source produces an optional value per axis. Sources are asked in
//! [`SOURCE_PRIORITY`] order and, per axis, the first source with a value wins.
//! The keyboard ranks above the gamepad.
//!
//! Under [`MergePolicy::Literal`] the keyboard always has a value (zero when no
//! direction key is held), so a held stick never shows through. Under
//! [`MergePolicy::ActiveKeyboard`] the keyboard only speaks for an axis while
//! one of that axis' keys is held.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConfigError;
use crate::input::gamepad::{AXIS_LEFT_X, AXIS_LEFT_Y};
use crate::input::{GamepadButton, GamepadReader, GamepadSource, KeyboardReader};
use crate::math::Vector2;
use crate::sprite::Movable;

const UP_KEYS: [&str; 2] = ["w", "ArrowUp"];
const LEFT_KEYS: [&str; 2] = ["a", "ArrowLeft"];
const DOWN_KEYS: [&str; 2] = ["s", "ArrowDown"];
const RIGHT_KEYS: [&str; 2] = ["d", "ArrowRight"];

/// Button that enables sprinting on the gamepad while held.
pub const SPRINT_BUTTON: GamepadButton = GamepadButton::LS;

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Keyboard overrides the gamepad on every frame.
    #[default]
    Literal,
    /// Keyboard overrides the gamepad only on axes with a held key.
    ActiveKeyboard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Gamepad,
}

/// Sources in descending priority.
pub const SOURCE_PRIORITY: [InputSource; 2] = [InputSource::Keyboard, InputSource::Gamepad];

/// Tuning for a [`CharacterController`].
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct ControllerSettings {
    /// Base speed in units per second.
    pub movement_speed: f32,

    /// Stick deflection (0.0-1.0) that must be exceeded before an axis counts.
    ///
    /// Keeps constant small stick drift from moving the character.
    pub joystick_threshold: f32,

    /// Speed multiplier while sprinting (shift or left stick click).
    pub sprint_modifier: f32,

    pub merge_policy: MergePolicy,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            movement_speed: 100.0,
            joystick_threshold: 0.25,
            sprint_modifier: 1.35,
            merge_policy: MergePolicy::Literal,
        }
    }
}

impl ControllerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.movement_speed.is_finite() || self.movement_speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "movement_speed must be a non-negative number, got {}",
                self.movement_speed
            )));
        }
        if !(0.0..=1.0).contains(&self.joystick_threshold) {
            return Err(ConfigError::Invalid(format!(
                "joystick_threshold must be within 0.0..=1.0, got {}",
                self.joystick_threshold
            )));
        }
        if !self.sprint_modifier.is_finite() || self.sprint_modifier <= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "sprint_modifier must be greater than 1.0, got {}",
                self.sprint_modifier
            )));
        }
        Ok(())
    }
}

/// Per-axis opinion of one input source.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct AxisIntent {
    x: Option<f32>,
    y: Option<f32>,
}

/// -1, 0 or +1; opposite directions cancel out.
fn axis_direction(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

#[derive(Clone, Debug, Default)]
pub struct CharacterController {
    pub settings: ControllerSettings,
    keyboard: KeyboardReader,
    gamepad: GamepadReader,
    last_movement: Vector2,
}

impl CharacterController {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn keyboard(&self) -> &KeyboardReader {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut KeyboardReader {
        &mut self.keyboard
    }

    pub fn gamepad(&self) -> &GamepadReader {
        &self.gamepad
    }

    pub fn gamepad_mut(&mut self) -> &mut GamepadReader {
        &mut self.gamepad
    }

    /// Samples the gamepad, resolves both sources and writes the movement
    /// for this frame onto `target`.
    pub fn update<S, M>(&mut self, gamepads: &S, target: &mut M)
    where
        S: GamepadSource + ?Sized,
        M: Movable + ?Sized,
    {
        self.gamepad.update(gamepads);

        let movement = self.resolve();
        if movement != self.last_movement {
            debug!(
                "Movement changed: ({:.1}, {:.1}) -> ({:.1}, {:.1})",
                self.last_movement.x, self.last_movement.y, movement.x, movement.y
            );
            self.last_movement = movement;
        }

        target.set_movement(movement);
    }

    /// Movement for the current reader state, without sampling the gamepad.
    pub fn resolve(&self) -> Vector2 {
        let mut x = None;
        let mut y = None;

        for source in SOURCE_PRIORITY {
            let intent = match source {
                InputSource::Keyboard => self.keyboard_intent(),
                InputSource::Gamepad => self.gamepad_intent(),
            };
            x = x.or(intent.x);
            y = y.or(intent.y);
        }

        Vector2::new(x.unwrap_or(0.0), y.unwrap_or(0.0))
    }

    /// What the gamepad alone asks for, `None` without a connected pad.
    pub fn gamepad_movement(&self) -> Option<Vector2> {
        let intent = self.gamepad_intent();
        Some(Vector2::new(intent.x?, intent.y?))
    }

    /// What the keyboard alone asks for.
    pub fn keyboard_movement(&self) -> Vector2 {
        let (x, y) = self.keyboard_axes();
        Vector2::new(x, y)
    }

    fn gamepad_intent(&self) -> AxisIntent {
        if !self.gamepad.is_turbo() {
            return AxisIntent::default();
        }

        let sprint = if self.gamepad.button_pressed(SPRINT_BUTTON, true) {
            self.settings.sprint_modifier
        } else {
            1.0
        };
        let threshold = self.settings.joystick_threshold;
        let speed = self.settings.movement_speed;
        let component = |raw: f32| {
            if raw.abs() > threshold {
                raw * 2.0 * speed * sprint
            } else {
                0.0
            }
        };

        AxisIntent {
            x: Some(component(self.gamepad.axis(AXIS_LEFT_X))),
            y: Some(component(self.gamepad.axis(AXIS_LEFT_Y))),
        }
    }

    fn keyboard_axes(&self) -> (f32, f32) {
        let keys = &self.keyboard;
        let sprint = if keys.is_shift_held() {
            self.settings.sprint_modifier
        } else {
            1.0
        };

        let x = axis_direction(keys.any_held(&LEFT_KEYS), keys.any_held(&RIGHT_KEYS));
        let y = axis_direction(keys.any_held(&UP_KEYS), keys.any_held(&DOWN_KEYS));

        let scale = sprint * self.settings.movement_speed;
        (x * scale, y * scale)
    }

    fn keyboard_intent(&self) -> AxisIntent {
        let (x, y) = self.keyboard_axes();

        match self.settings.merge_policy {
            MergePolicy::Literal => AxisIntent {
                x: Some(x),
                y: Some(y),
            },
            MergePolicy::ActiveKeyboard => {
                let keys = &self.keyboard;
                let x_active = keys.any_held(&LEFT_KEYS) || keys.any_held(&RIGHT_KEYS);
                let y_active = keys.any_held(&UP_KEYS) || keys.any_held(&DOWN_KEYS);
                AxisIntent {
                    x: x_active.then_some(x),
                    y: y_active.then_some(y),
                }
            }
        }
    }
}
