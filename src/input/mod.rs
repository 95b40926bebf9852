//! Input readers for keyboard and gamepad
//!
//! ```text
//! Platform ──notifications──► KeyboardReader / GamepadReader ──► CharacterController
//!          ──snapshots──────► GamepadReader (once per frame)
//! ```
//!
//! Readers never bind to a platform themselves. Key events and gamepad
//! connection changes arrive as notifications; gamepad state is pulled from a
//! [`GamepadSource`] during the frame.

pub mod gamepad;
pub mod gilrs_source;
pub mod keyboard;
pub mod virtual_source;

pub use gamepad::{
    GamepadButton, GamepadNotification, GamepadReader, GamepadSnapshot, GamepadSource,
    BUTTON_NAMES,
};
pub use gilrs_source::{BackendError, GilrsGamepads};
pub use keyboard::{KeyNotification, KeyboardReader, Modifiers};
pub use virtual_source::VirtualGamepads;
