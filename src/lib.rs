//! Real-time input and movement core for a 2D game.
//!
//! Each frame the [`driver::FrameDriver`] ticks a [`clock::FrameClock`], lets
//! the [`controller::CharacterController`] fuse keyboard and gamepad state
//! into a movement vector, and integrates that vector on a
//! [`sprite::Movable`]. Rendering and platform event wiring stay outside the
//! core; [`app`] and [`headless`] are the two drivers shipped with the crate.

pub mod app;
pub mod clock;
pub mod config;
pub mod controller;
pub mod driver;
pub mod headless;
pub mod input;
pub mod math;
pub mod sprite;

pub use clock::FrameClock;
pub use config::{Config, ConfigError};
pub use controller::{CharacterController, ControllerSettings, MergePolicy};
pub use driver::FrameDriver;
pub use math::Vector2;
pub use sprite::{BoxSprite, Drawable, Movable, Sprite};
