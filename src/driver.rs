//! Frame driver
//!
//! Owns the clock, the character controller and the gamepad source, and runs
//! one frame in a fixed order:
//!
//! ```text
//! drain notifications ──► clock.tick(now) ──► controller.update() ──► target.update(dt)
//! ```
//!
//! Drawing happens after [`FrameDriver::frame`] returns. Notifications that
//! arrive while a frame runs are picked up by the next one.

use tracing::debug;

use crate::clock::FrameClock;
use crate::controller::{CharacterController, ControllerSettings};
use crate::input::{GamepadSource, KeyNotification, Modifiers};
use crate::sprite::Movable;

pub struct FrameDriver<S: GamepadSource> {
    clock: FrameClock,
    controller: CharacterController,
    gamepads: S,
    frames: u64,
}

impl<S: GamepadSource> FrameDriver<S> {
    pub fn new(settings: ControllerSettings, gamepads: S) -> Self {
        debug!("Creating frame driver with settings: {:?}", settings);
        Self {
            clock: FrameClock::new(),
            controller: CharacterController::new(settings),
            gamepads,
            frames: 0,
        }
    }

    /// Runs one frame against `target` and returns its delta in seconds.
    pub fn frame<M: Movable + ?Sized>(&mut self, now_ms: f64, target: &mut M) -> f32 {
        for notification in self.gamepads.poll_notifications() {
            self.controller.gamepad_mut().notify(notification);
        }

        let delta_seconds = self.clock.tick(now_ms);
        self.controller.update(&self.gamepads, target);
        target.update(delta_seconds);

        self.frames += 1;
        delta_seconds
    }

    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) {
        self.controller.keyboard_mut().on_key_down(key, modifiers);
    }

    pub fn key_up(&mut self, key: &str) {
        self.controller.keyboard_mut().on_key_up(key);
    }

    pub fn notify_key(&mut self, notification: KeyNotification) {
        self.controller.keyboard_mut().notify(notification);
    }

    pub fn release_keys(&mut self) {
        self.controller.keyboard_mut().release_all();
    }

    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn gamepads_mut(&mut self) -> &mut S {
        &mut self.gamepads
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
