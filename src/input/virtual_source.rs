//! In-memory gamepads.
//!
//! Used by tests and by the binary when no platform backend is available.

use std::collections::BTreeMap;
use tracing::debug;

use super::gamepad::{GamepadNotification, GamepadSnapshot, GamepadSource, BUTTON_NAMES};

#[derive(Clone, Debug, Default)]
pub struct VirtualGamepads {
    pads: BTreeMap<usize, GamepadSnapshot>,
    pending: Vec<GamepadNotification>,
}

impl VirtualGamepads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugs in a pad with every button released and four centred axes.
    pub fn connect(&mut self, index: usize) {
        debug!("Virtual gamepad {} connected", index);
        self.pads.insert(
            index,
            GamepadSnapshot {
                buttons: vec![false; BUTTON_NAMES.len()],
                axes: vec![0.0; 4],
            },
        );
        self.pending.push(GamepadNotification::Connected { index });
    }

    pub fn disconnect(&mut self, index: usize) {
        debug!("Virtual gamepad {} disconnected", index);
        self.pads.remove(&index);
        self.pending.push(GamepadNotification::Disconnected { index });
    }

    /// Forgets the pad without announcing it, as happens when a pad vanishes
    /// between a platform's disconnect and its notification.
    pub fn drop_snapshot(&mut self, index: usize) {
        self.pads.remove(&index);
    }

    /// Sets a button by platform index, growing the button list if needed.
    pub fn set_button(&mut self, index: usize, button: usize, pressed: bool) {
        if let Some(pad) = self.pads.get_mut(&index) {
            if pad.buttons.len() <= button {
                pad.buttons.resize(button + 1, false);
            }
            pad.buttons[button] = pressed;
        }
    }

    pub fn set_axis(&mut self, index: usize, axis: usize, value: f32) {
        if let Some(pad) = self.pads.get_mut(&index) {
            if pad.axes.len() <= axis {
                pad.axes.resize(axis + 1, 0.0);
            }
            pad.axes[axis] = value;
        }
    }

    pub fn is_connected(&self, index: usize) -> bool {
        self.pads.contains_key(&index)
    }
}

impl GamepadSource for VirtualGamepads {
    fn poll_notifications(&mut self) -> Vec<GamepadNotification> {
        std::mem::take(&mut self.pending)
    }

    fn snapshot(&self, index: usize) -> Option<GamepadSnapshot> {
        self.pads.get(&index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_drain_in_order() {
        let mut pads = VirtualGamepads::new();
        pads.connect(0);
        pads.connect(1);
        pads.disconnect(0);
        assert_eq!(
            pads.poll_notifications(),
            vec![
                GamepadNotification::Connected { index: 0 },
                GamepadNotification::Connected { index: 1 },
                GamepadNotification::Disconnected { index: 0 },
            ]
        );
        assert!(pads.poll_notifications().is_empty());
        assert!(!pads.is_connected(0));
        assert!(pads.is_connected(1));
    }

    #[test]
    fn setters_ignore_unknown_pads() {
        let mut pads = VirtualGamepads::new();
        pads.set_button(5, 0, true);
        pads.set_axis(5, 0, 1.0);
        assert_eq!(pads.snapshot(5), None);
    }
}
