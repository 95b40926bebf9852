use serde::{Deserialize, Serialize};

/// Two-dimensional point or velocity.
///
/// Used for sprite positions (screen units, y pointing down) and for movement
/// vectors (screen units per second).
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Reset both components to zero.
    pub fn zero(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// `self += other * scale`
    pub fn add_scaled(&mut self, other: Vector2, scale: f32) {
        self.x += other.x * scale;
        self.y += other.y * scale;
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
