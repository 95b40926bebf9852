//! Movable and drawable entities.
//!
//! Movement and drawing are separate capabilities. Anything that owns a
//! [`Sprite`] gets frame integration through [`Movable::update`]; anything that
//! can paint itself implements [`Drawable`]. [`BoxSprite`] composes both.

use egui::{Color32, Painter, Pos2, Rect};
use tracing::debug;

use crate::math::Vector2;

/// Position, size and pending movement of an on-screen entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    pub position: Vector2,
    /// Velocity for the current frame in units per second. Written by a
    /// controller, consumed and cleared by [`Sprite::integrate`].
    pub movement: Vector2,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(position: Vector2, width: f32, height: f32) -> Self {
        Self {
            position,
            movement: Vector2::ZERO,
            width,
            height,
        }
    }

    /// Applies this frame's movement and clears it.
    ///
    /// A negative or non-finite delta moves nothing; the movement is cleared
    /// either way so it never carries into the next frame.
    pub fn integrate(&mut self, delta_seconds: f32) {
        if delta_seconds.is_finite() && delta_seconds > 0.0 && self.movement.is_finite() {
            self.position.add_scaled(self.movement, delta_seconds);
        } else if !self.movement.is_finite() {
            debug!("Dropping non-finite movement {:?}", self.movement);
        }
        self.movement.zero();
    }
}

/// An entity moved by frame integration.
pub trait Movable {
    fn sprite(&self) -> &Sprite;

    fn sprite_mut(&mut self) -> &mut Sprite;

    /// Replaces the movement for this frame.
    fn set_movement(&mut self, movement: Vector2) {
        self.sprite_mut().movement = movement;
    }

    /// Per-frame update. Implementors overriding this must still integrate.
    fn update(&mut self, delta_seconds: f32) {
        self.sprite_mut().integrate(delta_seconds);
    }
}

impl Movable for Sprite {
    fn sprite(&self) -> &Sprite {
        self
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        self
    }
}

/// An entity that paints itself relative to a surface origin.
pub trait Drawable {
    fn draw(&self, painter: &Painter, origin: Pos2);
}

/// Solid rectangle that switches to a highlight color on demand.
#[derive(Clone, Debug)]
pub struct BoxSprite {
    sprite: Sprite,
    pub color: Color32,
    pub highlight_color: Color32,
    pub highlighted: bool,
}

impl BoxSprite {
    pub fn new(size: f32, color: Color32, highlight_color: Color32) -> Self {
        Self {
            sprite: Sprite::new(Vector2::ZERO, size, size),
            color,
            highlight_color,
            highlighted: false,
        }
    }

    pub fn at(mut self, position: Vector2) -> Self {
        self.sprite.position = position;
        self
    }

    pub fn fill_color(&self) -> Color32 {
        if self.highlighted {
            self.highlight_color
        } else {
            self.color
        }
    }

    pub fn bounds(&self, origin: Pos2) -> Rect {
        let min = origin + egui::vec2(self.sprite.position.x, self.sprite.position.y);
        Rect::from_min_size(min, egui::vec2(self.sprite.width, self.sprite.height))
    }
}

impl Movable for BoxSprite {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl Drawable for BoxSprite {
    fn draw(&self, painter: &Painter, origin: Pos2) {
        painter.rect_filled(self.bounds(origin), 0.0, self.fill_color());
    }
}
