//! Windowed frame driver on eframe.
//!
//! Every egui frame forwards key events to the keyboard reader, runs one
//! [`FrameDriver`] frame against the player box, tints the box while gamepad
//! button A is held and paints it.

use egui::{Color32, Key};
use tracing::{debug, info};

use crate::config::{Config, SpriteConfig};
use crate::driver::FrameDriver;
use crate::input::{GamepadButton, GamepadSource, Modifiers};
use crate::sprite::{BoxSprite, Drawable};

const BACKGROUND: Color32 = Color32::WHITE;

/// Browser-style key identifier for an egui key.
pub fn key_identifier(key: Key) -> String {
    match key {
        Key::ArrowUp => "ArrowUp".to_string(),
        Key::ArrowDown => "ArrowDown".to_string(),
        Key::ArrowLeft => "ArrowLeft".to_string(),
        Key::ArrowRight => "ArrowRight".to_string(),
        other => {
            let name = other.name();
            if name.chars().count() == 1 {
                name.to_lowercase()
            } else {
                name.to_string()
            }
        }
    }
}

/// egui exposes Command on macOS only, so `meta` never sets elsewhere.
fn modifiers_of(modifiers: &egui::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        shift: modifiers.shift,
        meta: modifiers.mac_cmd,
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

pub fn player_from(config: &SpriteConfig) -> BoxSprite {
    BoxSprite::new(config.size, rgb(config.color), rgb(config.highlight_color)).at(config.start)
}

pub struct PadstepApp<S: GamepadSource> {
    driver: FrameDriver<S>,
    player: BoxSprite,
    focused: bool,
}

impl<S: GamepadSource> PadstepApp<S> {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &Config, gamepads: S) -> Self {
        info!("Creating window app");
        Self {
            driver: FrameDriver::new(config.controller, gamepads),
            player: player_from(&config.sprite),
            focused: true,
        }
    }

    fn forward_input(&mut self, ctx: &egui::Context) {
        let (events, focused) = ctx.input(|i| (i.events.clone(), i.focused));

        if self.focused && !focused {
            debug!("Window lost focus, releasing keys");
            self.driver.release_keys();
        }
        self.focused = focused;

        for event in events {
            if let egui::Event::Key {
                key,
                pressed,
                modifiers,
                ..
            } = event
            {
                let id = key_identifier(key);
                if pressed {
                    self.driver.key_down(&id, modifiers_of(&modifiers));
                } else {
                    self.driver.key_up(&id);
                }
            }
        }
    }
}

impl<S: GamepadSource> eframe::App for PadstepApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.forward_input(ctx);

        let now_ms = ctx.input(|i| i.time) * 1000.0;
        self.driver.frame(now_ms, &mut self.player);
        self.player.highlighted = self
            .driver
            .controller()
            .gamepad()
            .button_pressed(GamepadButton::A, true);

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(BACKGROUND))
            .show(ctx, |ui| {
                let origin = ui.max_rect().min;
                self.player.draw(ui.painter(), origin);
            });

        ctx.request_repaint();
    }
}
