use padstep::controller::{ControllerSettings, MergePolicy};
use padstep::input::gamepad::{AXIS_LEFT_X, AXIS_LEFT_Y};
use padstep::input::{GamepadButton, KeyNotification, Modifiers, VirtualGamepads};
use padstep::{FrameDriver, Movable, Sprite, Vector2};

const FRAME_MS: f64 = 250.0;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn driver(settings: ControllerSettings) -> FrameDriver<VirtualGamepads> {
    FrameDriver::new(settings, VirtualGamepads::new())
}

#[test]
fn held_key_moves_linearly_with_delta() {
    let mut driver = driver(ControllerSettings::default());
    let mut sprite = Sprite::new(Vector2::new(10.0, 10.0), 50.0, 50.0);
    driver.key_down("d", Modifiers::NONE);

    // First frame establishes the clock and does not move.
    driver.frame(0.0, &mut sprite);
    assert_eq!(sprite.position, Vector2::new(10.0, 10.0));

    for n in 1..=4 {
        let dt = driver.frame(FRAME_MS * n as f64, &mut sprite);
        assert_eq!(dt, 0.25);
    }
    // 100 units/s * 0.25s * 4 frames
    assert!(approx(sprite.position.x, 110.0));
    assert_eq!(sprite.position.y, 10.0);
    assert!(sprite.movement.is_zero());
}

#[test]
fn release_stops_movement_next_frame() {
    let mut driver = driver(ControllerSettings::default());
    let mut sprite = Sprite::default();
    driver.notify_key(KeyNotification::Down {
        key: "s".into(),
        modifiers: Modifiers::NONE,
    });
    driver.frame(0.0, &mut sprite);
    driver.frame(FRAME_MS, &mut sprite);
    assert!(approx(sprite.position.y, 25.0));

    driver.notify_key(KeyNotification::Up { key: "s".into() });
    driver.frame(FRAME_MS * 2.0, &mut sprite);
    assert!(approx(sprite.position.y, 25.0));
}

#[test]
fn keyboard_takes_precedence_over_stick() {
    let mut driver = driver(ControllerSettings::default());
    let mut sprite = Sprite::default();
    driver.gamepads_mut().connect(0);
    driver.gamepads_mut().set_axis(0, AXIS_LEFT_X, 1.0);
    driver.key_down("d", Modifiers::NONE);

    driver.frame(0.0, &mut sprite);
    driver.frame(1000.0, &mut sprite);

    let speed = driver.controller().settings.movement_speed;
    assert!(approx(sprite.position.x, speed));
    assert!(approx(
        driver.controller().gamepad_movement().unwrap().x,
        2.0 * speed
    ));
}

#[test]
fn active_keyboard_policy_lets_stick_through_when_idle() {
    let settings = ControllerSettings {
        merge_policy: MergePolicy::ActiveKeyboard,
        ..ControllerSettings::default()
    };
    let mut driver = driver(settings);
    let mut sprite = Sprite::default();
    driver.gamepads_mut().connect(3);
    driver.gamepads_mut().set_axis(3, AXIS_LEFT_Y, 0.5);

    driver.frame(0.0, &mut sprite);
    driver.frame(1000.0, &mut sprite);
    assert!(approx(sprite.position.y, 100.0));
    assert_eq!(sprite.position.x, 0.0);
}

#[test]
fn press_edge_versus_hold_across_frames() {
    let mut driver = driver(ControllerSettings::default());
    let mut sprite = Sprite::default();
    driver.gamepads_mut().connect(0);
    driver.gamepads_mut().set_button(0, GamepadButton::X.index(), true);

    let mut edges = 0;
    let mut holds = 0;
    for n in 0..5 {
        driver.frame(FRAME_MS * n as f64, &mut sprite);
        let pad = driver.controller().gamepad();
        if pad.button_pressed(GamepadButton::X, false) {
            edges += 1;
        }
        if pad.button_pressed(GamepadButton::X, true) {
            holds += 1;
        }
    }
    assert_eq!(edges, 1);
    assert_eq!(holds, 5);
}

#[test]
fn disconnect_mid_session_turns_turbo_off() {
    let settings = ControllerSettings {
        merge_policy: MergePolicy::ActiveKeyboard,
        ..ControllerSettings::default()
    };
    let mut driver = driver(settings);
    let mut sprite = Sprite::default();
    driver.gamepads_mut().connect(0);
    driver.gamepads_mut().set_axis(0, AXIS_LEFT_X, 1.0);
    driver.frame(0.0, &mut sprite);
    assert!(driver.controller().gamepad().is_turbo());

    driver.gamepads_mut().disconnect(0);
    driver.gamepads_mut().disconnect(0);
    driver.frame(FRAME_MS, &mut sprite);
    assert!(!driver.controller().gamepad().is_turbo());
    assert_eq!(driver.controller().gamepad().connected_index(), None);
    assert_eq!(sprite.position, Vector2::ZERO);
}

#[test]
fn vanished_pad_reads_idle_until_notified() {
    let settings = ControllerSettings {
        merge_policy: MergePolicy::ActiveKeyboard,
        ..ControllerSettings::default()
    };
    let mut driver = driver(settings);
    let mut sprite = Sprite::default();
    driver.gamepads_mut().connect(0);
    driver.gamepads_mut().set_axis(0, AXIS_LEFT_X, 1.0);
    driver.frame(0.0, &mut sprite);

    driver.gamepads_mut().drop_snapshot(0);
    driver.frame(FRAME_MS, &mut sprite);
    assert!(driver.controller().gamepad().is_turbo());
    assert_eq!(sprite.position, Vector2::ZERO);
}

#[test]
fn clock_going_backwards_does_not_move_backwards() {
    let mut driver = driver(ControllerSettings::default());
    let mut sprite = Sprite::default();
    driver.key_down("ArrowRight", Modifiers::NONE);

    driver.frame(1000.0, &mut sprite);
    driver.frame(500.0, &mut sprite);
    assert_eq!(driver.clock().delta_seconds(), 0.0);
    assert_eq!(sprite.position, Vector2::ZERO);

    driver.frame(750.0, &mut sprite);
    assert!(approx(sprite.position.x, 25.0));
}

#[test]
fn focus_loss_release_stops_movement() {
    let mut driver = driver(ControllerSettings::default());
    let mut sprite = Sprite::default();
    driver.key_down("a", Modifiers::SHIFT);
    driver.frame(0.0, &mut sprite);
    driver.frame(1000.0, &mut sprite);
    assert!(approx(sprite.sprite().position.x, -135.0));

    driver.release_keys();
    driver.frame(2000.0, &mut sprite);
    assert!(approx(sprite.sprite().position.x, -135.0));
}
