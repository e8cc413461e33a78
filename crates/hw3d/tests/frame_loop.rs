use hw3d::config::Config;
use hw3d::control::Control;
use hw3d::input::InputEvent;
use hw3d::input::MouseButton;
use hw3d::keys;
use hw3d::platform::HeadlessPlatform;
use hw3d::platform::Platform;
use hw3d::scene::Draw;
use hw3d::scene::SceneKind;

fn config(scene: SceneKind) -> Config {
    Config {
        scene,
        box_count: 12,
        seed: 42,
        ..Config::default()
    }
}

fn key(code: u8, pressed: bool) -> InputEvent {
    InputEvent::Key { code, pressed }
}

#[test]
fn max_frames_stops_the_loop() {
    let config = Config {
        max_frames: Some(5),
        ..config(SceneKind::Clear)
    };
    let platform = HeadlessPlatform::new(config.client_size());
    let mut control = Control::new(platform, &config);
    control.run().unwrap();

    assert_eq!(control.frame_count(), 5);
    assert_eq!(control.platform().presented(), 5);
    assert_eq!(control.platform().frames().len(), 5);
}

#[test]
fn escape_quits_after_finishing_the_frame() {
    let config = config(SceneKind::Clear);
    let platform = HeadlessPlatform::new(config.client_size())
        .with_script([vec![], vec![], vec![key(keys::ESCAPE, true)]]);
    let mut control = Control::new(platform, &config);
    control.run().unwrap();

    assert_eq!(control.frame_count(), 3);
    assert!(!control.platform().is_running());
}

#[test]
fn space_shows_one_message_box_per_press() {
    let config = Config {
        max_frames: Some(4),
        ..config(SceneKind::Clear)
    };
    let platform = HeadlessPlatform::new(config.client_size()).with_script([
        vec![key(keys::SPACE, true)],
        // auto-repeat while held
        vec![key(keys::SPACE, true)],
        vec![key(keys::SPACE, false)],
        vec![key(keys::SPACE, true)],
    ]);
    let mut control = Control::new(platform, &config);
    control.run().unwrap();

    let messages = control.platform().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[0],
        ("Space Pressed".to_string(), "Something happened!".to_string())
    );
}

#[test]
fn focus_loss_releases_held_input() {
    let config = config(SceneKind::Clear);
    let platform = HeadlessPlatform::new(config.client_size()).with_script([
        vec![
            key(b'W', true),
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            },
        ],
        vec![InputEvent::FocusLost],
    ]);
    let mut control = Control::new(platform, &config);

    assert!(control.run_frame().unwrap());
    assert!(control.platform().input().key_check(b'W'));
    assert!(control.run_frame().unwrap());
    assert!(!control.platform().input().any_held());
}

#[test]
fn boxes_scene_draws_every_box_each_frame() {
    let config = Config {
        max_frames: Some(3),
        ..config(SceneKind::Boxes)
    };
    let platform = HeadlessPlatform::new(config.client_size());
    let mut control = Control::new(platform, &config);
    control.run().unwrap();

    let frames = control.platform().frames();
    assert_eq!(frames.len(), 3);
    for frame in frames {
        assert_eq!(frame.draws.len(), 12);
        assert!(frame.draws.iter().all(|d| matches!(d, Draw::Box { .. })));
    }
    assert_ne!(frames[0].draws, frames[1].draws, "boxes should move");
}

#[test]
fn same_seed_gives_same_frames() {
    let run = || {
        let config = Config {
            max_frames: Some(2),
            ..config(SceneKind::Boxes)
        };
        let mut control = Control::new(HeadlessPlatform::new(config.client_size()), &config);
        control.run().unwrap();
        control.into_platform().frames().to_vec()
    };
    assert_eq!(run(), run());
}

#[test]
fn cube_scene_tracks_the_mouse() {
    let config = config(SceneKind::Cube);
    let (width, height) = config.client_size();
    let platform = HeadlessPlatform::new(config.client_size()).with_script([
        vec![InputEvent::MouseMove { x: 0, y: 0 }],
        vec![InputEvent::MouseMove {
            x: width as i32 - 1,
            y: height as i32 / 2,
        }],
    ]);
    let mut control = Control::new(platform, &config);
    control.run_frame().unwrap();
    control.run_frame().unwrap();

    let frames = control.platform().frames();
    let follower_x = |frame: &hw3d::scene::Frame| match &frame.draws[1] {
        Draw::Cube { transform } => transform.project_point3(bevy_math::Vec3::ZERO).x,
        other => panic!("unexpected draw {other:?}"),
    };
    assert!(follower_x(&frames[0]) < 0.0);
    assert!(follower_x(&frames[1]) > 0.0);
}

#[test]
fn triangle_scene_renders_one_triangle() {
    let config = Config {
        max_frames: Some(1),
        ..config(SceneKind::Triangle)
    };
    let mut control = Control::new(HeadlessPlatform::new(config.client_size()), &config);
    control.run().unwrap();

    assert_eq!(control.scene().kind(), SceneKind::Triangle);
    let frame = &control.platform().frames()[0];
    assert_eq!(frame.clear_color, [0.0, 0.2, 0.4, 1.0]);
    assert!(matches!(frame.draws.as_slice(), [Draw::Triangle { .. }]));
}

#[test]
fn headless_run_uses_a_default_frame_limit() {
    let config = Config {
        headless: true,
        ..config(SceneKind::Clear)
    };
    assert_eq!(config.max_frames, None);

    let mut control = hw3d::headless_control(&config);
    control.run().unwrap();
    assert_eq!(control.frame_count(), hw3d::DEFAULT_HEADLESS_FRAMES);
    assert_eq!(control.platform().presented(), hw3d::DEFAULT_HEADLESS_FRAMES);
    assert!(control.platform().frames().is_empty());

    hw3d::run_headless(&config).unwrap();
}

#[test]
fn explicit_frame_limit_overrides_the_headless_default() {
    let config = Config {
        headless: true,
        max_frames: Some(7),
        ..config(SceneKind::Clear)
    };
    let mut control = hw3d::headless_control(&config);
    control.run().unwrap();
    assert_eq!(control.platform().presented(), 7);
}
