use glam::Vec2;
use piano_tiles_core::{InputEvent, Key, MouseButton, SurfacePoint};
use piano_tiles_rendering_macroquad::{gather_frame_input_from_observations, InputObservations};

fn replay(frames: &[InputObservations]) -> Vec<Vec<InputEvent>> {
    frames
        .iter()
        .map(|observations| gather_frame_input_from_observations(*observations).events)
        .collect()
}

#[test]
fn menu_then_play_sequence_is_deterministic() {
    let frames = [
        InputObservations {
            up: true,
            ..InputObservations::default()
        },
        InputObservations::default(),
        InputObservations {
            left_click: true,
            cursor: Vec2::new(270.0, 480.0),
            ..InputObservations::default()
        },
        InputObservations {
            right_click: true,
            middle_click: true,
            cursor: Vec2::new(10.0, 20.0),
            ..InputObservations::default()
        },
    ];

    let first_run = replay(&frames);
    let second_run = replay(&frames);

    assert_eq!(first_run, second_run);
    assert_eq!(
        first_run,
        vec![
            vec![InputEvent::KeyDown { key: Key::TilesUp }],
            Vec::new(),
            vec![InputEvent::MouseDown {
                button: MouseButton::Left,
                position: SurfacePoint::new(270.0, 480.0),
            }],
            vec![
                InputEvent::MouseDown {
                    button: MouseButton::Right,
                    position: SurfacePoint::new(10.0, 20.0),
                },
                InputEvent::MouseDown {
                    button: MouseButton::Middle,
                    position: SurfacePoint::new(10.0, 20.0),
                },
            ],
        ]
    );
}

#[test]
fn cursor_movement_alone_produces_no_events() {
    let input = gather_frame_input_from_observations(InputObservations {
        cursor: Vec2::new(5.0, 6.0),
        ..InputObservations::default()
    });

    assert!(input.events.is_empty());
}
