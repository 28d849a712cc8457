//! Translates game state into scenes for the rendering backend.

use glam::Vec2;
use piano_tiles_core::GAME_TITLE;
use piano_tiles_rendering::{
    Color, GridPresentation, Presentation, Scene, TextLabel, TilePresentation,
};
use piano_tiles_system_session::{Game, GameView, MenuSettings, Scoreboard};
use piano_tiles_system_spawning::LaneSource;
use piano_tiles_world::{query, World};

const MENU_BACKGROUND: Color = Color::BLACK;
const MENU_TEXT: Color = Color::WHITE;
const BOARD_BACKGROUND: Color = Color::WHITE;
const GRID_LINE: Color = Color::from_rgba_u8(50, 50, 50, 100);
const HUD_TEXT: Color = Color::from_rgb_u8(200, 30, 30);
const HUD_POSITION: Vec2 = Vec2::new(8.0, 8.0);
const HUD_SCALE: f32 = 0.4;

/// Presentation for a window showing `game` from its first frame.
pub(crate) fn presentation<L: LaneSource>(game: &Game<L>) -> Presentation {
    let config = game.config();
    let mut scene = Scene::new(MENU_BACKGROUND);
    populate_scene(game, &mut scene);
    Presentation::new(
        GAME_TITLE,
        config.surface_width,
        config.surface_height,
        config.frame_rate,
        scene,
    )
}

/// Rewrites `scene` to show the current state of `game`.
pub(crate) fn populate_scene<L: LaneSource>(game: &Game<L>, scene: &mut Scene) {
    match game.view() {
        GameView::Menu {
            settings,
            scoreboard,
        } => {
            scene.reset(MENU_BACKGROUND);
            push_menu_labels(scene, settings, scoreboard);
        }
        GameView::Play { world } => {
            scene.reset(BOARD_BACKGROUND);
            push_board(scene, world);
            scene.labels.push(
                TextLabel::new(game.window_title(), HUD_POSITION, HUD_TEXT).with_scale(HUD_SCALE),
            );
        }
        GameView::Exited => return,
    }
    scene.cursor_grab = game.cursor_grab();
}

fn push_menu_labels(scene: &mut Scene, settings: &MenuSettings, scoreboard: &Scoreboard) {
    let lock = if settings.lock_cursor() { "On" } else { "Off" };
    let lines = [
        (GAME_TITLE.to_owned(), Vec2::new(70.0, 50.0)),
        ("Click To Play :)".to_owned(), Vec2::new(80.0, 120.0)),
        (
            format!("Up/Down: Tiles: {}", settings.tile_rows()),
            Vec2::new(20.0, 400.0),
        ),
        (
            format!("Left/Right: Rows: {}", settings.lanes()),
            Vec2::new(20.0, 450.0),
        ),
        (format!("L: Lock Cursor: {lock}"), Vec2::new(20.0, 500.0)),
        (
            format!("Last Score: {}", scoreboard.last_score()),
            Vec2::new(10.0, 840.0),
        ),
        (
            format!("High Score: {}", scoreboard.high_score()),
            Vec2::new(10.0, 890.0),
        ),
    ];
    scene.labels.extend(
        lines
            .into_iter()
            .map(|(text, position)| TextLabel::new(text, position, MENU_TEXT)),
    );
}

fn push_board(scene: &mut Scene, world: &World) {
    scene.grid = Some(GridPresentation::new(query::geometry(world), GRID_LINE));
    scene.tiles.extend(query::tile_view(world).iter().map(|tile| {
        TilePresentation::new(
            Vec2::new(tile.x, tile.y),
            Vec2::new(tile.width, tile.height),
            Color::from(tile.color),
        )
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use piano_tiles_core::{InputEvent, Key, MouseButton, SurfacePoint};
    use piano_tiles_system_session::GameConfig;
    use piano_tiles_system_spawning::ScriptedLanes;

    fn game(config: GameConfig) -> Game<ScriptedLanes> {
        Game::new(config, ScriptedLanes::new(vec![0, 1, 2, 3])).expect("valid config")
    }

    fn start() -> InputEvent {
        InputEvent::MouseDown {
            button: MouseButton::Left,
            position: SurfacePoint::new(1.0, 1.0),
        }
    }

    fn label_texts(scene: &Scene) -> Vec<&str> {
        scene
            .labels
            .iter()
            .map(|label| label.text.as_str())
            .collect()
    }

    #[test]
    fn menu_lists_settings_and_scores() {
        let mut game = game(GameConfig::default());
        let dt = game.config().frame_interval();
        let _ = game.frame(
            &[
                InputEvent::KeyDown { key: Key::TilesUp },
                InputEvent::KeyDown {
                    key: Key::ToggleCursorLock,
                },
            ],
            dt,
        );

        let presentation = presentation(&game);
        let scene = &presentation.scene;

        assert_eq!(presentation.surface_width, 540);
        assert_eq!(presentation.surface_height, 960);
        assert_eq!(scene.clear_color, Color::BLACK);
        assert!(scene.grid.is_none());
        assert!(!scene.cursor_grab);
        assert_eq!(
            label_texts(scene),
            vec![
                "Piano Tiles!",
                "Click To Play :)",
                "Up/Down: Tiles: 5",
                "Left/Right: Rows: 4",
                "L: Lock Cursor: On",
                "Last Score: 0",
                "High Score: 0",
            ]
        );
        assert_eq!(scene.labels[6].position, Vec2::new(10.0, 890.0));
    }

    #[test]
    fn play_scene_draws_board_tiles_and_hud() {
        let mut game = game(GameConfig {
            lock_cursor: true,
            ..GameConfig::default()
        });
        let dt = game.config().frame_interval();
        let _ = game.frame(&[start()], dt);
        let _ = game.frame(&[], dt);

        let mut scene = Scene::new(Color::BLACK);
        populate_scene(&game, &mut scene);

        assert_eq!(scene.clear_color, Color::WHITE);
        assert!(scene.cursor_grab);
        let grid = scene.grid.expect("board grid");
        assert_eq!(grid.geometry.lanes(), 4);
        assert_eq!(grid.line_color, GRID_LINE);
        assert_eq!(scene.tiles.len(), 5);
        assert_eq!(scene.tiles[0].size, Vec2::new(135.0, 240.0));
        assert_eq!(scene.tiles[0].color, Color::BLACK);
        assert_eq!(
            label_texts(&scene),
            vec!["Piano Tiles! | Score: 0 | Speed: 2.00"]
        );
        assert_eq!(scene.labels[0].scale, HUD_SCALE);
    }

    #[test]
    fn failure_brings_back_the_menu() {
        let mut game = game(GameConfig::default());
        let dt = game.config().frame_interval();
        let _ = game.frame(&[start()], dt);
        let _ = game.frame(&[start()], dt);

        let mut scene = Scene::new(Color::WHITE);
        populate_scene(&game, &mut scene);

        assert_eq!(scene.clear_color, Color::BLACK);
        assert!(scene.tiles.is_empty());
        assert!(label_texts(&scene).contains(&"Last Score: 0"));
    }
}
