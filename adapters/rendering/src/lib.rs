#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Piano Tiles adapters.

mod pacing;

use anyhow::Result as AnyResult;
use glam::Vec2;
use piano_tiles_core::{BoardGeometry, InputEvent, TileColor};
use std::time::Duration;
use thiserror::Error;

pub use self::pacing::{Clock, FramePacer, SystemClock};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba_u8(red, green, blue, 255)
    }

    /// Creates a color from byte RGBA values.
    #[must_use]
    pub const fn from_rgba_u8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: alpha as f32 / 255.0,
        }
    }
}

impl From<TileColor> for Color {
    fn from(color: TileColor) -> Self {
        Self::from_rgba_u8(color.red, color.green, color.blue, color.alpha)
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Discrete events drained from the window this frame, in arrival order.
    pub events: Vec<InputEvent>,
}

/// Axis-aligned filled rectangle representing a single tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePresentation {
    /// Top-left corner in surface units.
    pub position: Vec2,
    /// Width and height in surface units.
    pub size: Vec2,
    /// Fill color.
    pub color: Color,
}

impl TilePresentation {
    /// Creates a new tile descriptor.
    #[must_use]
    pub const fn new(position: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            position,
            size,
            color,
        }
    }
}

/// Lane and row divider lines drawn beneath the tiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Layout the lines follow.
    pub geometry: BoardGeometry,
    /// Color used when drawing grid lines.
    pub line_color: Color,
}

impl GridPresentation {
    /// Creates a new grid descriptor.
    #[must_use]
    pub const fn new(geometry: BoardGeometry, line_color: Color) -> Self {
        Self {
            geometry,
            line_color,
        }
    }

    /// Line segments of the grid: one vertical line at the left edge of each
    /// lane, then one horizontal line at the top edge of each tile row.
    #[must_use]
    pub fn lines(&self) -> Vec<(Vec2, Vec2)> {
        let width = self.geometry.surface_width() as f32;
        let height = self.geometry.surface_height() as f32;
        let lane_width = self.geometry.lane_width() as f32;
        let tile_height = self.geometry.tile_height() as f32;

        let vertical = (0..self.geometry.lanes()).map(|lane| {
            let x = lane as f32 * lane_width;
            (Vec2::new(x, 0.0), Vec2::new(x, height))
        });
        let horizontal = (0..self.geometry.tile_rows()).map(|row| {
            let y = row as f32 * tile_height;
            (Vec2::new(0.0, y), Vec2::new(width, y))
        });
        vertical.chain(horizontal).collect()
    }
}

/// Single line of text anchored at its top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    /// Text to draw.
    pub text: String,
    /// Top-left corner in surface units.
    pub position: Vec2,
    /// Multiplier applied to the backend's font size.
    pub scale: f32,
    /// Text color.
    pub color: Color,
}

impl TextLabel {
    /// Creates a new label descriptor drawn at the backend's font size.
    #[must_use]
    pub fn new<T>(text: T, position: Vec2, color: Color) -> Self
    where
        T: Into<String>,
    {
        Self {
            text: text.into(),
            position,
            scale: 1.0,
            color,
        }
    }

    /// Returns the label drawn at `scale` times the backend's font size.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Everything drawn during a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Solid color used to clear the frame.
    pub clear_color: Color,
    /// Grid lines, drawn only while a board is in play.
    pub grid: Option<GridPresentation>,
    /// Tiles in back-to-front order.
    pub tiles: Vec<TilePresentation>,
    /// Text drawn on top of everything else.
    pub labels: Vec<TextLabel>,
    /// Whether the cursor should be confined to the window.
    pub cursor_grab: bool,
}

impl Scene {
    /// Creates an empty scene cleared to the provided color.
    #[must_use]
    pub fn new(clear_color: Color) -> Self {
        Self {
            clear_color,
            grid: None,
            tiles: Vec::new(),
            labels: Vec::new(),
            cursor_grab: false,
        }
    }

    /// Empties the scene so it can be repopulated, keeping its allocations.
    pub fn reset(&mut self, clear_color: Color) {
        self.clear_color = clear_color;
        self.grid = None;
        self.tiles.clear();
        self.labels.clear();
        self.cursor_grab = false;
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Width of the fixed-size render surface.
    pub surface_width: u32,
    /// Height of the fixed-size render surface.
    pub surface_height: u32,
    /// Target frames per second used for pacing.
    pub frame_rate: u32,
    /// Scene displayed before the first update.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(
        window_title: T,
        surface_width: u32,
        surface_height: u32,
        frame_rate: u32,
        scene: Scene,
    ) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            surface_width,
            surface_height,
            frame_rate,
            scene,
        }
    }
}

/// Instructs the backend whether to keep running after an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Render the scene and run another frame.
    Continue,
    /// Release the window and return from [`RenderingBackend::run`].
    Exit,
}

/// Rendering backend capable of presenting Piano Tiles scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure asks it to exit.
    ///
    /// The provided `update_scene` closure receives the measured duration of
    /// the previous frame and the input drained this frame, and rewrites the
    /// scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Drawing primitives a backend exposes to [`draw_scene`].
pub trait RenderSurface {
    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color) -> Result<(), RenderingError>;

    /// Fills an axis-aligned rectangle.
    fn draw_filled_rect(
        &mut self,
        position: Vec2,
        size: Vec2,
        color: Color,
    ) -> Result<(), RenderingError>;

    /// Draws a one pixel wide line segment.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) -> Result<(), RenderingError>;

    /// Draws a single line of text with its top-left corner at `position`,
    /// `scale` times the surface's font size.
    fn draw_text(
        &mut self,
        text: &str,
        position: Vec2,
        scale: f32,
        color: Color,
    ) -> Result<(), RenderingError>;
}

/// Draws `scene` onto `surface`: background, grid lines, tiles, then labels.
///
/// A primitive that fails validation or drawing is logged and skipped; the
/// rest of the frame is still drawn.
pub fn draw_scene<S>(surface: &mut S, scene: &Scene)
where
    S: RenderSurface + ?Sized,
{
    report("background", surface.clear(scene.clear_color));

    if let Some(grid) = &scene.grid {
        for (from, to) in grid.lines() {
            let result = ensure_finite(&[from, to])
                .and_then(|()| surface.draw_line(from, to, grid.line_color));
            report("grid line", result);
        }
    }

    for tile in &scene.tiles {
        let result = ensure_finite(&[tile.position, tile.size])
            .and_then(|()| surface.draw_filled_rect(tile.position, tile.size, tile.color));
        report("tile", result);
    }

    for label in &scene.labels {
        let result = ensure_finite(&[label.position, Vec2::splat(label.scale)])
            .and_then(|()| ensure_text(&label.text))
            .and_then(|()| {
                surface.draw_text(&label.text, label.position, label.scale, label.color)
            });
        report("label", result);
    }
}

fn report(primitive: &str, result: Result<(), RenderingError>) {
    if let Err(error) = result {
        log::warn!("skipped {primitive}: {error}");
    }
}

fn ensure_finite(points: &[Vec2]) -> Result<(), RenderingError> {
    match points.iter().find(|point| !point.is_finite()) {
        Some(point) => Err(RenderingError::NonFiniteGeometry {
            x: point.x,
            y: point.y,
        }),
        None => Ok(()),
    }
}

fn ensure_text(text: &str) -> Result<(), RenderingError> {
    if text.is_empty() {
        Err(RenderingError::EmptyText)
    } else {
        Ok(())
    }
}

/// Errors raised while describing or drawing frames.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// A coordinate or extent was NaN or infinite.
    #[error("geometry must be finite (received ({x}, {y}))")]
    NonFiniteGeometry {
        /// Horizontal component that failed validation.
        x: f32,
        /// Vertical component that failed validation.
        y: f32,
    },
    /// A label carried no text.
    #[error("text labels must not be empty")]
    EmptyText,
    /// Frame pacing was requested at zero frames per second.
    #[error("frame_rate must be positive")]
    ZeroFrameRate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Draw {
        Clear,
        Line(Vec2, Vec2),
        Rect(Vec2, Vec2),
        Text(String),
    }

    #[derive(Default)]
    struct RecordingSurface {
        draws: Vec<Draw>,
        reject_lines: bool,
    }

    impl RenderSurface for RecordingSurface {
        fn clear(&mut self, _color: Color) -> Result<(), RenderingError> {
            self.draws.push(Draw::Clear);
            Ok(())
        }

        fn draw_filled_rect(
            &mut self,
            position: Vec2,
            size: Vec2,
            _color: Color,
        ) -> Result<(), RenderingError> {
            self.draws.push(Draw::Rect(position, size));
            Ok(())
        }

        fn draw_line(&mut self, from: Vec2, to: Vec2, _color: Color) -> Result<(), RenderingError> {
            if self.reject_lines {
                return Err(RenderingError::NonFiniteGeometry { x: from.x, y: to.y });
            }
            self.draws.push(Draw::Line(from, to));
            Ok(())
        }

        fn draw_text(
            &mut self,
            text: &str,
            _position: Vec2,
            _scale: f32,
            _color: Color,
        ) -> Result<(), RenderingError> {
            self.draws.push(Draw::Text(text.to_owned()));
            Ok(())
        }
    }

    fn board_scene() -> Scene {
        let mut scene = Scene::new(Color::WHITE);
        scene.grid = Some(GridPresentation::new(
            BoardGeometry::new(100, 100, 2, 2),
            Color::from_rgba_u8(50, 50, 50, 100),
        ));
        scene.tiles.push(TilePresentation::new(
            Vec2::new(0.0, 10.0),
            Vec2::new(50.0, 50.0),
            Color::BLACK,
        ));
        scene
            .labels
            .push(TextLabel::new("Score: 1", Vec2::new(10.0, 10.0), Color::BLACK));
        scene
    }

    #[test]
    fn grid_lines_mark_each_lane_and_tile_row() {
        let grid = GridPresentation::new(BoardGeometry::new(540, 960, 4, 3), Color::BLACK);
        let lines = grid.lines();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], (Vec2::new(135.0, 0.0), Vec2::new(135.0, 960.0)));
        assert_eq!(lines[6], (Vec2::new(0.0, 640.0), Vec2::new(540.0, 640.0)));
    }

    #[test]
    fn scene_draws_background_grid_tiles_then_labels() {
        let mut surface = RecordingSurface::default();
        draw_scene(&mut surface, &board_scene());

        assert_eq!(surface.draws.len(), 7);
        assert_eq!(surface.draws[0], Draw::Clear);
        assert!(surface.draws[1..5]
            .iter()
            .all(|draw| matches!(draw, Draw::Line(..))));
        assert_eq!(
            surface.draws[5],
            Draw::Rect(Vec2::new(0.0, 10.0), Vec2::new(50.0, 50.0))
        );
        assert_eq!(surface.draws[6], Draw::Text("Score: 1".to_owned()));
    }

    #[test]
    fn failed_primitives_do_not_abort_the_frame() {
        let mut scene = board_scene();
        scene.tiles.insert(
            0,
            TilePresentation::new(Vec2::new(f32::NAN, 0.0), Vec2::ONE, Color::BLACK),
        );
        scene
            .labels
            .insert(0, TextLabel::new("", Vec2::ZERO, Color::BLACK));
        let mut surface = RecordingSurface {
            reject_lines: true,
            ..RecordingSurface::default()
        };

        draw_scene(&mut surface, &scene);

        assert_eq!(
            surface.draws,
            vec![
                Draw::Clear,
                Draw::Rect(Vec2::new(0.0, 10.0), Vec2::new(50.0, 50.0)),
                Draw::Text("Score: 1".to_owned()),
            ]
        );
    }

    #[test]
    fn tile_colors_convert_to_unit_channels() {
        let color = Color::from(TileColor::from_rgba(255, 0, 51, 155));

        assert_eq!(color.red, 1.0);
        assert_eq!(color.green, 0.0);
        assert!((color.blue - 0.2).abs() <= 1e-6);
        assert!((color.alpha - 155.0 / 255.0).abs() <= 1e-6);
    }

    #[test]
    fn reset_clears_previous_frame_content() {
        let mut scene = board_scene();
        scene.cursor_grab = true;

        scene.reset(Color::BLACK);

        assert_eq!(scene, Scene::new(Color::BLACK));
    }
}
