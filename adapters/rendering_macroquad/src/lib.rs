#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Piano Tiles.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The window is fixed to the presentation's surface size, so scene
//! coordinates map one-to-one onto screen pixels.

use anyhow::{anyhow, Context, Result};
use glam::Vec2;
use macroquad::{
    input::{
        is_key_pressed, is_mouse_button_pressed, is_quit_requested, mouse_position, prevent_quit,
        set_cursor_grab, KeyCode, MouseButton as MacroquadMouseButton,
    },
    text::{draw_text, draw_text_ex, load_ttf_font_from_bytes, measure_text, Font, TextParams},
};
use piano_tiles_core::{InputEvent, Key, MouseButton, SurfacePoint};
use piano_tiles_rendering::{
    draw_scene, Color, FrameControl, FrameInput, FramePacer, Presentation, RenderSurface,
    RenderingBackend, RenderingError, Scene, SystemClock,
};
use std::{
    path::PathBuf,
    sync::mpsc,
    time::Duration,
};

/// Font size used for labels when none is configured.
pub const DEFAULT_FONT_SIZE: u16 = 50;

/// Overshoot past the frame budget tolerated before a frame counts as late.
const LATE_FRAME_SLACK: Duration = Duration::from_millis(1);

/// Raw window input observed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct InputObservations {
    /// Window close button or `Escape`.
    pub quit_requested: bool,
    /// Cursor position in window pixels.
    pub cursor: Vec2,
    /// Left mouse button went down.
    pub left_click: bool,
    /// Right mouse button went down.
    pub right_click: bool,
    /// Middle mouse button went down.
    pub middle_click: bool,
    /// `Up` arrow went down.
    pub up: bool,
    /// `Down` arrow went down.
    pub down: bool,
    /// `Left` arrow went down.
    pub left: bool,
    /// `Right` arrow went down.
    pub right: bool,
    /// `L` went down.
    pub lock: bool,
}

impl InputObservations {
    fn poll() -> Self {
        let (cursor_x, cursor_y) = mouse_position();
        Self {
            quit_requested: is_quit_requested() || is_key_pressed(KeyCode::Escape),
            cursor: Vec2::new(cursor_x, cursor_y),
            left_click: is_mouse_button_pressed(MacroquadMouseButton::Left),
            right_click: is_mouse_button_pressed(MacroquadMouseButton::Right),
            middle_click: is_mouse_button_pressed(MacroquadMouseButton::Middle),
            up: is_key_pressed(KeyCode::Up),
            down: is_key_pressed(KeyCode::Down),
            left: is_key_pressed(KeyCode::Left),
            right: is_key_pressed(KeyCode::Right),
            lock: is_key_pressed(KeyCode::L),
        }
    }
}

/// Translates one frame of observations into ordered input events: quit
/// first, then mouse presses, then menu keys.
#[doc(hidden)]
#[must_use]
pub fn gather_frame_input_from_observations(observations: InputObservations) -> FrameInput {
    let mut events = Vec::new();
    if observations.quit_requested {
        events.push(InputEvent::Quit);
    }

    let position = SurfacePoint::new(observations.cursor.x, observations.cursor.y);
    let buttons = [
        (observations.left_click, MouseButton::Left),
        (observations.right_click, MouseButton::Right),
        (observations.middle_click, MouseButton::Middle),
    ];
    events.extend(
        buttons
            .into_iter()
            .filter(|(pressed, _)| *pressed)
            .map(|(_, button)| InputEvent::MouseDown { button, position }),
    );

    let keys = [
        (observations.up, Key::TilesUp),
        (observations.down, Key::TilesDown),
        (observations.right, Key::LanesUp),
        (observations.left, Key::LanesDown),
        (observations.lock, Key::ToggleCursorLock),
    ];
    events.extend(
        keys.into_iter()
            .filter(|(pressed, _)| *pressed)
            .map(|(_, key)| InputEvent::KeyDown { key }),
    );

    FrameInput { events }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    font_path: Option<PathBuf>,
    font_size: u16,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            font_path: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or rely on frame pacing alone.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Draws labels with the TrueType font stored at `path` instead of the
    /// built-in one.
    #[must_use]
    pub fn with_font<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.font_path = Some(path.into());
        self
    }

    /// Sets the pixel size labels are drawn at.
    #[must_use]
    pub fn with_font_size(mut self, font_size: u16) -> Self {
        self.font_size = font_size.max(1);
        self
    }
}

/// Measures the achieved frame rate against the paced budget.
#[derive(Debug)]
struct FrameRateMonitor {
    budget: Duration,
    elapsed: Duration,
    frames: u32,
    late_frames: u32,
}

/// One second of frame-rate samples.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FrameRateReport {
    per_second: f32,
    late_frames: u32,
}

impl FrameRateMonitor {
    fn new(budget: Duration) -> Self {
        Self {
            budget,
            elapsed: Duration::ZERO,
            frames: 0,
            late_frames: 0,
        }
    }

    /// Records a presented frame; reports once at least a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FrameRateReport> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if frame > self.budget + LATE_FRAME_SLACK {
            self.late_frames = self.late_frames.saturating_add(1);
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let report = FrameRateReport {
            per_second: self.frames as f32 / self.elapsed.as_secs_f32(),
            late_frames: self.late_frames,
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.late_frames = 0;
        Some(report)
    }
}

/// Draws scene primitives with macroquad's immediate-mode shapes and text.
struct MacroquadSurface {
    font: Option<Font>,
    font_size: u16,
}

impl RenderSurface for MacroquadSurface {
    fn clear(&mut self, color: Color) -> Result<(), RenderingError> {
        macroquad::window::clear_background(to_macroquad_color(color));
        Ok(())
    }

    fn draw_filled_rect(
        &mut self,
        position: Vec2,
        size: Vec2,
        color: Color,
    ) -> Result<(), RenderingError> {
        macroquad::shapes::draw_rectangle(
            position.x,
            position.y,
            size.x,
            size.y,
            to_macroquad_color(color),
        );
        Ok(())
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) -> Result<(), RenderingError> {
        macroquad::shapes::draw_line(from.x, from.y, to.x, to.y, 1.0, to_macroquad_color(color));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        position: Vec2,
        scale: f32,
        color: Color,
    ) -> Result<(), RenderingError> {
        // Macroquad anchors text at its baseline; labels are anchored at their top edge.
        let dimensions = measure_text(text, self.font, self.font_size, scale);
        let baseline = position.y + dimensions.offset_y;
        let color = to_macroquad_color(color);

        match self.font {
            Some(font) => {
                let _ = draw_text_ex(
                    text,
                    position.x,
                    baseline,
                    TextParams {
                        font,
                        font_size: self.font_size,
                        font_scale: scale,
                        color,
                        ..TextParams::default()
                    },
                );
            }
            None => {
                let font_size = f32::from(self.font_size) * scale;
                let _ = draw_text(text, position.x, baseline, font_size, color);
            }
        }
        Ok(())
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            font_path,
            font_size,
        } = self;

        let Presentation {
            window_title,
            surface_width,
            surface_height,
            frame_rate,
            scene,
        } = presentation;

        let font_bytes = match font_path {
            Some(path) => Some(
                std::fs::read(&path)
                    .with_context(|| format!("failed to read font {}", path.display()))?,
            ),
            None => None,
        };
        let mut pacer = FramePacer::new(SystemClock::new(), frame_rate)
            .context("invalid frame pacing configuration")?;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(surface_width).context("surface width out of range")?,
            window_height: i32::try_from(surface_height)
                .context("surface height out of range")?,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (font_init_sender, font_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let font = match font_bytes {
                Some(bytes) => match load_ttf_font_from_bytes(&bytes) {
                    Ok(font) => Some(font),
                    Err(error) => {
                        let _ = font_init_sender
                            .send(Err(anyhow!("failed to load label font: {error:?}")));
                        return;
                    }
                },
                None => None,
            };
            let _ = font_init_sender.send(Ok(()));

            prevent_quit();
            let mut surface = MacroquadSurface { font, font_size };
            let mut scene = scene;
            let mut frame_rate = FrameRateMonitor::new(pacer.interval());
            let mut cursor_grabbed = false;
            let mut frame_dt = pacer.interval();

            loop {
                let frame_input = gather_frame_input_from_observations(InputObservations::poll());

                let control = update_scene(frame_dt, frame_input, &mut scene);
                if control == FrameControl::Exit {
                    break;
                }

                if scene.cursor_grab != cursor_grabbed {
                    cursor_grabbed = scene.cursor_grab;
                    set_cursor_grab(cursor_grabbed);
                    log::debug!("cursor grab {}", if cursor_grabbed { "on" } else { "off" });
                }

                draw_scene(&mut surface, &scene);

                macroquad::window::next_frame().await;
                frame_dt = pacer.finish_frame();

                let report = frame_rate.record_frame(frame_dt);
                if show_fps {
                    if let Some(FrameRateReport {
                        per_second,
                        late_frames,
                    }) = report
                    {
                        log::info!("FPS: {per_second:.2} ({late_frames} late)");
                    }
                }
            }

            if cursor_grabbed {
                set_cursor_grab(false);
            }
        });

        font_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
