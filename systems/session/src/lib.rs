#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session orchestration for Piano Tiles.
//!
//! [`Game`] is the outer loop: it alternates between a [`MenuSession`] and a
//! [`PlaySession`] for the lifetime of the process and owns everything that
//! outlives a single session, namely the menu settings and the
//! [`Scoreboard`]. Each call to [`Game::frame`] is a pure transition from the
//! drained input events and elapsed time to the next state; rendering,
//! pacing and window chrome belong to the adapters.

mod config;
mod menu;
mod play;
mod score;

use std::time::Duration;

use piano_tiles_core::{InputEvent, GAME_TITLE};
use piano_tiles_system_spawning::LaneSource;
use piano_tiles_world::World;

pub use self::config::{ConfigError, GameConfig};
pub use self::menu::{MenuOutcome, MenuSession, MenuSettings};
pub use self::play::{PlayOutcome, PlaySession};
pub use self::score::Scoreboard;

/// Whether the host loop should keep running after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Run another frame.
    Continue,
    /// Tear down the window and exit.
    Exit,
}

/// Read-only view of the active mode for presentation.
#[derive(Clone, Copy, Debug)]
pub enum GameView<'a> {
    /// The settings screen is showing.
    Menu {
        /// Settings the next session will use.
        settings: &'a MenuSettings,
        /// Scores of earlier sessions.
        scoreboard: &'a Scoreboard,
    },
    /// A session is running.
    Play {
        /// Board of the running session.
        world: &'a World,
    },
    /// The player quit.
    Exited,
}

#[derive(Debug)]
enum Mode<L> {
    Menu { menu: MenuSession, lanes: L },
    Play(PlaySession<L>),
    Exited,
}

/// Outer game loop state shared by every session of the process.
#[derive(Debug)]
pub struct Game<L> {
    config: GameConfig,
    settings: MenuSettings,
    scoreboard: Scoreboard,
    mode: Mode<L>,
}

impl<L: LaneSource> Game<L> {
    /// Creates a game showing the menu.
    pub fn new(config: GameConfig, lanes: L) -> Result<Self, ConfigError> {
        config.validate()?;
        let settings = MenuSettings::new(config.lanes, config.tile_rows, config.lock_cursor);
        Ok(Self {
            config,
            settings,
            scoreboard: Scoreboard::default(),
            mode: Mode::Menu {
                menu: MenuSession::new(),
                lanes,
            },
        })
    }

    /// Feeds one frame of input to the active mode and performs any mode
    /// transition it triggers.
    pub fn frame(&mut self, input: &[InputEvent], dt: Duration) -> FrameStatus {
        let mode = std::mem::replace(&mut self.mode, Mode::Exited);
        self.mode = match mode {
            Mode::Menu { mut menu, lanes } => match menu.handle(input, &mut self.settings) {
                MenuOutcome::Waiting => Mode::Menu { menu, lanes },
                MenuOutcome::StartRequested => Mode::Play(self.start_session(lanes)),
                MenuOutcome::QuitRequested => {
                    log::info!("exit requested from menu");
                    Mode::Exited
                }
            },
            Mode::Play(mut session) => match session.step(input, dt) {
                PlayOutcome::Running => Mode::Play(session),
                PlayOutcome::Failed(reason) => {
                    let points = session.points();
                    self.scoreboard.record_session(points);
                    log::info!(
                        "session over ({reason}): {points} points, high score {}",
                        self.scoreboard.high_score()
                    );
                    Mode::Menu {
                        menu: MenuSession::new(),
                        lanes: session.into_lane_source(),
                    }
                }
                PlayOutcome::QuitRequested => Mode::Exited,
            },
            Mode::Exited => Mode::Exited,
        };

        match self.mode {
            Mode::Exited => FrameStatus::Exit,
            Mode::Menu { .. } | Mode::Play(_) => FrameStatus::Continue,
        }
    }

    fn start_session(&self, lanes: L) -> PlaySession<L> {
        let geometry = self
            .config
            .geometry(self.settings.lanes(), self.settings.tile_rows());
        log::info!(
            "starting session: {} lanes, {} tile rows",
            geometry.lanes(),
            geometry.tile_rows()
        );
        PlaySession::new(self.config.world_config(geometry), lanes)
    }

    /// Read-only view of the active mode.
    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        match &self.mode {
            Mode::Menu { .. } => GameView::Menu {
                settings: &self.settings,
                scoreboard: &self.scoreboard,
            },
            Mode::Play(session) => GameView::Play {
                world: session.world(),
            },
            Mode::Exited => GameView::Exited,
        }
    }

    /// Title the window should currently carry.
    #[must_use]
    pub fn window_title(&self) -> String {
        match &self.mode {
            Mode::Play(session) => session.window_title(),
            Mode::Menu { .. } | Mode::Exited => GAME_TITLE.to_owned(),
        }
    }

    /// Whether the cursor should currently be confined to the window.
    #[must_use]
    pub fn cursor_grab(&self) -> bool {
        matches!(self.mode, Mode::Play(_)) && self.settings.lock_cursor()
    }

    /// Active play session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&PlaySession<L>> {
        match &self.mode {
            Mode::Play(session) => Some(session),
            Mode::Menu { .. } | Mode::Exited => None,
        }
    }

    /// Settings the next session will use.
    #[must_use]
    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    /// Scores of finished sessions.
    #[must_use]
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Gameplay configuration the game was created with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
