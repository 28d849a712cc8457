//! Settings screen shown between play sessions.

use piano_tiles_core::{clamp_divisions, InputEvent, Key, MouseButton};

/// Board settings the player adjusts from the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuSettings {
    lanes: u32,
    tile_rows: u32,
    lock_cursor: bool,
}

impl MenuSettings {
    /// Creates settings, clamping the lane and tile row counts.
    #[must_use]
    pub fn new(lanes: u32, tile_rows: u32, lock_cursor: bool) -> Self {
        Self {
            lanes: clamp_divisions(lanes),
            tile_rows: clamp_divisions(tile_rows),
            lock_cursor,
        }
    }

    /// Number of lanes the next session uses.
    #[must_use]
    pub const fn lanes(&self) -> u32 {
        self.lanes
    }

    /// Number of tile rows the next session uses.
    #[must_use]
    pub const fn tile_rows(&self) -> u32 {
        self.tile_rows
    }

    /// Whether the cursor is confined to the window during play.
    #[must_use]
    pub const fn lock_cursor(&self) -> bool {
        self.lock_cursor
    }

    fn apply_key(&mut self, key: Key) {
        match key {
            Key::TilesUp => self.tile_rows = clamp_divisions(self.tile_rows.saturating_add(1)),
            Key::TilesDown => self.tile_rows = clamp_divisions(self.tile_rows.saturating_sub(1)),
            Key::LanesUp => self.lanes = clamp_divisions(self.lanes.saturating_add(1)),
            Key::LanesDown => self.lanes = clamp_divisions(self.lanes.saturating_sub(1)),
            Key::ToggleCursorLock => self.lock_cursor = !self.lock_cursor,
        }
        log::debug!(
            "menu settings: {} lanes, {} tile rows, cursor lock {}",
            self.lanes,
            self.tile_rows,
            self.lock_cursor
        );
    }
}

/// Result of feeding a frame's input to the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Keep showing the menu.
    Waiting,
    /// The player clicked to start a session.
    StartRequested,
    /// The window was asked to close.
    QuitRequested,
}

/// Menu state machine; `Waiting` until a click or a quit arrives.
#[derive(Debug, Default)]
pub struct MenuSession {
    start_requested: bool,
}

impl MenuSession {
    /// Creates a menu waiting for input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the frame's input to the settings.
    ///
    /// A quit takes precedence over a start request in the same frame. Key
    /// events after a start request are still applied, matching a menu that
    /// only exits once its frame finishes.
    pub fn handle(&mut self, events: &[InputEvent], settings: &mut MenuSettings) -> MenuOutcome {
        let mut quit = false;
        for event in events {
            match *event {
                InputEvent::Quit => quit = true,
                InputEvent::MouseDown {
                    button: MouseButton::Left,
                    ..
                } => self.start_requested = true,
                InputEvent::MouseDown { .. } => {}
                InputEvent::KeyDown { key } => settings.apply_key(key),
            }
        }

        if quit {
            MenuOutcome::QuitRequested
        } else if self.start_requested {
            MenuOutcome::StartRequested
        } else {
            MenuOutcome::Waiting
        }
    }
}
