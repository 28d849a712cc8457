//! Tunable gameplay parameters, loadable from the `[game]` table of a TOML file.

use std::time::Duration;

use piano_tiles_core::{BoardGeometry, TileColor};
use piano_tiles_world::{
    WorldConfig, DEFAULT_CLICK_FADE, DEFAULT_SCROLL_ACCELERATION, DEFAULT_SCROLL_SPEED,
};
use serde::Deserialize;
use thiserror::Error;

/// Gameplay configuration shared by every session of the process.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Render surface width in pixels.
    pub surface_width: u32,
    /// Render surface height in pixels.
    pub surface_height: u32,
    /// Target frames per second; scroll speeds are expressed per frame.
    pub frame_rate: u32,
    /// Lane count the menu starts with.
    pub lanes: u32,
    /// Tile row count the menu starts with.
    pub tile_rows: u32,
    /// Whether the cursor is confined to the window during play.
    pub lock_cursor: bool,
    /// Scroll distance per frame at the start of each session.
    pub scroll_speed: f32,
    /// Scroll speed gained every frame.
    pub scroll_acceleration: f32,
    /// Color of freshly spawned tiles.
    pub tile_color: TileColor,
    /// Alpha removed from a tile when it is clicked.
    pub click_fade: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: 540,
            surface_height: 960,
            frame_rate: 60,
            lanes: 4,
            tile_rows: 4,
            lock_cursor: false,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            scroll_acceleration: DEFAULT_SCROLL_ACCELERATION,
            tile_color: TileColor::BLACK,
            click_fade: DEFAULT_CLICK_FADE,
        }
    }
}

impl GameConfig {
    /// Checks the values a session cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(ConfigError::EmptySurface {
                width: self.surface_width,
                height: self.surface_height,
            });
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if !self.scroll_speed.is_finite() || self.scroll_speed < 0.0 {
            return Err(ConfigError::InvalidScrollSpeed(self.scroll_speed));
        }
        if !self.scroll_acceleration.is_finite() || self.scroll_acceleration < 0.0 {
            return Err(ConfigError::InvalidScrollAcceleration(
                self.scroll_acceleration,
            ));
        }
        Ok(())
    }

    /// Duration of a single frame at the configured frame rate.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Board geometry for the provided lane and tile row counts.
    #[must_use]
    pub fn geometry(&self, lanes: u32, tile_rows: u32) -> BoardGeometry {
        BoardGeometry::new(self.surface_width, self.surface_height, lanes, tile_rows)
    }

    /// World configuration for a session played on `geometry`.
    #[must_use]
    pub fn world_config(&self, geometry: BoardGeometry) -> WorldConfig {
        WorldConfig::new(geometry)
            .with_tile_color(self.tile_color)
            .with_click_fade(self.click_fade)
            .with_scroll(self.scroll_speed, self.scroll_acceleration)
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// One of the surface dimensions is zero.
    #[error("surface must be at least 1x1 pixels (got {width}x{height})")]
    EmptySurface {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// The frame rate is zero.
    #[error("frame_rate must be positive")]
    ZeroFrameRate,
    /// The scroll speed is negative or not a number.
    #[error("scroll_speed must be a finite, non-negative number (got {0})")]
    InvalidScrollSpeed(f32),
    /// The scroll acceleration is negative or not a number.
    #[error("scroll_acceleration must be a finite, non-negative number (got {0})")]
    InvalidScrollAcceleration(f32),
}
