//! TOML configuration file for the command-line adapter.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use piano_tiles_rendering_macroquad::DEFAULT_FONT_SIZE;
use piano_tiles_system_session::GameConfig;
use serde::Deserialize;

/// File picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "piano-tiles.toml";

/// Complete configuration file; every table and key is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AppConfig {
    /// Gameplay tuning shared by every session.
    pub(crate) game: GameConfig,
    /// Window and text settings.
    pub(crate) display: DisplayConfig,
}

/// Settings that only affect presentation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DisplayConfig {
    /// TrueType font used for labels; the backend's built-in font otherwise.
    pub(crate) font_path: Option<PathBuf>,
    /// Pixel size labels are drawn at.
    pub(crate) font_size: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `explicit`, or from
    /// [`DEFAULT_CONFIG_FILE`] when it exists, or falls back to defaults.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::read(fallback)
                } else {
                    log::debug!("no {DEFAULT_CONFIG_FILE} found, using built-in defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("failed to parse configuration {}", path.display()))?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub(crate) fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration syntax")
    }
}
