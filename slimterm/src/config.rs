//! Configuration loading.
//!
//! TOML config with per-section defaults mirroring the source
//! terminal's compiled-in constants. A missing file yields the
//! defaults; an explicitly requested file that cannot be read or
//! parsed is a fatal error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use slimterm_core::color::{parse_hex, Palette, SELECTION_BG, SELECTION_FG};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub font: FontConfig,
    pub colors: ColorConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub rows: usize,
    pub columns: usize,
    /// Inner border in pixels.
    pub border: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font identifier string handed to the display backend.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// The 16 palette entries as `#RRGGBB` strings. Entries beyond the
    /// palette size or that fail to parse are ignored.
    pub palette: Vec<String>,
    /// Palette index painted under selected text.
    pub selection_foreground: u8,
    /// Palette index painted behind selected text.
    pub selection_background: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Shell to spawn when no command is given (falls back to `$SHELL`).
    pub shell: Option<String>,
    /// Value of `TERM` for the child.
    pub term: String,
    /// Lines scrolled per mouse wheel tick.
    pub scroll_lines: usize,
    /// Whether backspace erases the vacated cell (source behavior).
    pub destructive_backspace: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            rows: 24,
            columns: 80,
            border: 20,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            name: "JetBrainsMono Nerd Font:size=15".to_owned(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            palette: Vec::new(),
            selection_foreground: SELECTION_FG,
            selection_background: SELECTION_BG,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            shell: None,
            term: "xterm-256color".to_owned(),
            scroll_lines: 3,
            destructive_backspace: true,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist and parse. Without one, the default
    /// location is tried and a missing file silently yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) if required => return Err(Error::ConfigRead { path, source }),
            Err(_) => return Ok(Self::default()),
        };

        let config: Self =
            toml::from_str(&text).map_err(|source| Error::ConfigParse { path: path.clone(), source })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Default config file location: `~/.config/slimterm/config.toml`.
    fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("slimterm")
                .join("config.toml"),
        )
    }

    /// Build the palette, applying any configured color overrides.
    pub fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        for (index, spec) in self.colors.palette.iter().enumerate().take(16) {
            if let Some(rgb) = parse_hex(spec) {
                palette.set(index as u8, rgb);
            }
        }
        palette
    }
}
