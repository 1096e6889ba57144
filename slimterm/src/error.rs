//! Fatal error types for the host binary.
//!
//! Only environment failures surface here — a display that cannot open,
//! a PTY that cannot be allocated, a config file that will not parse.
//! Parser and selection anomalies never become errors; they are handled
//! (ignored) inside the engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("pty error: {0}")]
    Pty(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
