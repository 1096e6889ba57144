//! Command-line interface.
//!
//! `slimterm [command [args…]]` — with no trailing arguments the user's
//! default shell is spawned; otherwise the given command is executed on
//! the PTY slave. The exit code mirrors the child.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "slimterm", about = "A minimal terminal emulator", version)]
pub struct Cli {
    /// Path to the TOML config file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug diagnostics on the error stream.
    #[arg(long)]
    pub debug: bool,

    /// Command to run instead of the default shell.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}
