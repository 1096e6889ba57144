//! PTY host.
//!
//! Spawns the child process attached to a pseudo-terminal and exposes
//! the write/resize/wait surface the app loop needs. Reading happens on
//! a dedicated thread owned by `main`, which feeds bytes back through
//! the app channel.

use std::io::{Read, Write};

use portable_pty::{native_pty_system, CommandBuilder, MasterPty, PtySize};
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_SHELL: &str = "/bin/bash";
const DEFAULT_HOME: &str = "/root";

/// Resolved child invocation: argv, environment additions, and working
/// directory.
#[derive(Debug, PartialEq, Eq)]
struct ChildCommand {
    argv: Vec<String>,
    env: Vec<(String, String)>,
    cwd: String,
}

/// Build the child invocation.
///
/// The child always gets `TERM` and a plain `PS1`. With no command, the
/// shell is spawned interactively (`-i` when it is bash). `HOME` falls
/// back to `/root` when unset, and the fallback is exported to the
/// child.
fn build_command(
    command: &[String],
    shell: Option<&str>,
    term_name: &str,
    home: Option<&str>,
) -> ChildCommand {
    let mut env = vec![
        ("TERM".to_owned(), term_name.to_owned()),
        ("PS1".to_owned(), "$ ".to_owned()),
    ];
    let cwd = match home {
        Some(home) => home.to_owned(),
        None => {
            env.push(("HOME".to_owned(), DEFAULT_HOME.to_owned()));
            DEFAULT_HOME.to_owned()
        }
    };

    let argv = if command.is_empty() {
        let shell = shell.unwrap_or(DEFAULT_SHELL).to_owned();
        if shell == DEFAULT_SHELL {
            // Interactive mode for the stock shell.
            vec![shell, "-i".to_owned()]
        } else {
            vec![shell]
        }
    } else {
        command.to_vec()
    };

    ChildCommand { argv, env, cwd }
}

/// The write/resize surface the app loop uses.
///
/// Split out as a trait so the loop can be exercised against a recording
/// stub without allocating a real PTY.
pub trait PtyHandle {
    /// Write input bytes to the child.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Inform the child of a new window size.
    fn resize(&mut self, rows: u16, cols: u16) -> Result<()>;
}

/// Handle to the PTY master: input and resize.
pub struct Pty {
    master: Box<dyn MasterPty + Send>,
    writer: Box<dyn Write + Send>,
}

/// Handle to the spawned child: exit collection and teardown.
pub struct PtyChild {
    child: Box<dyn portable_pty::Child + Send + Sync>,
}

/// Open a PTY of the given size and spawn `command` on the slave side
/// (the user's shell when `command` is empty).
///
/// Returns the master handle, the child handle, and a reader for the
/// output-feed thread.
pub fn spawn(
    rows: u16,
    cols: u16,
    command: &[String],
    shell: Option<&str>,
    term_name: &str,
) -> Result<(Pty, PtyChild, Box<dyn Read + Send>)> {
    let pty_system = native_pty_system();
    let pair = pty_system
        .openpty(PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        })
        .map_err(|e| Error::Pty(e.to_string()))?;

    let shell = shell
        .map(str::to_owned)
        .or_else(|| std::env::var("SHELL").ok());
    let home = std::env::var("HOME").ok();
    let spec = build_command(command, shell.as_deref(), term_name, home.as_deref());

    let mut cmd = CommandBuilder::new(&spec.argv[0]);
    cmd.args(&spec.argv[1..]);
    for (key, value) in &spec.env {
        cmd.env(key, value);
    }
    cmd.cwd(&spec.cwd);

    let child = pair
        .slave
        .spawn_command(cmd)
        .map_err(|e| Error::Pty(e.to_string()))?;
    // Drop the slave side so the reader sees EOF when the child exits.
    drop(pair.slave);

    let reader = pair
        .master
        .try_clone_reader()
        .map_err(|e| Error::Pty(e.to_string()))?;
    let writer = pair
        .master
        .take_writer()
        .map_err(|e| Error::Pty(e.to_string()))?;

    debug!(rows, cols, "spawned child on pty");

    Ok((
        Pty {
            master: pair.master,
            writer,
        },
        PtyChild { child },
        reader,
    ))
}

impl PtyHandle for Pty {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        Ok(())
    }

    fn resize(&mut self, rows: u16, cols: u16) -> Result<()> {
        self.master
            .resize(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| Error::Pty(e.to_string()))
    }
}

impl PtyChild {
    /// Wait for the child and return its exit code.
    ///
    /// The PTY layer folds signal deaths into the code the same way the
    /// shell does (`128 + signal`).
    pub fn wait(&mut self) -> i32 {
        match self.child.wait() {
            Ok(status) => status.exit_code() as i32,
            Err(_) => 1,
        }
    }

    /// Ask the child to terminate (display-side shutdown).
    pub fn kill(&mut self) {
        let mut killer = self.child.clone_killer();
        let _ = killer.kill();
    }
}
