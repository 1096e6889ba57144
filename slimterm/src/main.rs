//! Process bootstrap.
//!
//! Parses the command line, loads config, spawns the child on a PTY,
//! wires the reader and stdin relay threads into the app channel, and
//! runs the event loop. The process exits with the child's status code.

use std::io::{self, Read, Write};
use std::process;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use slimterm_core::Term;

use slimterm::app::{App, AppInput};
use slimterm::cli::Cli;
use slimterm::config::Config;
use slimterm::display::{HeadlessDisplay, SelectionColors};
use slimterm::error::Result;
use slimterm::pty;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("slimterm: {err}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    let rows = config.window.rows;
    let cols = config.window.columns;

    let (pty, mut child, reader) = pty::spawn(
        rows as u16,
        cols as u16,
        &cli.command,
        config.behavior.shell.as_deref(),
        &config.behavior.term,
    )?;

    let (tx, rx) = mpsc::channel();
    spawn_pty_reader(reader, tx.clone());
    spawn_stdin_relay(tx);

    let mut term = Term::new(rows, cols);
    term.set_destructive_backspace(config.behavior.destructive_backspace);

    let display = HeadlessDisplay::new(config.window.border);
    let mut app = App::new(
        term,
        config.palette(),
        SelectionColors {
            fg: config.colors.selection_foreground,
            bg: config.colors.selection_background,
        },
        display,
        pty,
        config.behavior.scroll_lines,
    );
    app.run(&rx)?;

    if app.display_closed() {
        child.kill();
    }
    let code = child.wait();
    info!(code, "child exited");
    Ok(code)
}

/// Feed PTY output into the app loop, mirroring it to stdout so the
/// process doubles as a headless terminal host.
fn spawn_pty_reader(mut reader: Box<dyn Read + Send>, tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        let mut stdout = io::stdout();
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf) {
                Ok(0) | Err(_) => {
                    let _ = tx.send(AppInput::PtyEof);
                    return;
                }
                Ok(n) => {
                    let _ = stdout.write_all(&buf[..n]);
                    let _ = stdout.flush();
                    if tx.send(AppInput::Pty(buf[..n].to_vec())).is_err() {
                        return;
                    }
                }
            }
        }
    });
}

/// Relay raw stdin bytes to the child through the app loop.
fn spawn_stdin_relay(tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        let mut stdin = io::stdin();
        let mut buf = [0u8; 4096];
        loop {
            match stdin.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => {
                    if tx.send(AppInput::Input(buf[..n].to_vec())).is_err() {
                        return;
                    }
                }
            }
        }
    });
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("slimterm=debug,slimterm_core=trace")
    } else {
        EnvFilter::try_from_env("SLIMTERM_LOG").unwrap_or_else(|_| EnvFilter::new("error"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    debug!("diagnostics enabled");
}
