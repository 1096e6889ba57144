//! The application loop.
//!
//! Single-threaded cooperative multiplexing: PTY bytes and display
//! events arrive on one channel and are applied strictly in arrival
//! order. The engine state is owned exclusively here — collaborators
//! only ever see messages. A frame is drawn between batches, never in
//! the middle of one, so the renderer always observes a consistent
//! grid.

use std::sync::mpsc::Receiver;

use tracing::{debug, trace};

use slimterm_core::{Palette, Selection, Term};

use crate::display::{Display, DisplayEvent, Frame, SelectionColors};
use crate::error::Result;
use crate::input::{self, Action, KeyPress, MouseButton};
use crate::pty::PtyHandle;

/// One message into the app loop.
#[derive(Debug)]
pub enum AppInput {
    /// A batch of bytes read from the PTY.
    Pty(Vec<u8>),
    /// The PTY reader hit end-of-file: the child is gone.
    PtyEof,
    /// Raw input bytes destined for the child (headless stdin relay).
    Input(Vec<u8>),
    /// An event from the display backend.
    Display(DisplayEvent),
}

/// The terminal application: engine state plus its two collaborators.
pub struct App<D: Display, P: PtyHandle> {
    term: Term,
    selection: Selection,
    palette: Palette,
    selection_colors: SelectionColors,
    display: D,
    pty: P,
    /// Lines per wheel tick.
    scroll_lines: isize,
    running: bool,
    /// Set when shutdown came from the display rather than child exit.
    display_closed: bool,
}

impl<D: Display, P: PtyHandle> App<D, P> {
    pub fn new(
        term: Term,
        palette: Palette,
        selection_colors: SelectionColors,
        display: D,
        pty: P,
        scroll_lines: usize,
    ) -> Self {
        Self {
            term,
            selection: Selection::new(),
            palette,
            selection_colors,
            display,
            pty,
            scroll_lines: scroll_lines as isize,
            running: true,
            display_closed: false,
        }
    }

    /// Run until the child exits or the display closes.
    ///
    /// Messages already queued behind the one being handled are drained
    /// before the next draw, so a burst of PTY output costs one frame.
    pub fn run(&mut self, rx: &Receiver<AppInput>) -> Result<()> {
        self.draw();
        while self.running {
            let Ok(msg) = rx.recv() else {
                break;
            };
            self.handle(msg)?;
            while self.running {
                match rx.try_recv() {
                    Ok(msg) => self.handle(msg)?,
                    Err(_) => break,
                }
            }
            self.draw();
        }
        Ok(())
    }

    /// Apply one message.
    pub fn handle(&mut self, input: AppInput) -> Result<()> {
        match input {
            AppInput::Pty(bytes) => {
                trace!(len = bytes.len(), "pty batch");
                self.term.process_bytes(&bytes);
            }
            AppInput::PtyEof => {
                debug!("pty eof; shutting down");
                self.running = false;
            }
            AppInput::Input(bytes) => self.pty.write(&bytes)?,
            AppInput::Display(event) => self.handle_display_event(event)?,
        }
        Ok(())
    }

    /// Whether the loop is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether shutdown was initiated by the display (the child may
    /// still be alive and need a kill).
    pub fn display_closed(&self) -> bool {
        self.display_closed
    }

    /// The engine state (for inspection).
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// The selection state (for inspection).
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn handle_display_event(&mut self, event: DisplayEvent) -> Result<()> {
        match event {
            // A draw follows every batch; nothing extra to do.
            DisplayEvent::Expose => {}
            DisplayEvent::Resize { width_px, height_px } => {
                let (rows, cols) = self.display.metrics().grid_size(width_px, height_px);
                if rows != self.term.grid().lines() || cols != self.term.grid().cols() {
                    debug!(rows, cols, "resize");
                    self.term.resize(rows, cols);
                    self.pty.resize(rows as u16, cols as u16)?;
                }
            }
            DisplayEvent::KeyPress(press) => self.handle_key(press)?,
            DisplayEvent::MouseButton {
                button,
                x_px,
                y_px,
                pressed,
            } => self.handle_mouse_button(button, x_px, y_px, pressed)?,
            DisplayEvent::MouseMotion { x_px, y_px } => self.handle_mouse_motion(x_px, y_px)?,
            DisplayEvent::SelectionNotify { bytes } => {
                self.pty.write(&bytes)?;
            }
            DisplayEvent::Closed => {
                debug!("display closed; shutting down");
                self.running = false;
                self.display_closed = true;
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, press: KeyPress) -> Result<()> {
        match input::encode_key(press) {
            Some(Action::Write(bytes)) => self.pty.write(&bytes)?,
            Some(Action::CopySelection) => {
                // Commit: publish and drop the selection.
                if let Some(bytes) = self.selection.materialize(&self.term) {
                    self.display.set_clipboard(bytes);
                    self.selection.clear();
                }
            }
            Some(Action::RequestPaste) => self.display.request_clipboard(),
            Some(Action::Scroll(delta)) => self.term.scroll_display(delta),
            None => {}
        }
        Ok(())
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        x_px: i32,
        y_px: i32,
        pressed: bool,
    ) -> Result<()> {
        match button {
            MouseButton::WheelUp if pressed => self.term.scroll_display(-self.scroll_lines),
            MouseButton::WheelDown if pressed => self.term.scroll_display(self.scroll_lines),
            MouseButton::Left => {
                let (row, col) = self.cell_at(x_px, y_px);
                if pressed {
                    self.selection.begin(row, col);
                    if self.term.mouse_enabled() {
                        let report =
                            input::mouse_press_report(col as i32, self.report_row(row));
                        self.pty.write(&report)?;
                    }
                } else {
                    if self.selection.is_active() {
                        self.selection.end();
                        // Copy-on-select; the selection stays queryable.
                        if let Some(bytes) = self.selection.materialize(&self.term) {
                            self.display.set_clipboard(bytes);
                        }
                    }
                    if self.term.mouse_enabled() {
                        let report =
                            input::mouse_release_report(col as i32, self.report_row(row));
                        self.pty.write(&report)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_mouse_motion(&mut self, x_px: i32, y_px: i32) -> Result<()> {
        if !self.selection.is_active() {
            return Ok(());
        }
        let (row, col) = self.cell_at(x_px, y_px);
        self.selection.extend(row, col);
        if self.term.mouse_reports_motion() {
            let report = input::mouse_motion_report(col as i32, self.report_row(row));
            self.pty.write(&report)?;
        }
        Ok(())
    }

    /// Convert a pixel position to a unified-row cell coordinate.
    fn cell_at(&self, x_px: i32, y_px: i32) -> (usize, usize) {
        let (screen_row, col) = self.display.metrics().cell_at(x_px, y_px);
        (self.term.screen_to_unified(screen_row), col)
    }

    /// The row as reported to the application: live-grid relative, which
    /// goes negative while scrolled back into history.
    fn report_row(&self, unified_row: usize) -> i32 {
        unified_row as i32 - self.term.primary_grid().scrollback().len() as i32
    }

    fn draw(&mut self) {
        self.display.draw(Frame {
            term: &self.term,
            selection: &self.selection,
            palette: &self.palette,
            selection_colors: self.selection_colors,
        });
    }
}
