//! Terminal state machine.
//!
//! `Term` owns the primary and alternate grids, the current SGR
//! attributes, mode flags, the parser state, and the scrollback view
//! offset. The escape parser drives it through the operation methods
//! below; the host feeds it raw PTY bytes via [`Term::process_bytes`].

pub mod mode;

pub use mode::TermMode;

use std::mem;

use crate::color::{DEFAULT_BG, DEFAULT_FG};
use crate::grid::{Grid, SCROLLBACK_SIZE};
use crate::parser::Parser;

/// Current SGR colors applied to newly written cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SgrState {
    pub fg: u8,
    pub bg: u8,
}

impl Default for SgrState {
    fn default() -> Self {
        Self {
            fg: DEFAULT_FG,
            bg: DEFAULT_BG,
        }
    }
}

/// The terminal state machine.
///
/// Owns two grids (primary + alternate screen). The SGR state lives
/// here rather than on a grid so it survives buffer switches; the saved
/// cursor lives on each grid so it stays per-buffer.
#[derive(Debug)]
pub struct Term {
    /// Primary grid (feeds the scrollback ring).
    grid: Grid,
    /// Alternate grid (no scrollback by construction).
    alt_grid: Grid,
    /// Terminal mode flags.
    mode: TermMode,
    /// Colors for newly written cells.
    sgr: SgrState,
    /// Escape-sequence parser state (survives across byte batches).
    parser: Parser,
    /// Scrollback view offset in lines, always in `[-scrollback.len, 0]`.
    /// 0 shows the live grid; negative values reach into history.
    scroll_offset: isize,
}

impl Term {
    /// Create a terminal with the default scrollback capacity.
    pub fn new(lines: usize, cols: usize) -> Self {
        Self::with_scrollback(lines, cols, SCROLLBACK_SIZE)
    }

    /// Create a terminal with an explicit scrollback capacity.
    pub fn with_scrollback(lines: usize, cols: usize, scrollback: usize) -> Self {
        Self {
            grid: Grid::new(lines, cols, scrollback),
            alt_grid: Grid::new(lines, cols, 0),
            mode: TermMode::default(),
            sgr: SgrState::default(),
            parser: Parser::new(),
            scroll_offset: 0,
        }
    }

    /// Feed a batch of PTY bytes through the parser.
    ///
    /// A partial escape sequence at the end of the batch is preserved in
    /// the parser state and continued on the next call.
    pub fn process_bytes(&mut self, bytes: &[u8]) {
        let mut parser = mem::take(&mut self.parser);
        for &byte in bytes {
            parser.advance(self, byte);
        }
        self.parser = parser;
    }

    /// Reference to the active grid.
    pub fn grid(&self) -> &Grid {
        if self.mode.contains(TermMode::ALT_SCREEN) {
            &self.alt_grid
        } else {
            &self.grid
        }
    }

    /// Mutable reference to the active grid.
    pub fn grid_mut(&mut self) -> &mut Grid {
        if self.mode.contains(TermMode::ALT_SCREEN) {
            &mut self.alt_grid
        } else {
            &mut self.grid
        }
    }

    /// Reference to the primary grid regardless of the active screen.
    pub fn primary_grid(&self) -> &Grid {
        &self.grid
    }

    /// Current terminal mode flags.
    pub fn mode(&self) -> TermMode {
        self.mode
    }

    /// Current SGR colors.
    pub fn sgr(&self) -> SgrState {
        self.sgr
    }

    /// Whether any mouse reporting mode is active.
    pub fn mouse_enabled(&self) -> bool {
        self.mode.intersects(TermMode::ANY_MOUSE)
    }

    /// Whether drag motion should be reported (modes 1002/1003).
    pub fn mouse_reports_motion(&self) -> bool {
        self.mode
            .intersects(TermMode::MOUSE_DRAG | TermMode::MOUSE_MOTION)
    }

    /// Toggle the destructive-backspace knob.
    pub fn set_destructive_backspace(&mut self, enabled: bool) {
        self.mode.set(TermMode::DESTRUCTIVE_BACKSPACE, enabled);
    }

    /// Current scrollback view offset (`<= 0`).
    pub fn scroll_offset(&self) -> isize {
        self.scroll_offset
    }

    /// Adjust the scrollback view offset, clamped to
    /// `[-scrollback.len, 0]`.
    pub fn scroll_display(&mut self, delta: isize) {
        let max_back = self.grid.scrollback().len() as isize;
        self.scroll_offset = (self.scroll_offset + delta).clamp(-max_back, 0);
    }

    /// Resize both grids; no reflow.
    pub fn resize(&mut self, lines: usize, cols: usize) {
        self.grid.resize(lines, cols);
        self.alt_grid.resize(lines, cols);
    }

    // --- operations invoked by the parser ---

    /// Write a printable byte at the cursor with the current SGR colors.
    pub(crate) fn input(&mut self, ch: u8) {
        let SgrState { fg, bg } = self.sgr;
        let wrap = self.mode.contains(TermMode::LINE_WRAP);
        self.grid_mut().put_char(ch, fg, bg, wrap);
    }

    pub(crate) fn linefeed(&mut self) {
        self.grid_mut().linefeed();
    }

    pub(crate) fn carriage_return(&mut self) {
        self.grid_mut().carriage_return();
    }

    pub(crate) fn backspace(&mut self) {
        let destructive = self.mode.contains(TermMode::DESTRUCTIVE_BACKSPACE);
        self.grid_mut().backspace(destructive);
    }

    pub(crate) fn save_cursor(&mut self) {
        self.grid_mut().save_cursor();
    }

    pub(crate) fn restore_cursor(&mut self) {
        self.grid_mut().restore_cursor();
    }

    pub(crate) fn move_up(&mut self, count: usize) {
        self.grid_mut().move_up(count);
    }

    pub(crate) fn move_down(&mut self, count: usize) {
        self.grid_mut().move_down(count);
    }

    pub(crate) fn move_forward(&mut self, count: usize) {
        self.grid_mut().move_forward(count);
    }

    pub(crate) fn move_backward(&mut self, count: usize) {
        self.grid_mut().move_backward(count);
    }

    pub(crate) fn move_to(&mut self, line: usize, col: usize) {
        self.grid_mut().move_to(line, col);
    }

    pub(crate) fn clear_below(&mut self) {
        self.grid_mut().clear_below();
    }

    pub(crate) fn clear_above(&mut self) {
        self.grid_mut().clear_above();
    }

    /// `CSI 2 J`: clear the whole screen and home the cursor.
    pub(crate) fn clear_all_and_home(&mut self) {
        let grid = self.grid_mut();
        grid.clear_all();
        grid.cursor_mut().home();
    }

    pub(crate) fn clear_to_eol(&mut self) {
        self.grid_mut().clear_to_eol();
    }

    pub(crate) fn insert_blank(&mut self, count: usize) {
        self.grid_mut().insert_blank(count);
    }

    pub(crate) fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        self.grid_mut().set_scroll_region(top, bottom);
    }

    /// Apply one SGR code. Unknown codes are ignored.
    pub(crate) fn apply_sgr(&mut self, code: u16) {
        match code {
            0 => self.sgr = SgrState::default(),
            30..=37 => self.sgr.fg = (code - 30) as u8,
            40..=47 => self.sgr.bg = (code - 40) as u8,
            90..=97 => self.sgr.fg = (code - 90) as u8 + 8,
            100..=107 => self.sgr.bg = (code - 100) as u8 + 8,
            _ => {}
        }
    }

    /// Apply a DEC private mode set/reset. Unknown codes are ignored.
    pub(crate) fn set_private_mode(&mut self, code: u16, enabled: bool) {
        match code {
            1 => self.mode.set(TermMode::APP_CURSOR, enabled),
            7 => self.mode.set(TermMode::LINE_WRAP, enabled),
            25 => self.mode.set(TermMode::SHOW_CURSOR, enabled),
            1000 | 1002 | 1003 => {
                self.mode.remove(TermMode::ANY_MOUSE);
                if enabled {
                    let flag = match code {
                        1000 => TermMode::MOUSE_REPORT_CLICK,
                        1002 => TermMode::MOUSE_DRAG,
                        _ => TermMode::MOUSE_MOTION,
                    };
                    self.mode.insert(flag);
                }
            }
            1049 => {
                if enabled {
                    self.enter_alt_screen();
                } else {
                    self.leave_alt_screen();
                }
            }
            _ => {}
        }
    }

    /// Switch to the alternate screen, clearing it and homing its
    /// cursor. Applying this twice clears again but performs no second
    /// switch.
    fn enter_alt_screen(&mut self) {
        self.mode.insert(TermMode::ALT_SCREEN);
        self.alt_grid.clear_all();
        self.alt_grid.cursor_mut().home();
    }

    /// Switch back to the primary screen.
    ///
    /// The primary cursor is homed rather than restored to its
    /// pre-switch position (source behavior, kept deliberately).
    fn leave_alt_screen(&mut self) {
        self.mode.remove(TermMode::ALT_SCREEN);
        self.grid.cursor_mut().home();
    }
}
