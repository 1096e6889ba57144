//! Display backend contract.
//!
//! The display is an external collaborator: it owns the window, font
//! rasterization, and the clipboard, and it delivers events through the
//! app channel. The engine only ever sees cell coordinates; pixel
//! positions are converted here, at the boundary, using the font
//! metrics.

use slimterm_core::{Cell, Palette, Rgb, Selection, Term};

use crate::input::{KeyPress, MouseButton};

/// Events delivered by the display backend.
#[derive(Debug, Clone)]
pub enum DisplayEvent {
    /// The window contents need repainting.
    Expose,
    /// The window geometry changed.
    Resize { width_px: i32, height_px: i32 },
    /// A key was pressed.
    KeyPress(KeyPress),
    /// A mouse button was pressed or released.
    MouseButton {
        button: MouseButton,
        x_px: i32,
        y_px: i32,
        pressed: bool,
    },
    /// The pointer moved.
    MouseMotion { x_px: i32, y_px: i32 },
    /// The clipboard answered a paste request.
    SelectionNotify { bytes: Vec<u8> },
    /// The display connection is gone; tear down.
    Closed,
}

/// Font and border geometry, fixed for the lifetime of the display.
#[derive(Debug, Clone, Copy)]
pub struct Metrics {
    pub border: i32,
    pub font_width: i32,
    pub font_height: i32,
}

impl Metrics {
    /// Map a pixel position to a (screen row, column) cell, clamped at
    /// the origin.
    pub fn cell_at(&self, x_px: i32, y_px: i32) -> (usize, usize) {
        let col = (x_px - self.border).max(0) / self.font_width;
        let row = (y_px - self.border).max(0) / self.font_height;
        (row as usize, col as usize)
    }

    /// Compute the grid size that fits a window of the given pixel
    /// dimensions, never smaller than one cell.
    pub fn grid_size(&self, width_px: i32, height_px: i32) -> (usize, usize) {
        let cols = (width_px - 2 * self.border) / self.font_width;
        let rows = (height_px - 2 * self.border) / self.font_height;
        (rows.max(1) as usize, cols.max(1) as usize)
    }
}

/// Palette indices painted over selected cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionColors {
    pub fg: u8,
    pub bg: u8,
}

/// Everything the backend needs to paint one frame.
///
/// `term` resolves both scrollback and live rows through the unified
/// row-space; `selection` says which cells to paint with
/// `selection_colors` instead of their own attributes; `palette`
/// resolves color indices per paint.
pub struct Frame<'a> {
    pub term: &'a Term,
    pub selection: &'a Selection,
    pub palette: &'a Palette,
    pub selection_colors: SelectionColors,
}

impl Frame<'_> {
    /// Resolve the paint colors for one cell, substituting the
    /// selection colors when the cell (in unified row coordinates) is
    /// selected.
    pub fn cell_colors(&self, row: usize, col: usize, cell: &Cell) -> (Rgb, Rgb) {
        if self.selection.contains(row, col) {
            (
                self.palette.resolve(self.selection_colors.fg),
                self.palette.resolve(self.selection_colors.bg),
            )
        } else {
            (self.palette.resolve(cell.fg), self.palette.resolve(cell.bg))
        }
    }
}

/// The rendering and clipboard surface of the display backend.
pub trait Display {
    /// Font and border geometry.
    fn metrics(&self) -> Metrics;

    /// Paint the current terminal state.
    fn draw(&mut self, frame: Frame<'_>);

    /// Publish bytes as the clipboard selection.
    fn set_clipboard(&mut self, bytes: Vec<u8>);

    /// Ask for the clipboard contents; the backend answers with a
    /// `SelectionNotify` event.
    fn request_clipboard(&mut self);
}

/// Display stub for running without a window system: no events, no
/// painting. The PTY relay in `main` still makes the binary usable as a
/// headless host.
pub struct HeadlessDisplay {
    metrics: Metrics,
}

impl HeadlessDisplay {
    pub fn new(border: i32) -> Self {
        Self {
            metrics: Metrics {
                border,
                // Nominal cell size; only used for pixel conversions,
                // which never happen without a window.
                font_width: 8,
                font_height: 16,
            },
        }
    }
}

impl Display for HeadlessDisplay {
    fn metrics(&self) -> Metrics {
        self.metrics
    }

    fn draw(&mut self, _frame: Frame<'_>) {}

    fn set_clipboard(&mut self, _bytes: Vec<u8>) {}

    fn request_clipboard(&mut self) {}
}
