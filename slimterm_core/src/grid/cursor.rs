//! Terminal cursor state.
//!
//! Tracks the current write position within the visible grid. The column
//! may transiently equal the grid width just before a wrap; every other
//! operation clamps it back into range.

use crate::index::{Column, Line};

/// Terminal cursor: line and column within the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Line index into visible rows (0-based).
    line: Line,
    /// Column index (0-based; may equal the grid width pre-wrap).
    col: Column,
}

impl Cursor {
    /// Create a cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current line.
    pub fn line(&self) -> Line {
        self.line
    }

    /// Current column.
    pub fn col(&self) -> Column {
        self.col
    }

    /// Set the cursor line.
    pub fn set_line(&mut self, line: Line) {
        self.line = line;
    }

    /// Set the cursor column.
    pub fn set_col(&mut self, col: Column) {
        self.col = col;
    }

    /// Move to the origin.
    pub fn home(&mut self) {
        self.line = Line(0);
        self.col = Column(0);
    }
}
