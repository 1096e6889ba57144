//! Selection model.
//!
//! A selection is a pair of endpoints in the unified row-space (see
//! [`crate::view`]): the anchor where the gesture started and the focus
//! that tracks the pointer. Materializing walks the covered rows —
//! scrollback and live grid alike — and emits their printable bytes.

use crate::term::Term;

/// A selection endpoint in unified row-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPoint {
    pub row: usize,
    pub col: usize,
}

impl SelectionPoint {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// An in-progress or completed selection.
///
/// After [`end`](Selection::end) the selection stays queryable until
/// the next [`begin`](Selection::begin) or an explicit
/// [`clear`](Selection::clear).
#[derive(Debug, Clone, Default)]
pub struct Selection {
    anchor: Option<SelectionPoint>,
    focus: Option<SelectionPoint>,
    active: bool,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection at the given point.
    pub fn begin(&mut self, row: usize, col: usize) {
        let point = SelectionPoint::new(row, col);
        self.anchor = Some(point);
        self.focus = Some(point);
        self.active = true;
    }

    /// Move the focus endpoint while the gesture is in progress.
    pub fn extend(&mut self, row: usize, col: usize) {
        if self.active {
            self.focus = Some(SelectionPoint::new(row, col));
        }
    }

    /// Finish the gesture; the selection remains queryable.
    pub fn end(&mut self) {
        self.active = false;
    }

    /// Drop the selection entirely.
    pub fn clear(&mut self) {
        self.anchor = None;
        self.focus = None;
        self.active = false;
    }

    /// Whether a gesture is currently in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether both endpoints exist.
    pub fn is_some(&self) -> bool {
        self.anchor.is_some() && self.focus.is_some()
    }

    /// The selection bounds as `(start, end)` ordered by row.
    ///
    /// The start column belongs to the earlier-row endpoint and the end
    /// column to the later-row endpoint — not simply the min/max of the
    /// columns. Endpoints on the same row order by column.
    pub fn bounds(&self) -> Option<(SelectionPoint, SelectionPoint)> {
        let (anchor, focus) = (self.anchor?, self.focus?);
        if anchor.row < focus.row || (anchor.row == focus.row && anchor.col <= focus.col) {
            Some((anchor, focus))
        } else {
            Some((focus, anchor))
        }
    }

    /// Whether the given unified cell falls inside the selection.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        let Some((start, end)) = self.bounds() else {
            return false;
        };
        if row < start.row || row > end.row {
            return false;
        }
        if row == start.row && row == end.row {
            col >= start.col && col <= end.col
        } else if row == start.row {
            col >= start.col
        } else if row == end.row {
            col <= end.col
        } else {
            true
        }
    }

    /// Extract the selected text from the terminal.
    ///
    /// Walks rows from the earlier endpoint to the later one, resolving
    /// each from scrollback or the live grid, and emits the non-blank
    /// cell bytes with a newline between rows. Returns `None` when
    /// there is no selection.
    pub fn materialize(&self, term: &Term) -> Option<Vec<u8>> {
        let (start, end) = self.bounds()?;
        let last_col = term.grid().cols() - 1;
        let mut out = Vec::new();

        for row in start.row..=end.row {
            let Some(cells) = term.row_at(row) else {
                // Past the bottom of the live grid.
                break;
            };

            let col_start = if row == start.row { start.col } else { 0 };
            let col_end = if row == end.row { end.col } else { last_col };
            for col in col_start..=col_end.min(cells.cols() - 1) {
                let ch = cells.cells()[col].ch;
                if ch != 0 {
                    out.push(ch);
                }
            }
            if row < end.row {
                out.push(b'\n');
            }
        }

        Some(out)
    }
}
