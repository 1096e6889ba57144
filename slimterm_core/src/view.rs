//! Unified row-space resolution for the display boundary.
//!
//! Rows `0..scrollback.len` address scrollback history (oldest first);
//! rows `scrollback.len..scrollback.len + lines` address the live grid
//! of the active screen. The selection model and the renderer both work
//! in this space; pixel coordinates are converted into it exactly once,
//! at the display boundary.

use crate::grid::Row;
use crate::index::Line;
use crate::term::Term;

impl Term {
    /// Total number of addressable rows: scrollback plus the live grid.
    pub fn total_rows(&self) -> usize {
        self.primary_grid().scrollback().len() + self.grid().lines()
    }

    /// Resolve a unified row index to its cells.
    ///
    /// Returns `None` past the end of the live grid.
    pub fn row_at(&self, unified: usize) -> Option<&Row> {
        let scrollback = self.primary_grid().scrollback();
        if unified < scrollback.len() {
            return scrollback.at(unified);
        }
        let line = unified - scrollback.len();
        if line < self.grid().lines() {
            Some(&self.grid()[Line(line)])
        } else {
            None
        }
    }

    /// Convert a screen row to a unified row under the current scroll
    /// offset.
    pub fn screen_to_unified(&self, screen_row: usize) -> usize {
        let base = self.primary_grid().scrollback().len() as isize + self.scroll_offset();
        (screen_row as isize + base).max(0) as usize
    }

    /// The row shown on the given screen line under the current scroll
    /// offset.
    pub fn visible_row(&self, screen_row: usize) -> Option<&Row> {
        self.row_at(self.screen_to_unified(screen_row))
    }
}

#[cfg(test)]
mod tests {
    use crate::index::Column;
    use crate::term::Term;

    /// A 2-line, 4-column terminal with a few retired lines.
    fn scrolled_term() -> Term {
        let mut term = Term::with_scrollback(2, 4, 100);
        // Retires "a", "b", "c"; leaves "d" and "e" live.
        term.process_bytes(b"a\nb\nc\nd\ne");
        term
    }

    #[test]
    fn unified_space_covers_scrollback_then_live() {
        let term = scrolled_term();
        assert_eq!(term.primary_grid().scrollback().len(), 3);
        assert_eq!(term.total_rows(), 5);
        assert_eq!(term.row_at(0).unwrap()[Column(0)].ch, b'a');
        assert_eq!(term.row_at(2).unwrap()[Column(0)].ch, b'c');
        assert_eq!(term.row_at(3).unwrap()[Column(0)].ch, b'd');
        assert_eq!(term.row_at(4).unwrap()[Column(0)].ch, b'e');
        assert!(term.row_at(5).is_none());
    }

    #[test]
    fn visible_rows_track_scroll_offset() {
        let mut term = scrolled_term();
        // At offset 0 the screen shows the live grid.
        assert_eq!(term.visible_row(0).unwrap()[Column(0)].ch, b'd');
        assert_eq!(term.visible_row(1).unwrap()[Column(0)].ch, b'e');

        term.scroll_display(-2);
        assert_eq!(term.visible_row(0).unwrap()[Column(0)].ch, b'b');
        assert_eq!(term.visible_row(1).unwrap()[Column(0)].ch, b'c');

        term.scroll_display(-999);
        assert_eq!(term.visible_row(0).unwrap()[Column(0)].ch, b'a');
    }

    #[test]
    fn screen_to_unified_is_clamped_at_zero() {
        let mut term = scrolled_term();
        term.scroll_display(-999);
        assert_eq!(term.screen_to_unified(0), 0);
    }

    #[test]
    fn live_rows_come_from_active_screen() {
        let mut term = scrolled_term();
        term.process_bytes(b"\x1b[?1049hZ");
        // Scrollback rows are untouched; live rows resolve to the
        // alternate screen while it is active.
        assert_eq!(term.row_at(0).unwrap()[Column(0)].ch, b'a');
        assert_eq!(term.row_at(3).unwrap()[Column(0)].ch, b'Z');
    }
}
