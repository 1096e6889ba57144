//! Cursor movement operations.
//!
//! Linefeed, carriage return, backspace, and the CSI cursor-motion
//! family. All movement is clamped to grid bounds; linefeed scrolls the
//! scroll region when the cursor runs off its bottom.

use crate::cell::Cell;
use crate::color::{DEFAULT_BG, DEFAULT_FG};
use crate::index::{Column, Line};

use super::Grid;

impl Grid {
    /// LF: reset the column and move down one line, scrolling the region
    /// up when the cursor passes its bottom.
    pub fn linefeed(&mut self) {
        self.cursor.set_col(Column(0));
        let next = self.cursor.line().0 + 1;
        let bottom = self.scroll_region.end - 1;
        if next > bottom {
            self.scroll_up();
            self.cursor.set_line(Line(bottom));
        } else {
            self.cursor.set_line(Line(next));
        }
    }

    /// CR: move the cursor to column 0.
    pub fn carriage_return(&mut self) {
        self.cursor.set_col(Column(0));
    }

    /// BS: move the cursor left one column.
    ///
    /// When `destructive` is set the vacated cell is overwritten with a
    /// space in default colors (the source terminal's behavior). At
    /// column 0 this is a no-op.
    pub fn backspace(&mut self, destructive: bool) {
        let col = self.cursor.col().0;
        if col == 0 {
            return;
        }
        let col = col - 1;
        self.cursor.set_col(Column(col));
        if destructive {
            let line = self.cursor.line();
            self[line][Column(col)] = Cell::new(b' ', DEFAULT_FG, DEFAULT_BG);
        }
    }

    /// CUU: move the cursor up `count` lines, clamped at line 0.
    pub fn move_up(&mut self, count: usize) {
        let line = self.cursor.line().0;
        self.cursor.set_line(Line(line.saturating_sub(count)));
    }

    /// CUD: move the cursor down `count` lines, clamped at the last line.
    pub fn move_down(&mut self, count: usize) {
        let line = self.cursor.line().0;
        self.cursor.set_line(Line((line + count).min(self.lines - 1)));
    }

    /// CUF: move the cursor right `count` columns, clamped at the last
    /// column.
    pub fn move_forward(&mut self, count: usize) {
        let col = self.cursor.col().0;
        self.cursor.set_col(Column((col + count).min(self.cols - 1)));
    }

    /// CUB: move the cursor left `count` columns, clamped at column 0.
    pub fn move_backward(&mut self, count: usize) {
        let col = self.cursor.col().0.min(self.cols - 1);
        self.cursor.set_col(Column(col.saturating_sub(count)));
    }

    /// CUP: set the cursor to absolute `(line, col)`, clamped to the grid.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.cursor.set_line(Line(line.min(self.lines - 1)));
        self.cursor.set_col(Column(col.min(self.cols - 1)));
    }
}

#[cfg(test)]
mod tests {
    use crate::color::{DEFAULT_BG, DEFAULT_FG};
    use crate::grid::Grid;
    use crate::index::{Column, Line};

    #[test]
    fn linefeed_resets_column_and_advances_line() {
        let mut grid = Grid::new(5, 10, 0);
        grid.cursor_mut().set_col(Column(4));
        grid.linefeed();
        assert_eq!(grid.cursor().line(), Line(1));
        assert_eq!(grid.cursor().col(), Column(0));
    }

    #[test]
    fn linefeed_at_region_bottom_scrolls() {
        let mut grid = Grid::new(5, 10, 100);
        grid.put_char(b'A', DEFAULT_FG, DEFAULT_BG, true);
        grid.cursor_mut().set_line(Line(4));
        grid.linefeed();
        // Cursor stays on the bottom line; row 0 retired to scrollback.
        assert_eq!(grid.cursor().line(), Line(4));
        assert_eq!(grid.scrollback().len(), 1);
        assert_eq!(grid.scrollback().at(0).unwrap()[Column(0)].ch, b'A');
    }

    #[test]
    fn backspace_destructive_erases_cell() {
        let mut grid = Grid::new(5, 10, 0);
        grid.put_char(b'A', 2, 3, true);
        grid.backspace(true);
        assert_eq!(grid.cursor().col(), Column(0));
        let cell = &grid[Line(0)][Column(0)];
        assert_eq!(cell.ch, b' ');
        assert_eq!(cell.fg, DEFAULT_FG);
        assert_eq!(cell.bg, DEFAULT_BG);
    }

    #[test]
    fn backspace_non_destructive_preserves_cell() {
        let mut grid = Grid::new(5, 10, 0);
        grid.put_char(b'A', DEFAULT_FG, DEFAULT_BG, true);
        grid.backspace(false);
        assert_eq!(grid.cursor().col(), Column(0));
        assert_eq!(grid[Line(0)][Column(0)].ch, b'A');
    }

    #[test]
    fn backspace_at_column_zero_is_noop() {
        let mut grid = Grid::new(5, 10, 0);
        grid.backspace(true);
        assert_eq!(grid.cursor().col(), Column(0));
        assert!(grid[Line(0)][Column(0)].is_empty());
    }

    #[test]
    fn move_up_clamps_at_top() {
        let mut grid = Grid::new(5, 10, 0);
        grid.cursor_mut().set_line(Line(2));
        grid.move_up(999);
        assert_eq!(grid.cursor().line(), Line(0));
    }

    #[test]
    fn move_down_clamps_at_bottom() {
        let mut grid = Grid::new(5, 10, 0);
        grid.move_down(999);
        assert_eq!(grid.cursor().line(), Line(4));
    }

    #[test]
    fn move_forward_clamps_at_last_column() {
        let mut grid = Grid::new(5, 10, 0);
        grid.move_forward(999);
        assert_eq!(grid.cursor().col(), Column(9));
    }

    #[test]
    fn move_backward_clamps_at_zero() {
        let mut grid = Grid::new(5, 10, 0);
        grid.cursor_mut().set_col(Column(3));
        grid.move_backward(999);
        assert_eq!(grid.cursor().col(), Column(0));
    }

    #[test]
    fn move_to_clamps_both_axes() {
        let mut grid = Grid::new(5, 10, 0);
        grid.move_to(100, 100);
        assert_eq!(grid.cursor().line(), Line(4));
        assert_eq!(grid.cursor().col(), Column(9));
    }
}
