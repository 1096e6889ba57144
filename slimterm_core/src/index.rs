//! Type-safe index newtypes for grid coordinates.
//!
//! `Line` and `Column` prevent mixing up row/column values at compile
//! time. `Point` combines them into a grid coordinate. Both index the
//! visible grid only; the unified row-space used by the selection model
//! lives in [`crate::selection`].

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Generate arithmetic and conversion impls for a newtype index wrapper.
macro_rules! index_ops {
    ($ty:ident, $inner:ty) => {
        impl From<$inner> for $ty {
            fn from(val: $inner) -> Self {
                Self(val)
            }
        }

        impl From<$ty> for $inner {
            fn from(val: $ty) -> Self {
                val.0
            }
        }

        impl Add for $ty {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $ty {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

/// Line index into the visible grid (0 = top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Line(pub usize);

index_ops!(Line, usize);

/// Unsigned column index (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Column(pub usize);

index_ops!(Column, usize);

/// A grid coordinate combining a line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub line: Line,
    pub column: Column,
}

impl Point {
    /// Create a new point at the given line and column.
    pub fn new(line: Line, column: Column) -> Self {
        Self { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, Line, Point};

    #[test]
    fn line_arithmetic() {
        assert_eq!(Line(3) + Line(2), Line(5));
        assert_eq!(Line(3) - Line(2), Line(1));
    }

    #[test]
    fn column_conversions() {
        let col: Column = 7usize.into();
        assert_eq!(col, Column(7));
        let raw: usize = col.into();
        assert_eq!(raw, 7);
    }

    #[test]
    fn point_ordering_fields() {
        let p = Point::new(Line(2), Column(5));
        assert_eq!(p.line, Line(2));
        assert_eq!(p.column, Column(5));
    }
}
