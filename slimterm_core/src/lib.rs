//! Core terminal emulation data structures and logic.
//!
//! This crate provides the terminal state engine: cell and grid storage,
//! the scrollback ring, the escape-sequence parser, and the selection
//! model. It contains no GUI, PTY, or platform-specific code — tests
//! construct a [`Term`], feed it bytes, and inspect the grid.

#![deny(unsafe_code)]

pub mod cell;
pub mod color;
pub mod grid;
pub mod index;
pub mod parser;
pub mod selection;
pub mod term;
pub mod view;

pub use cell::Cell;
pub use color::{Palette, Rgb};
pub use grid::{Cursor, Grid, Row, Scrollback};
pub use index::{Column, Line, Point};
pub use selection::{Selection, SelectionPoint};
pub use term::{SgrState, Term, TermMode};
