//! **maze-core**: foundational types for the maze workspace.
//!
//! This crate provides the grid topology the generator and the solvers work
//! on (geometry primitives, walled cells, a grid of optional cells) together
//! with the small Elm-architecture application loop used by the terminal
//! front-end: styled glyphs, a screen buffer with frame diffing, and input
//! messages.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod screen;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use cell::{Cell, Direction, Walls};
pub use geom::{Point, Range};
pub use grid::Grid;
pub use messages::*;
pub use screen::{AttrMask, Color, Glyph, Screen, Style};
