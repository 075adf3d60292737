//! **pathgrid-core**: the grid model behind the pathgrid shortest-path finder.
//!
//! This crate provides the types every other pathgrid crate builds on:
//! [`Point`] coordinates, [`Cell`]s with their [`CellState`], and the square
//! [`Grid`] arena with its neighbour rule and click-driven editing.

pub mod cell;
mod editor;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellState};
pub use error::GridError;
pub use geom::{Point, Points};
pub use grid::Grid;
