//! Grid substrate shared by the gridfall games.
//!
//! - [`grid`]: fixed-size 2D occupant storage with bounds-guarded access
//! - [`geometry`]: pure cell-space and pixel-space helpers (rotation,
//!   adjacency, connectivity, seam lines)
//!
//! The grid is generic over its occupant so each game can store whatever it
//! tracks per cell (a shape handle, a tile value, a letter owner) on the same
//! substrate.

pub mod geometry;
pub mod grid;

pub use geometry::{
    cell_center, cell_corner, cell_rect, cell_seams, flood_fill, neighbors4, rotate_cell, seam,
    Seam,
};
pub use grid::Grid;
