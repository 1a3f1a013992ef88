//! Engine construction parameters.
//!
//! Board dimensions, the spawn area, pixel mapping, and the animation ratio
//! templates all arrive here instead of living in module-level tables, so two
//! engines with different boards can coexist in one process.

use std::fmt;

use gridfall_types::{Cell, Vec2};

/// Configuration for one engine instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Visible playfield rows.
    pub rows: i16,
    /// Playfield columns.
    pub cols: i16,
    /// Hidden staging rows above the playfield. A stack that climbs into this
    /// band ends the game.
    pub spawn_rows: i16,
    /// Cell the rotation pivot of a freshly spawned shape is placed on,
    /// in full-grid coordinates (row 0 is the top staging row).
    pub spawn_anchor: Cell,
    /// Pixel size of one cell.
    pub cell_size: Vec2,
    /// Seed for shape choice, pre-rotations, and colors.
    pub seed: u32,
    /// Ratio template for horizontal moves. Empty means 1-step jumps.
    pub slide_ratios: Vec<f32>,
    /// Ratio template for vertical moves. Empty means 1-step jumps.
    pub fall_ratios: Vec<f32>,
}

impl Default for EngineConfig {
    /// The classic 15x9 board with 6 staging rows, 30px cells, and instant
    /// (non-animated) moves.
    fn default() -> Self {
        Self {
            rows: 15,
            cols: 9,
            spawn_rows: 6,
            spawn_anchor: Cell::new(2, 4),
            cell_size: (30.0, 30.0),
            seed: 1,
            slide_ratios: Vec::new(),
            fall_ratios: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Total grid rows: staging band plus visible playfield.
    pub fn total_rows(&self) -> i16 {
        self.rows + self.spawn_rows
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 1 || self.cols < 1 || self.spawn_rows < 1 {
            return Err(ConfigError::BadDimensions);
        }
        let anchor = self.spawn_anchor;
        if anchor.row < 0
            || anchor.row >= self.total_rows()
            || anchor.col < 0
            || anchor.col >= self.cols
        {
            return Err(ConfigError::AnchorOutOfBounds);
        }
        if self.cell_size.0 <= 0.0 || self.cell_size.1 <= 0.0 {
            return Err(ConfigError::BadCellSize);
        }
        Ok(())
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    BadDimensions,
    AnchorOutOfBounds,
    BadCellSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::BadDimensions => {
                "rows, cols, and spawn_rows must each be at least 1"
            }
            ConfigError::AnchorOutOfBounds => "spawn anchor lies outside the grid",
            ConfigError::BadCellSize => "cell size must be positive",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ConfigError {}
