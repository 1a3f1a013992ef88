//! One polyomino: footprint, pivot, colors, seams, and presentation.
//!
//! Grid-position data (`cells`, `pivot`) and presentation (`Sprite` plus its
//! animation channels) are separate owned fields; simulation code reads and
//! writes the former, the render loop consumes the latter.

use std::collections::HashSet;

use arrayvec::ArrayVec;
use gridfall_anim::{ChannelSet, Sprite};
use gridfall_grid::{cell_seams, flood_fill, rotate_cell, Seam};
use gridfall_types::{Cell, Color, Offset, Pivot, Vec2};

use crate::shapes::MAX_SHAPE_CELLS;

/// Footprint cell buffer; footprints never exceed the largest table entry.
pub type CellBuf = ArrayVec<Cell, MAX_SHAPE_CELLS>;

/// Pixel center of a (possibly fractional) cell-space position.
fn pivot_center(pivot: Pivot, cell_size: Vec2) -> Vec2 {
    (
        (pivot.1 + 0.5) * cell_size.0,
        (pivot.0 + 0.5) * cell_size.1,
    )
}

/// A rigid group of connected cells moving as one piece.
#[derive(Debug, Clone)]
pub struct Mino {
    cells: CellBuf,
    pivot: Pivot,
    body: Color,
    seam_color: Color,
    seams: Vec<Seam>,
    sprite: Sprite,
    channels: ChannelSet,
}

impl Mino {
    pub fn new(
        cells: CellBuf,
        pivot: Pivot,
        body: Color,
        seam_color: Color,
        cell_size: Vec2,
    ) -> Self {
        let seams = cell_seams(&cells, cell_size);
        let center = pivot_center(pivot, cell_size);
        let mut channels = ChannelSet::new();
        channels.register_position(center);
        Self {
            cells,
            pivot,
            body,
            seam_color,
            seams,
            sprite: Sprite::new(center, cell_size, body),
            channels,
        }
    }

    /// Number of cells in the footprint.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    pub fn color(&self) -> Color {
        self.body
    }

    pub fn seam_color(&self) -> Color {
        self.seam_color
    }

    /// Interior seam lines, recomputed on every committed move.
    pub fn seams(&self) -> &[Seam] {
        &self.seams
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut ChannelSet {
        &mut self.channels
    }

    /// Footprint translated by an offset. Pure; nothing is committed.
    pub fn moved_cells(&self, offset: Offset) -> CellBuf {
        self.cells.iter().map(|c| c.offset(offset)).collect()
    }

    /// Footprint rotated a quarter turn clockwise about the pivot. Pure.
    pub fn rotated_cells(&self) -> CellBuf {
        self.cells
            .iter()
            .map(|&c| rotate_cell(c, self.pivot, true))
            .collect()
    }

    /// Commit a validated footprint.
    ///
    /// The pivot follows the translation part of the move, seams are
    /// recomputed, and a position transition is queued on the sprite. A pure
    /// rotation (zero offset) leaves the pivot and position channel alone.
    pub fn commit(&mut self, cells: CellBuf, offset: Offset, cell_size: Vec2, ratios: &[f32]) {
        debug_assert_eq!(cells.len(), self.cells.len());
        self.cells = cells;
        if offset != (0, 0) {
            self.pivot = (
                self.pivot.0 + offset.0 as f32,
                self.pivot.1 + offset.1 as f32,
            );
            if let Some(position) = self.channels.position_mut() {
                position.seek(pivot_center(self.pivot, cell_size), ratios);
            }
        }
        self.seams = cell_seams(&self.cells, cell_size);
    }

    /// The connected footprints that survive deleting the given rows.
    ///
    /// Connectivity is re-derived from scratch; the result may be empty (the
    /// whole footprint sat in deleted rows), the original footprint, or
    /// several fragments.
    pub fn fragments(&self, rows: &HashSet<i16>) -> Vec<CellBuf> {
        let survivors: HashSet<Cell> = self
            .cells
            .iter()
            .copied()
            .filter(|cell| !rows.contains(&cell.row))
            .collect();
        flood_fill(&survivors)
            .into_iter()
            .map(|component| component.into_iter().collect())
            .collect()
    }

    /// Advance every animation channel one frame.
    pub fn animate(&mut self) {
        self.channels.tick(&mut self.sprite);
    }
}
