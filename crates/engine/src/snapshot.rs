//! Serializable observation of an engine.
//!
//! A snapshot is a flat, host-friendly view: primitive fields only, shapes
//! sorted by handle, cells sorted row-major. Serialize it for debug dumps,
//! golden tests, or an out-of-process observer.

use serde::Serialize;

use crate::game::Engine;

/// Lifecycle state of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeState {
    Control,
    Stable,
    Moving,
}

/// One shape's observable state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSnapshot {
    pub id: u32,
    pub state: ShapeState,
    /// Footprint as `(row, col)` pairs, sorted.
    pub cells: Vec<(i16, i16)>,
    pub color: String,
    pub seam_color: String,
    /// Animation-derived pixel center for the current frame.
    pub center: (f32, f32),
    pub size: (f32, f32),
    pub angle: f32,
}

/// Whole-engine observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub rows: i16,
    pub cols: i16,
    pub spawn_rows: i16,
    pub score: u32,
    pub top_row: i16,
    pub game_over: bool,
    pub shapes: Vec<ShapeSnapshot>,
}

impl Engine {
    pub fn snapshot(&self) -> EngineSnapshot {
        let mut shapes: Vec<ShapeSnapshot> = self
            .shapes()
            .map(|(id, mino)| {
                let state = if self.control() == Some(id) {
                    ShapeState::Control
                } else if self.is_stable(id) {
                    ShapeState::Stable
                } else {
                    ShapeState::Moving
                };
                let mut cells: Vec<(i16, i16)> =
                    mino.cells().iter().map(|c| (c.row, c.col)).collect();
                cells.sort_unstable();
                let sprite = mino.sprite();
                ShapeSnapshot {
                    id: id.raw(),
                    state,
                    cells,
                    color: mino.color().to_css(),
                    seam_color: mino.seam_color().to_css(),
                    center: sprite.center,
                    size: sprite.size,
                    angle: sprite.angle,
                }
            })
            .collect();
        shapes.sort_by_key(|s| s.id);

        EngineSnapshot {
            rows: self.config().rows,
            cols: self.config().cols,
            spawn_rows: self.config().spawn_rows,
            score: self.score(),
            top_row: self.top_row(),
            game_over: self.is_over(),
            shapes,
        }
    }
}
