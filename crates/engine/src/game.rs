//! The falling-shape simulation.
//!
//! Shapes live in one of three states: **controlled** (the single shape under
//! player input), **stable** (at rest, occupying grid cells), or **moving**
//! (fragments re-falling after a row clear). Only stable shapes are written
//! into the grid, so a vacancy check against the grid is the whole collision
//! test for anything in flight.
//!
//! The host drives the engine with discrete commands (horizontal shifts,
//! rotation, gravity ticks) and consumes queued [`Event`]s plus one
//! [`Engine::animate`] call per rendered frame. Every command runs to
//! completion synchronously; there is no in-flight state between calls.

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, info};

use gridfall_grid::{rotate_cell, Grid};
use gridfall_types::{scale, Cell, Color, Offset, ShapeId, DOWN, LEFT, RIGHT};

use crate::config::{ConfigError, EngineConfig};
use crate::mino::{CellBuf, Mino};
use crate::rng::SimpleRng;
use crate::shapes::ShapeTable;

/// Host-facing commands, one core operation each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// One gravity tick; both the fast-fall and slow-fall timers deliver this.
    StepDown,
    Rotate,
    Reset,
}

/// Notifications queued for the host, drained with [`Engine::take_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The score changed; carries the new total.
    ScoreChanged(u32),
    /// Rows were cleared, bottom-up order.
    RowsCleared(Vec<i16>),
    /// The stack climbed into the staging band.
    GameOver,
}

/// The polyomino game engine.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    grid: Grid<ShapeId>,
    minos: HashMap<ShapeId, Mino>,
    next_id: u32,
    control: Option<ShapeId>,
    stable: HashSet<ShapeId>,
    moving: HashSet<ShapeId>,
    score: u32,
    /// Highest (smallest-index) row any stable shape occupies.
    top_row: i16,
    /// Rows known full, pending the next clear.
    full_rows: HashSet<i16>,
    /// Deterministic spawn keys consumed before random selection resumes.
    routine: VecDeque<char>,
    table: ShapeTable,
    rng: SimpleRng,
    events: Vec<Event>,
}

impl Engine {
    /// Build an engine. The board starts empty with no controlled shape;
    /// call [`Engine::reset`] to deal the first one.
    pub fn new(config: EngineConfig, table: ShapeTable) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.total_rows(), config.cols);
        let top_row = grid.rows();
        let rng = SimpleRng::new(config.seed);
        Ok(Self {
            config,
            grid,
            minos: HashMap::new(),
            next_id: 0,
            control: None,
            stable: HashSet::new(),
            moving: HashSet::new(),
            score: 0,
            top_row,
            full_rows: HashSet::new(),
            routine: VecDeque::new(),
            table,
            rng,
            events: Vec::new(),
        })
    }

    // --- host surface -----------------------------------------------------

    /// Apply one command. The returned flag mirrors the underlying
    /// operation: a rejected move or rotation is a normal outcome, not an
    /// error.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.shift(LEFT),
            Command::MoveRight => self.shift(RIGHT),
            Command::StepDown => {
                self.step();
                true
            }
            Command::Rotate => self.rotate(),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Install the deterministic spawn key queue. Keys are consumed one per
    /// spawn; once exhausted, spawning falls back to random selection.
    pub fn set_routine(&mut self, keys: &str) {
        self.routine = keys.chars().collect();
    }

    /// Clear the board and deal a fresh controlled shape.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.minos.clear();
        self.stable.clear();
        self.moving.clear();
        self.control = None;
        self.score = 0;
        self.top_row = self.grid.rows();
        self.full_rows.clear();
        self.events.push(Event::ScoreChanged(0));
        self.spawn();
    }

    /// Swap between the tetromino and pentomino tables; takes effect from
    /// the next spawn. Returns the table now active.
    pub fn switch_table(&mut self) -> ShapeTable {
        self.table = self.table.other();
        self.table
    }

    /// Drain queued notifications.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Advance every shape's animation channels one frame.
    pub fn animate(&mut self) {
        for mino in self.minos.values_mut() {
            mino.animate();
        }
    }

    // --- queries ----------------------------------------------------------

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn top_row(&self) -> i16 {
        self.top_row
    }

    /// True once the stack has climbed into the staging band. Overflow is
    /// persistent: nothing short of a reset clears it.
    pub fn is_over(&self) -> bool {
        self.top_row < self.config.spawn_rows
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> ShapeTable {
        self.table
    }

    pub fn grid(&self) -> &Grid<ShapeId> {
        &self.grid
    }

    pub fn control(&self) -> Option<ShapeId> {
        self.control
    }

    pub fn stable_ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.stable.iter().copied()
    }

    pub fn moving_ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.moving.iter().copied()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Mino> {
        self.minos.get(&id)
    }

    pub fn is_stable(&self, id: ShapeId) -> bool {
        self.stable.contains(&id)
    }

    pub fn is_moving(&self, id: ShapeId) -> bool {
        self.moving.contains(&id)
    }

    /// Every live shape with its handle, in no particular order.
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Mino)> {
        self.minos.iter().map(|(&id, mino)| (id, mino))
    }

    /// True iff every cell of the row is occupied by a stable shape.
    pub fn row_is_full(&self, row: i16) -> bool {
        if row < 0 || row >= self.grid.rows() {
            return false;
        }
        self.grid.row_cells(row).all(|cell| self.grid.is_occupied(cell))
    }

    // --- commands ---------------------------------------------------------

    /// Deal a new controlled shape: next routine key (or random), 0-3 random
    /// pre-rotations, random pastel color, pivot on the spawn anchor.
    ///
    /// No vacancy check: a blocked spawn area surfaces as game over at the
    /// shape's first failed descent. No-op once the game is over.
    pub fn spawn(&mut self) {
        if self.is_over() {
            return;
        }
        let key = self.routine.pop_front();
        self.spawn_with(key);
    }

    /// [`Engine::spawn`] with an explicit key, bypassing the routine queue.
    pub fn spawn_with(&mut self, key: Option<char>) {
        if self.is_over() {
            debug!("spawn skipped: game over");
            return;
        }

        // A replaced controlled shape that never stabilized has no owner.
        if let Some(old) = self.control.take() {
            if !self.stable.contains(&old) && !self.moving.contains(&old) {
                self.minos.remove(&old);
            }
        }

        let spec = self.table.lookup(key, &mut self.rng);
        let mut cells: CellBuf = spec.cells.iter().map(|&(r, c)| Cell::new(r, c)).collect();
        for _ in 0..self.rng.next_range(4) {
            cells = cells
                .iter()
                .map(|&cell| rotate_cell(cell, spec.pivot, true))
                .collect();
        }
        let (body, seam_color) = Color::pastel_pair(
            self.rng.next_channel(),
            self.rng.next_channel(),
            self.rng.next_channel(),
        );

        let anchor = self.config.spawn_anchor;
        let offset: Offset = (
            (anchor.row as f32 - spec.pivot.0).round() as i16,
            (anchor.col as f32 - spec.pivot.1).round() as i16,
        );
        let cells: CellBuf = cells.iter().map(|&cell| cell.offset(offset)).collect();
        let pivot = (
            spec.pivot.0 + offset.0 as f32,
            spec.pivot.1 + offset.1 as f32,
        );

        let id = self.alloc_id();
        debug!("spawn shape {:?}: key '{}'", id, spec.key);
        self.minos.insert(
            id,
            Mino::new(cells, pivot, body, seam_color, self.config.cell_size),
        );
        self.control = Some(id);
    }

    /// Shift the controlled shape one cell sideways.
    pub fn shift(&mut self, direction: Offset) -> bool {
        debug_assert!(direction == LEFT || direction == RIGHT);
        match self.control {
            Some(id) => self.move_shape(id, direction),
            None => false,
        }
    }

    /// One gravity tick.
    ///
    /// While post-clear fragments are falling they get the tick and the
    /// controlled shape waits. Otherwise the controlled shape descends; when
    /// it cannot, it stabilizes, full rows clear, and the next shape spawns.
    pub fn step(&mut self) {
        self.fall(DOWN);
    }

    fn fall(&mut self, offset: Offset) {
        if !self.moving.is_empty() {
            if !self.advance_moving(offset) {
                self.clear_full_rows();
            }
        } else if let Some(id) = self.control {
            if !self.move_shape(id, offset) {
                self.control = None;
                self.stabilize(id);
                self.clear_full_rows();
                self.spawn();
            }
        }
    }

    /// The sole collision primitive: translate a shape if every target cell
    /// is in bounds and empty (or occupied by this same shape). On failure
    /// the shape is untouched.
    pub fn move_shape(&mut self, id: ShapeId, offset: Offset) -> bool {
        let Some(mino) = self.minos.get(&id) else {
            return false;
        };
        let cells = mino.moved_cells(offset);
        if !self.vacant_for(id, &cells) {
            return false;
        }
        self.commit_cells(id, cells, offset);
        true
    }

    /// Rotate the controlled shape a quarter turn clockwise, kicking off
    /// walls if the in-place rotation is blocked.
    ///
    /// The kick search widens one column at a time, trying left before right
    /// at each magnitude, up to half the shape's cell count (exclusive). The
    /// first vacant candidate commits; if none is, the shape is unchanged.
    pub fn rotate(&mut self) -> bool {
        let Some(id) = self.control else {
            return false;
        };
        let Some(mino) = self.minos.get(&id) else {
            return false;
        };
        let rotated = mino.rotated_cells();
        if self.vacant_for(id, &rotated) {
            self.commit_cells(id, rotated, (0, 0));
            return true;
        }

        let half = (rotated.len() + 1) / 2;
        for magnitude in 1..half as i16 {
            for direction in [LEFT, RIGHT] {
                let offset = scale(direction, magnitude);
                let candidate: CellBuf =
                    rotated.iter().map(|&cell| cell.offset(offset)).collect();
                if self.vacant_for(id, &candidate) {
                    self.commit_cells(id, candidate, offset);
                    return true;
                }
            }
        }
        false
    }

    /// Clear every pending full row.
    ///
    /// Shapes touching a full row are re-derived: the full rows leave their
    /// footprints and the connected remainders come back as fresh moving
    /// shapes. Everything stable that was resting above the cleared band is
    /// demoted to moving and its rows emptied; those shapes fall through the
    /// gap on subsequent gravity ticks.
    pub fn clear_full_rows(&mut self) {
        if self.full_rows.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.full_rows);
        self.fragment_shapes(&rows);

        let Some(bottom) = rows.iter().copied().max() else {
            return;
        };
        let band: Vec<i16> = (self.top_row..bottom).collect();
        for id in self.shapes_in_rows(band.iter().copied()) {
            self.stable.remove(&id);
            self.moving.insert(id);
        }
        for &row in &band {
            let cells: Vec<Cell> = self.grid.row_cells(row).collect();
            for cell in cells {
                self.grid.take(cell);
            }
        }

        self.top_row = bottom + 1;
        self.score += rows.len() as u32;
        info!("cleared {} rows, score {}", rows.len(), self.score);

        let mut sorted: Vec<i16> = rows.into_iter().collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        self.events.push(Event::RowsCleared(sorted));
        self.events.push(Event::ScoreChanged(self.score));
    }

    // --- internals --------------------------------------------------------

    fn alloc_id(&mut self) -> ShapeId {
        let id = ShapeId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// True if every cell is in bounds and empty or owned by `id` itself.
    fn vacant_for(&self, id: ShapeId, cells: &[Cell]) -> bool {
        cells.iter().all(|&cell| match self.grid.get(cell) {
            Some(None) => true,
            Some(Some(occupant)) => occupant == id,
            None => false,
        })
    }

    /// Commit a validated footprint, keeping grid cells in sync for shapes
    /// that currently occupy them.
    fn commit_cells(&mut self, id: ShapeId, cells: CellBuf, offset: Offset) {
        if self.stable.contains(&id) {
            let old: CellBuf = self.minos[&id].cells().iter().copied().collect();
            for &cell in &old {
                self.grid.take(cell);
            }
            for &cell in &cells {
                self.grid.set(cell, id);
            }
        }
        let cell_size = self.config.cell_size;
        let ratios: &[f32] = if offset.0 != 0 {
            &self.config.fall_ratios
        } else {
            &self.config.slide_ratios
        };
        if let Some(mino) = self.minos.get_mut(&id) {
            mino.commit(cells, offset, cell_size, ratios);
        }
    }

    /// Advance the moving set by one offset. Returns false once the set has
    /// drained (everything landed), which is the caller's cue to clear rows.
    ///
    /// Promotion runs as repeated scan/apply passes rather than mutating the
    /// set mid-iteration: each pass collects the shapes that can no longer
    /// advance, stabilizes them, and rescans, because a landed fragment can
    /// newly support another. Each promotion is immediately visible to the
    /// vacancy checks of the same tick.
    fn advance_moving(&mut self, offset: Offset) -> bool {
        loop {
            let landed: Vec<ShapeId> = self
                .moving
                .iter()
                .copied()
                .filter(|&id| !self.vacant_for(id, &self.minos[&id].moved_cells(offset)))
                .collect();
            if landed.is_empty() {
                break;
            }
            for id in landed {
                self.moving.remove(&id);
                self.stabilize(id);
            }
        }

        if self.moving.is_empty() {
            return false;
        }
        let movers: Vec<ShapeId> = self.moving.iter().copied().collect();
        for id in movers {
            self.move_shape(id, offset);
        }
        true
    }

    /// Write a shape into the grid and update row bookkeeping.
    fn stabilize(&mut self, id: ShapeId) {
        let was_over = self.is_over();
        self.stable.insert(id);
        let cells: CellBuf = self.minos[&id].cells().iter().copied().collect();
        for &cell in &cells {
            self.grid.set(cell, id);
            if cell.row < self.top_row {
                self.top_row = cell.row;
            }
            if self.row_is_full(cell.row) {
                self.full_rows.insert(cell.row);
            }
        }
        debug!("shape {:?} stabilized, top row {}", id, self.top_row);

        if !was_over && self.is_over() {
            info!("stack reached the staging band: game over");
            self.events.push(Event::GameOver);
        }
    }

    /// Remove every shape touching the given rows and respawn its connected
    /// remainders as moving fragments inheriting pivot and colors.
    fn fragment_shapes(&mut self, rows: &HashSet<i16>) {
        for id in self.shapes_in_rows(rows.iter().copied()) {
            let Some(mino) = self.minos.remove(&id) else {
                continue;
            };
            for &cell in mino.cells() {
                self.grid.take(cell);
            }
            self.stable.remove(&id);

            for fragment in mino.fragments(rows) {
                let frag_id = self.alloc_id();
                self.minos.insert(
                    frag_id,
                    Mino::new(
                        fragment,
                        mino.pivot(),
                        mino.color(),
                        mino.seam_color(),
                        self.config.cell_size,
                    ),
                );
                self.moving.insert(frag_id);
            }
            debug!("shape {:?} fragmented", id);
        }
    }

    /// Stable shapes occupying any of the given rows.
    fn shapes_in_rows(&self, rows: impl Iterator<Item = i16>) -> HashSet<ShapeId> {
        let mut found = HashSet::new();
        for row in rows {
            for cell in self.grid.row_cells(row) {
                if let Some(Some(id)) = self.grid.get(cell) {
                    found.insert(id);
                }
            }
        }
        found
    }

    // --- test scaffolding -------------------------------------------------

    #[cfg(test)]
    fn install(&mut self, cells: &[Cell], pivot: gridfall_types::Pivot) -> ShapeId {
        let id = self.alloc_id();
        let (body, seam_color) = Color::pastel_pair(90, 90, 90);
        let buf: CellBuf = cells.iter().copied().collect();
        self.minos.insert(
            id,
            Mino::new(buf, pivot, body, seam_color, self.config.cell_size),
        );
        id
    }

    /// Install a shape as the controlled one, bypassing spawn randomness.
    #[cfg(test)]
    fn install_control(&mut self, cells: &[Cell], pivot: gridfall_types::Pivot) -> ShapeId {
        let id = self.install(cells, pivot);
        self.control = Some(id);
        id
    }

    /// Install a shape directly into the moving set.
    #[cfg(test)]
    fn install_moving(&mut self, cells: &[Cell], pivot: gridfall_types::Pivot) -> ShapeId {
        let id = self.install(cells, pivot);
        self.moving.insert(id);
        id
    }

    /// Install a shape and stabilize it as an obstacle.
    #[cfg(test)]
    fn install_stable(&mut self, cells: &[Cell], pivot: gridfall_types::Pivot) -> ShapeId {
        let id = self.install(cells, pivot);
        self.stabilize(id);
        id
    }
}
