//! Pure cell-space and pixel-space geometry.
//!
//! Pixel mapping places cell `(row, col)` at `(col * w, row * h)` with the
//! y axis growing downward, matching canvas conventions.

use std::collections::{HashSet, VecDeque};

use gridfall_types::{Cell, Pivot, Vec2, DOWN, LEFT, RIGHT, UP};

/// A short line segment in pixel space.
pub type Seam = (Vec2, Vec2);

/// Upper-left pixel corner of a cell.
pub fn cell_corner(cell: Cell, cell_size: Vec2) -> Vec2 {
    (cell.col as f32 * cell_size.0, cell.row as f32 * cell_size.1)
}

/// Pixel center of a cell.
pub fn cell_center(cell: Cell, cell_size: Vec2) -> Vec2 {
    let (x, y) = cell_corner(cell, cell_size);
    (x + cell_size.0 / 2.0, y + cell_size.1 / 2.0)
}

/// Pixel-space rectangle of a cell, corners clockwise from the upper left.
pub fn cell_rect(cell: Cell, cell_size: Vec2) -> [Vec2; 4] {
    let (x, y) = cell_corner(cell, cell_size);
    [
        (x, y),
        (x + cell_size.0, y),
        (x + cell_size.0, y + cell_size.1),
        (x, y + cell_size.1),
    ]
}

/// The four axis-aligned neighbor candidates of a cell.
///
/// Candidates are raw: cells outside any particular grid are included, and it
/// is the caller's job to validate them.
pub fn neighbors4(cell: Cell) -> [Cell; 4] {
    [
        cell.offset(UP),
        cell.offset(DOWN),
        cell.offset(LEFT),
        cell.offset(RIGHT),
    ]
}

/// Rotate a cell a quarter turn about a pivot and round to the nearest cell.
///
/// The quarter turn is computed directly (`cw: (dr, dc) -> (dc, -dr)`) rather
/// than through trigonometry, so results are exact for integer and
/// half-integer pivots and repeated rotations cannot drift: every call starts
/// from integer cell coordinates.
pub fn rotate_cell(cell: Cell, pivot: Pivot, clockwise: bool) -> Cell {
    let dr = cell.row as f32 - pivot.0;
    let dc = cell.col as f32 - pivot.1;
    let (row, col) = if clockwise {
        (pivot.0 + dc, pivot.1 - dr)
    } else {
        (pivot.0 - dc, pivot.1 + dr)
    };
    Cell::new(row.round() as i16, col.round() as i16)
}

/// Partition a cell set into maximal 4-connected components.
///
/// Breadth-first: pop an unvisited cell, flood through 4-neighbors restricted
/// to the input set, collect the component, repeat until the pool drains.
/// Component order depends on set iteration order; callers compare component
/// sets, not sequences.
pub fn flood_fill(cells: &HashSet<Cell>) -> Vec<HashSet<Cell>> {
    let mut pool = cells.clone();
    let mut components = Vec::new();

    while let Some(&start) = pool.iter().next() {
        pool.remove(&start);
        let mut component = HashSet::new();
        component.insert(start);

        let mut frontier = VecDeque::new();
        frontier.push_back(start);
        while let Some(cell) = frontier.pop_front() {
            for neighbor in neighbors4(cell) {
                if pool.remove(&neighbor) {
                    component.insert(neighbor);
                    frontier.push_back(neighbor);
                }
            }
        }

        components.push(component);
    }

    components
}

/// The seam line along the shared edge of two orthogonally adjacent cells.
///
/// The segment is inset 3% from each cell corner so neighboring seams do not
/// touch. Returns `None` for non-adjacent (or identical) cells.
pub fn seam(a: Cell, b: Cell, cell_size: Vec2) -> Option<Seam> {
    let (w, h) = cell_size;
    if a.row == b.row && (a.col - b.col).abs() == 1 {
        let x = a.col.max(b.col) as f32 * w;
        return Some((
            (x, (a.row as f32 + 0.97) * h),
            (x, (a.row as f32 + 0.03) * h),
        ));
    }
    if a.col == b.col && (a.row - b.row).abs() == 1 {
        let y = a.row.max(b.row) as f32 * h;
        return Some((
            ((a.col as f32 + 0.97) * w, y),
            ((a.col as f32 + 0.03) * w, y),
        ));
    }
    None
}

/// All seams between adjacent cells of a footprint, each pair once.
pub fn cell_seams(cells: &[Cell], cell_size: Vec2) -> Vec<Seam> {
    let set: HashSet<Cell> = cells.iter().copied().collect();
    let mut seams = Vec::new();
    for &cell in cells {
        // Scanning down and right visits each unordered pair exactly once.
        for neighbor in [cell.offset(DOWN), cell.offset(RIGHT)] {
            if set.contains(&neighbor) {
                if let Some(line) = seam(cell, neighbor, cell_size) {
                    seams.push(line);
                }
            }
        }
    }
    seams
}
