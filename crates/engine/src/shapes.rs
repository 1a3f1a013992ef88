//! Polyomino footprint tables.
//!
//! Each entry is a footprint in local cell space plus the pivot its
//! rotations turn about. Keys are single characters; a lowercase key is the
//! mirror of its uppercase partner.

use gridfall_types::Pivot;

use crate::rng::SimpleRng;

/// Largest footprint in any built-in table.
pub const MAX_SHAPE_CELLS: usize = 5;

/// One keyed footprint.
#[derive(Debug, Clone, Copy)]
pub struct ShapeSpec {
    pub key: char,
    /// Occupied cells as `(row, col)` in local space.
    pub cells: &'static [(i16, i16)],
    /// Rotation pivot in local space.
    pub pivot: Pivot,
}

const fn spec(key: char, cells: &'static [(i16, i16)], pivot: (f32, f32)) -> ShapeSpec {
    ShapeSpec { key, cells, pivot }
}

/// The seven tetrominoes (S, Z and J, L appear as 'S'/'s' and 'J'/'j').
pub const TETROMINOES: [ShapeSpec; 7] = [
    spec('I', &[(0, 0), (1, 0), (2, 0), (3, 0)], (1.0, 0.0)),
    spec('J', &[(0, 0), (1, 0), (2, 0), (2, 1)], (1.0, 0.0)),
    spec('j', &[(0, 0), (1, 0), (2, 0), (0, 1)], (1.0, 0.0)),
    spec('O', &[(0, 0), (1, 0), (0, 1), (1, 1)], (1.0, 0.0)),
    spec('S', &[(1, 0), (2, 0), (0, 1), (1, 1)], (1.0, 0.0)),
    spec('s', &[(0, 0), (1, 0), (1, 1), (2, 1)], (1.0, 0.0)),
    spec('T', &[(0, 0), (1, 0), (2, 0), (1, 1)], (1.0, 0.0)),
];

/// The eighteen one-sided pentominoes.
pub const PENTOMINOES: [ShapeSpec; 18] = [
    spec('F', &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)], (1.0, 1.0)),
    spec('f', &[(0, 0), (1, 0), (1, 1), (2, 1), (1, 2)], (1.0, 1.0)),
    spec('I', &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)], (2.0, 0.0)),
    spec('J', &[(1, 0), (1, 1), (1, 2), (1, 3), (2, 3)], (1.0, 2.0)),
    spec('j', &[(1, 0), (1, 1), (1, 2), (1, 3), (0, 3)], (1.0, 2.0)),
    spec('P', &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)], (0.0, 1.0)),
    spec('p', &[(0, 0), (1, 0), (0, 1), (1, 1), (1, 2)], (1.0, 1.0)),
    spec('S', &[(2, 0), (3, 0), (0, 1), (1, 1), (2, 1)], (2.0, 1.0)),
    spec('s', &[(0, 0), (1, 0), (1, 1), (2, 1), (3, 1)], (1.0, 1.0)),
    spec('T', &[(0, 0), (1, 0), (2, 0), (1, 1), (1, 2)], (1.0, 1.0)),
    spec('U', &[(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)], (1.0, 1.0)),
    spec('V', &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)], (1.0, 1.0)),
    spec('W', &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)], (1.0, 1.0)),
    spec('X', &[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)], (1.0, 1.0)),
    spec('Y', &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 2)], (0.0, 2.0)),
    spec('y', &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 1)], (0.0, 1.0)),
    spec('Z', &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)], (1.0, 1.0)),
    spec('z', &[(0, 2), (1, 2), (1, 1), (1, 0), (2, 0)], (1.0, 1.0)),
];

/// Which footprint family the engine deals from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeTable {
    Tetromino,
    Pentomino,
}

impl ShapeTable {
    pub fn specs(self) -> &'static [ShapeSpec] {
        match self {
            ShapeTable::Tetromino => &TETROMINOES,
            ShapeTable::Pentomino => &PENTOMINOES,
        }
    }

    pub fn other(self) -> Self {
        match self {
            ShapeTable::Tetromino => ShapeTable::Pentomino,
            ShapeTable::Pentomino => ShapeTable::Tetromino,
        }
    }

    /// Footprint for a key, or a uniform random entry when the key is absent
    /// or unknown. The fallback is a deliberate default, not an error: spawn
    /// always succeeds in producing a shape.
    pub fn lookup(self, key: Option<char>, rng: &mut SimpleRng) -> &'static ShapeSpec {
        let specs = self.specs();
        if let Some(key) = key {
            if let Some(found) = specs.iter().find(|s| s.key == key) {
                return found;
            }
        }
        &specs[rng.next_range(specs.len() as u32) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfall_grid::flood_fill;
    use gridfall_types::Cell;
    use std::collections::HashSet;

    fn all_specs() -> impl Iterator<Item = (&'static str, &'static ShapeSpec)> {
        TETROMINOES
            .iter()
            .map(|s| ("tetromino", s))
            .chain(PENTOMINOES.iter().map(|s| ("pentomino", s)))
    }

    #[test]
    fn test_footprints_are_distinct_cells() {
        for (family, spec) in all_specs() {
            let unique: HashSet<_> = spec.cells.iter().collect();
            assert_eq!(
                unique.len(),
                spec.cells.len(),
                "{} '{}' repeats a cell",
                family,
                spec.key
            );
            assert!(spec.cells.len() <= MAX_SHAPE_CELLS);
        }
    }

    #[test]
    fn test_footprints_are_connected() {
        for (family, spec) in all_specs() {
            let cells: HashSet<Cell> =
                spec.cells.iter().map(|&(r, c)| Cell::new(r, c)).collect();
            assert_eq!(
                flood_fill(&cells).len(),
                1,
                "{} '{}' is not 4-connected",
                family,
                spec.key
            );
        }
    }

    #[test]
    fn test_keys_are_unique_per_table() {
        for specs in [&TETROMINOES[..], &PENTOMINOES[..]] {
            let keys: HashSet<char> = specs.iter().map(|s| s.key).collect();
            assert_eq!(keys.len(), specs.len());
        }
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(TETROMINOES.len(), 7);
        assert_eq!(PENTOMINOES.len(), 18);
        assert_eq!(ShapeTable::Tetromino.other(), ShapeTable::Pentomino);
    }

    #[test]
    fn test_lookup_by_key() {
        let mut rng = SimpleRng::new(1);
        let spec = ShapeTable::Tetromino.lookup(Some('O'), &mut rng);
        assert_eq!(spec.key, 'O');
        // Keys are case-sensitive: 'S' and 's' are different shapes.
        let upper = ShapeTable::Tetromino.lookup(Some('S'), &mut rng);
        let lower = ShapeTable::Tetromino.lookup(Some('s'), &mut rng);
        assert_ne!(upper.cells, lower.cells);
    }

    #[test]
    fn test_lookup_unknown_key_falls_back_to_random() {
        let mut a = SimpleRng::new(99);
        let mut b = SimpleRng::new(99);
        // Same seed, same fallback choice; never a panic.
        let from_unknown = ShapeTable::Pentomino.lookup(Some('?'), &mut a);
        let from_absent = ShapeTable::Pentomino.lookup(None, &mut b);
        assert_eq!(from_unknown.key, from_absent.key);
    }
}
