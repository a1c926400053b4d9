use rand::Rng;

use crate::simulation::cell::{Cell, LiveSet};

/// A named starting pattern, cells given relative to its top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

impl Pattern {
    /// Live set with the pattern's centre placed on `center`
    pub fn placed_at(&self, center: Cell) -> LiveSet {
        let (w, h) = self.extent();
        let (dx, dy) = (center.x - w / 2, center.y - h / 2);
        self.cells
            .iter()
            .map(|&(x, y)| Cell::new(x + dx, y + dy))
            .collect()
    }

    /// Width and height of the pattern's own bounding box
    pub fn extent(&self) -> (i32, i32) {
        let max_x = self.cells.iter().map(|&(x, _)| x).max().unwrap_or(0);
        let max_y = self.cells.iter().map(|&(_, y)| y).max().unwrap_or(0);
        (max_x + 1, max_y + 1)
    }
}

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    cells: &[(0, 0), (1, 0), (2, 0)],
};

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

pub const PULSAR: Pattern = Pattern {
    name: "Pulsar",
    cells: &[
        (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
        (0, 2), (5, 2), (7, 2), (12, 2),
        (0, 3), (5, 3), (7, 3), (12, 3),
        (0, 4), (5, 4), (7, 4), (12, 4),
        (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
        (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
        (0, 8), (5, 8), (7, 8), (12, 8),
        (0, 9), (5, 9), (7, 9), (12, 9),
        (0, 10), (5, 10), (7, 10), (12, 10),
        (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
    ],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "R-pentomino",
    cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
};

pub const GOSPER_GLIDER_GUN: Pattern = Pattern {
    name: "Gosper Glider Gun",
    cells: &[
        (24, 0),
        (22, 1), (24, 1),
        (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
        (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
        (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
        (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
        (10, 6), (16, 6), (24, 6),
        (11, 7), (15, 7),
        (12, 8), (13, 8),
    ],
};

/// Patterns bound to the number keys, in order
pub const PATTERNS: &[Pattern] = &[
    GLIDER,
    BLINKER,
    BLOCK,
    PULSAR,
    R_PENTOMINO,
    GOSPER_GLIDER_GUN,
];

/// Random square of `size` x `size` cells centred on `center`, each alive with
/// probability `density`.
pub fn random_soup<R: Rng>(rng: &mut R, center: Cell, size: i32, density: f64) -> LiveSet {
    let half = size / 2;
    let mut live = LiveSet::new();
    for y in 0..size {
        for x in 0..size {
            if rng.gen_bool(density) {
                live.insert(Cell::new(center.x - half + x, center.y - half + y));
            }
        }
    }
    live
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_patterns_have_unique_cells() {
        for pattern in PATTERNS {
            let unique: HashSet<_> = pattern.cells.iter().collect();
            assert_eq!(unique.len(), pattern.cells.len(), "{} has duplicates", pattern.name);
        }
    }

    #[test]
    fn test_placed_at_centres_pattern() {
        let live = BLINKER.placed_at(Cell::new(10, -4));
        assert_eq!(
            live.sorted(),
            vec![Cell::new(9, -4), Cell::new(10, -4), Cell::new(11, -4)]
        );
    }

    #[test]
    fn test_extent() {
        assert_eq!(GLIDER.extent(), (3, 3));
        assert_eq!(PULSAR.extent(), (13, 13));
        assert_eq!(GOSPER_GLIDER_GUN.extent(), (36, 9));
    }

    #[test]
    fn test_random_soup_is_seeded_and_bounded() {
        let center = Cell::new(100, 100);
        let a = random_soup(&mut StdRng::seed_from_u64(7), center, 16, 0.4);
        let b = random_soup(&mut StdRng::seed_from_u64(7), center, 16, 0.4);
        assert_eq!(a, b);
        assert!(!a.is_empty());
        for cell in &a {
            assert!((92..108).contains(&cell.x) && (92..108).contains(&cell.y));
        }
    }
}
