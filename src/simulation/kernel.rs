use rayon::prelude::*;

use crate::error::KernelError;
use crate::simulation::grid::DenseGrid;

/// Moore neighborhood offsets (di, dj)
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A backend that advances a dense grid by one generation.
///
/// Implementations must treat each output cell as a pure function of the input
/// grid, and must not return until every output cell is written.
pub trait StepKernel {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Produce the next generation. The output has the input's shape.
    fn advance(&self, input: &DenseGrid) -> Result<DenseGrid, KernelError>;
}

/// B3/S23: survive on 2 or 3 neighbors, birth on exactly 3.
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (_, 3))
}

/// Live neighbors of (i, j); offsets that leave the grid count as dead.
#[inline]
pub fn count_neighbors(grid: &DenseGrid, i: usize, j: usize) -> u8 {
    let (i, j) = (i as isize, j as isize);
    NEIGHBORS
        .iter()
        .filter(|(di, dj)| grid.alive_at(i + di, j + dj))
        .count() as u8
}

/// Data-parallel CPU kernel: one rayon task per output row.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuKernel;

impl CpuKernel {
    /// Infallible form of [`StepKernel::advance`].
    ///
    /// Each row of the output is written by exactly one task, reading only the
    /// immutable input. The parallel iterator joins before returning.
    pub fn evolve(&self, input: &DenseGrid) -> DenseGrid {
        let width = input.width();
        let mut next = vec![false; input.as_slice().len()];

        next.par_chunks_mut(width).enumerate().for_each(|(j, row)| {
            for (i, out) in row.iter_mut().enumerate() {
                *out = next_state(input.get(i, j), count_neighbors(input, i, j));
            }
        });

        DenseGrid::from_cells(width, input.height(), next)
    }
}

impl StepKernel for CpuKernel {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn advance(&self, input: &DenseGrid) -> Result<DenseGrid, KernelError> {
        Ok(self.evolve(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: &[&str]) -> DenseGrid {
        let width = rows[0].len();
        let cells = rows
            .iter()
            .flat_map(|row| row.bytes().map(|b| b == b'#'))
            .collect();
        DenseGrid::from_cells(width, rows.len(), cells)
    }

    #[test]
    fn test_rule_table() {
        for n in 0..=8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(next_state(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn test_corner_counts_three_neighbors_at_most() {
        let grid = grid_from_rows(&["###", "###", "###"]);
        assert_eq!(count_neighbors(&grid, 0, 0), 3);
        assert_eq!(count_neighbors(&grid, 2, 2), 3);
        assert_eq!(count_neighbors(&grid, 1, 0), 5);
        assert_eq!(count_neighbors(&grid, 0, 1), 5);
        assert_eq!(count_neighbors(&grid, 1, 1), 8);
    }

    #[test]
    fn test_no_wraparound() {
        // A live column on the far right must not feed the left edge.
        let grid = grid_from_rows(&["...#", "...#", "...#"]);
        assert_eq!(count_neighbors(&grid, 0, 1), 0);
        assert_eq!(count_neighbors(&grid, 2, 1), 3);
    }

    #[test]
    fn test_shape_is_preserved() {
        let grid = DenseGrid::new(7, 4);
        let next = CpuKernel.evolve(&grid);
        assert!(next.same_shape(&grid));
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn test_blinker_in_grid() {
        let grid = grid_from_rows(&[".....", ".....", ".###.", ".....", "....."]);
        let next = CpuKernel.evolve(&grid);
        let expected = grid_from_rows(&[".....", "..#..", "..#..", "..#..", "....."]);
        assert_eq!(next, expected);
    }

    #[test]
    fn test_birth_on_edge_cell() {
        // Three live cells along the top row give birth on the edge above nothing.
        let grid = grid_from_rows(&["#.#", ".#.", "..."]);
        let next = CpuKernel.evolve(&grid);
        assert!(next.get(1, 0), "edge cell with 3 neighbors should be born");
        assert!(next.get(1, 1), "centre with 2 neighbors should survive");
    }

    #[test]
    fn test_advance_matches_evolve() {
        let grid = grid_from_rows(&["#..#", ".##.", "#..#", ".#.#"]);
        let via_trait = CpuKernel.advance(&grid).unwrap();
        assert_eq!(via_trait, CpuKernel.evolve(&grid));
        assert_eq!(CpuKernel.name(), "cpu");
    }
}
