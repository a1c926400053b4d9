use crate::config::PADDING;
use crate::simulation::bounds::BoundingBox;
use crate::simulation::cell::{Cell, LiveSet};

/// Smallest grid the kernel accepts on either axis (one cell plus padding).
pub const MIN_DIMENSION: usize = 1 + 2 * PADDING;

/// Finite row-major boolean buffer the update rule runs over.
///
/// Built around a bounding box with [`PADDING`] dead cells on every side, so grid
/// position (i, j) is world cell (i + min_x - 1, j + min_y - 1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl DenseGrid {
    /// All-dead grid.
    ///
    /// # Panics
    /// If either dimension is below [`MIN_DIMENSION`] or the cell count overflows `usize`.
    pub fn new(width: usize, height: usize) -> Self {
        let len = checked_len(width, height);
        Self {
            width,
            height,
            cells: vec![false; len],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Panics
    /// On a shape below [`MIN_DIMENSION`] or if `cells.len() != width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        let len = checked_len(width, height);
        assert_eq!(cells.len(), len, "Dense grid data size mismatch");
        Self {
            width,
            height,
            cells,
        }
    }

    /// Rasterize `live` into a padded grid sized to `bounds`.
    ///
    /// `bounds` must be the tight box of `live`; every live cell then lands in
    /// `[1, width - 2] x [1, height - 2]` and the padding stays dead.
    ///
    /// # Panics
    /// If the padded grid does not fit in memory-addressable space.
    pub fn rasterize(live: &LiveSet, bounds: &BoundingBox) -> Self {
        let width = padded(bounds.width());
        let height = padded(bounds.height());
        let mut grid = Self::new(width, height);

        for cell in live {
            let i = (i64::from(cell.x) - i64::from(bounds.min_x)) as usize + PADDING;
            let j = (i64::from(cell.y) - i64::from(bounds.min_y)) as usize + PADDING;
            grid.set(i, j, true);
        }

        grid
    }

    /// Collect the world coordinates of every live grid cell.
    ///
    /// `bounds` is the box the *input* grid was rasterized from; the output grid
    /// shares its shape and origin.
    pub fn extract(&self, bounds: &BoundingBox) -> LiveSet {
        let origin_x = i64::from(bounds.min_x) - PADDING as i64;
        let origin_y = i64::from(bounds.min_y) - PADDING as i64;
        let mut live = LiveSet::with_capacity(self.population());

        for (j, row) in self.rows().enumerate() {
            for (i, _) in row.iter().enumerate().filter(|(_, alive)| **alive) {
                let x = origin_x + i as i64;
                let y = origin_y + j as i64;
                match (i32::try_from(x), i32::try_from(y)) {
                    (Ok(x), Ok(y)) => {
                        live.insert(Cell::new(x, y));
                    }
                    _ => log::trace!("Dropping cell ({}, {}) outside the i32 plane", x, y),
                }
            }
        }

        live
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major view of all cells
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, bool> {
        self.cells.chunks_exact(self.width)
    }

    /// # Panics
    /// If (i, j) is out of range.
    pub fn get(&self, i: usize, j: usize) -> bool {
        assert!(i < self.width && j < self.height, "({i}, {j}) outside grid");
        self.cells[j * self.width + i]
    }

    /// # Panics
    /// If (i, j) is out of range.
    pub fn set(&mut self, i: usize, j: usize, alive: bool) {
        assert!(i < self.width && j < self.height, "({i}, {j}) outside grid");
        self.cells[j * self.width + i] = alive;
    }

    /// Bounds-checked read: anything outside the grid is dead.
    #[inline]
    pub fn alive_at(&self, i: isize, j: isize) -> bool {
        if i < 0 || j < 0 {
            return false;
        }
        let (i, j) = (i as usize, j as usize);
        i < self.width && j < self.height && self.cells[j * self.width + i]
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }

    pub fn same_shape(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }
}

fn padded(extent: u64) -> usize {
    extent
        .checked_add(2 * PADDING as u64)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or_else(|| panic!("Padded extent {} does not fit in usize", extent))
}

fn checked_len(width: usize, height: usize) -> usize {
    assert!(
        width >= MIN_DIMENSION && height >= MIN_DIMENSION,
        "Dense grid must be at least {MIN_DIMENSION}x{MIN_DIMENSION}, got {width}x{height}"
    );
    width
        .checked_mul(height)
        .unwrap_or_else(|| panic!("{}x{} dense grid overflows usize", width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glider() -> LiveSet {
        [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)].into_iter().collect()
    }

    #[test]
    fn test_padded_dimensions() {
        let live = glider();
        let bounds = BoundingBox::of(&live).unwrap();
        let grid = DenseGrid::rasterize(&live, &bounds);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.population(), 5);
    }

    #[test]
    fn test_padding_is_dead() {
        let live: LiveSet = [(-7, 3), (-5, 4)].into_iter().collect();
        let bounds = BoundingBox::of(&live).unwrap();
        let grid = DenseGrid::rasterize(&live, &bounds);
        let (w, h) = (grid.width(), grid.height());

        for i in 0..w {
            assert!(!grid.get(i, 0), "top padding at {i}");
            assert!(!grid.get(i, h - 1), "bottom padding at {i}");
        }
        for j in 0..h {
            assert!(!grid.get(0, j), "left padding at {j}");
            assert!(!grid.get(w - 1, j), "right padding at {j}");
        }
    }

    #[test]
    fn test_world_mapping() {
        let live: LiveSet = [(-7, 3), (-5, 4)].into_iter().collect();
        let bounds = BoundingBox::of(&live).unwrap();
        let grid = DenseGrid::rasterize(&live, &bounds);

        // (i + min_x - 1, j + min_y - 1)
        assert!(grid.get(1, 1));
        assert!(grid.get(3, 2));
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn test_extract_inverts_rasterize() {
        let live = glider().translated(-40, 12);
        let bounds = BoundingBox::of(&live).unwrap();
        let grid = DenseGrid::rasterize(&live, &bounds);
        assert_eq!(grid.extract(&bounds), live);
    }

    #[test]
    fn test_extract_maps_padding_back_to_world() {
        let live: LiveSet = [(10, 20)].into_iter().collect();
        let bounds = BoundingBox::of(&live).unwrap();
        let mut grid = DenseGrid::new(3, 3);
        grid.set(0, 0, true);
        grid.set(2, 2, true);

        let extracted = grid.extract(&bounds);
        assert_eq!(extracted.sorted(), vec![Cell::new(9, 19), Cell::new(11, 21)]);
    }

    #[test]
    fn test_extract_drops_cells_beyond_i32() {
        let live: LiveSet = [(i32::MAX, 0)].into_iter().collect();
        let bounds = BoundingBox::of(&live).unwrap();
        let mut grid = DenseGrid::new(3, 3);
        grid.set(1, 1, true);
        grid.set(2, 1, true);

        assert_eq!(grid.extract(&bounds).sorted(), vec![Cell::new(i32::MAX, 0)]);
    }

    #[test]
    fn test_alive_at_out_of_range_is_dead() {
        let mut grid = DenseGrid::new(3, 3);
        grid.set(0, 0, true);
        assert!(grid.alive_at(0, 0));
        assert!(!grid.alive_at(-1, 0));
        assert!(!grid.alive_at(0, -1));
        assert!(!grid.alive_at(3, 0));
        assert!(!grid.alive_at(0, 3));
    }

    #[test]
    #[should_panic(expected = "at least")]
    fn test_too_small_grid_panics() {
        let _ = DenseGrid::new(2, 5);
    }

    #[test]
    #[should_panic(expected = "size mismatch")]
    fn test_from_cells_length_mismatch_panics() {
        let _ = DenseGrid::from_cells(3, 3, vec![false; 8]);
    }
}
