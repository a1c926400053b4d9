use std::collections::hash_set::{self, HashSet};

/// A unit square on the unbounded plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell shifted by (dx, dy)
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

/// The set of currently alive cells.
///
/// This is the only state that survives between generations. It is owned by the
/// caller (the editor, a test, ...) and handed to [`step`](crate::simulation::step)
/// by reference; the engine never keeps a copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiveSet {
    cells: HashSet<Cell>,
}

impl LiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: HashSet::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Returns true if the cell was dead before
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Returns true if the cell was alive before
    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    /// Flip a cell between alive and dead. Returns the new state.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        if self.cells.remove(&cell) {
            false
        } else {
            self.cells.insert(cell);
            true
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Copy of this set moved by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        self.iter().map(|cell| cell.offset(dx, dy)).collect()
    }

    /// Cells sorted by (x, y), handy for stable logs and test output
    pub fn sorted(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }
}

impl FromIterator<Cell> for LiveSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(i32, i32)> for LiveSet {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        iter.into_iter().map(Cell::from).collect()
    }
}

impl Extend<Cell> for LiveSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl<'a> IntoIterator for &'a LiveSet {
    type Item = &'a Cell;
    type IntoIter = hash_set::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl IntoIterator for LiveSet {
    type Item = Cell;
    type IntoIter = hash_set::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

/// GPU-compatible instance record for drawing one live cell.
///
/// Layout: 8 bytes, two signed cell coordinates read as `vec2<i32>` by render.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuCell {
    pub position: [i32; 2],
}

impl From<Cell> for GpuCell {
    fn from(cell: Cell) -> Self {
        Self {
            position: [cell.x, cell.y],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_cell_size() {
        assert_eq!(std::mem::size_of::<GpuCell>(), 8);
    }

    #[test]
    fn test_insert_is_unique() {
        let mut live = LiveSet::new();
        assert!(live.insert(Cell::new(3, -4)));
        assert!(!live.insert(Cell::new(3, -4)));
        assert_eq!(live.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut live = LiveSet::new();
        let cell = Cell::new(-1, 7);
        assert!(live.toggle(cell));
        assert!(live.contains(cell));
        assert!(!live.toggle(cell));
        assert!(live.is_empty());
    }

    #[test]
    fn test_translated() {
        let live: LiveSet = [(0, 0), (1, 2)].into_iter().collect();
        let moved = live.translated(-5, 3);
        assert_eq!(moved.sorted(), vec![Cell::new(-5, 3), Cell::new(-4, 5)]);
    }

    #[test]
    fn test_sorted_is_ordered_by_x_then_y() {
        let live: LiveSet = [(2, 0), (0, 5), (0, -1)].into_iter().collect();
        assert_eq!(
            live.sorted(),
            vec![Cell::new(0, -1), Cell::new(0, 5), Cell::new(2, 0)]
        );
    }
}
