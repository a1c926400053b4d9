use crate::error::EmptyInputError;
use crate::simulation::cell::LiveSet;

/// Tight axis-aligned rectangle around a non-empty live set (inclusive on both ends).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Compute the bounding box of `live` in a single pass.
    pub fn of(live: &LiveSet) -> Result<Self, EmptyInputError> {
        let mut cells = live.iter();
        let first = cells.next().ok_or(EmptyInputError)?;

        let init = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };

        Ok(cells.fold(init, |bounds, cell| Self {
            min_x: bounds.min_x.min(cell.x),
            min_y: bounds.min_y.min(cell.y),
            max_x: bounds.max_x.max(cell.x),
            max_y: bounds.max_y.max(cell.y),
        }))
    }

    /// Number of columns covered. Computed in i64 so extreme coordinates do not overflow.
    pub fn width(&self) -> u64 {
        (i64::from(self.max_x) - i64::from(self.min_x) + 1) as u64
    }

    pub fn height(&self) -> u64 {
        (i64::from(self.max_y) - i64::from(self.min_y) + 1) as u64
    }

    /// True if (x, y) lies inside the box grown by `margin` on every side
    pub fn contains_with_margin(&self, x: i32, y: i32, margin: i32) -> bool {
        let (x, y, margin) = (i64::from(x), i64::from(y), i64::from(margin));
        x >= i64::from(self.min_x) - margin
            && x <= i64::from(self.max_x) + margin
            && y >= i64::from(self.min_y) - margin
            && y <= i64::from(self.max_y) + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_error() {
        assert_eq!(BoundingBox::of(&LiveSet::new()), Err(EmptyInputError));
    }

    #[test]
    fn test_single_cell() {
        let live: LiveSet = [(4, -2)].into_iter().collect();
        let bounds = BoundingBox::of(&live).unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                min_x: 4,
                min_y: -2,
                max_x: 4,
                max_y: -2
            }
        );
        assert_eq!(bounds.width(), 1);
        assert_eq!(bounds.height(), 1);
    }

    #[test]
    fn test_box_is_tight() {
        let live: LiveSet = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2), (-3, 1)]
            .into_iter()
            .collect();
        let bounds = BoundingBox::of(&live).unwrap();
        assert_eq!((bounds.min_x, bounds.max_x), (-3, 2));
        assert_eq!((bounds.min_y, bounds.max_y), (0, 2));
        assert_eq!(bounds.width(), 6);
        assert_eq!(bounds.height(), 3);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let live: LiveSet = [(i32::MIN, 0), (i32::MAX, 0)].into_iter().collect();
        let bounds = BoundingBox::of(&live).unwrap();
        assert_eq!(bounds.width(), 1u64 << 32);
    }

    #[test]
    fn test_contains_with_margin() {
        let live: LiveSet = [(0, 0), (2, 2)].into_iter().collect();
        let bounds = BoundingBox::of(&live).unwrap();
        assert!(bounds.contains_with_margin(-1, 3, 1));
        assert!(!bounds.contains_with_margin(-2, 0, 1));
        assert!(!bounds.contains_with_margin(3, 0, 0));
    }
}
