use crate::config::{GRID_SIZE, ZOOM_MAX, ZOOM_MIN, ZOOM_SPEED};
use crate::simulation::Cell;

/// Pan/zoom transform between screen pixels and world pixels.
///
/// `screen = (world - offset) * zoom`; one cell is [`GRID_SIZE`] world pixels wide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub offset: [f32; 2],
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0],
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn world_to_screen(&self, world: [f32; 2]) -> [f32; 2] {
        [
            (world[0] - self.offset[0]) * self.zoom,
            (world[1] - self.offset[1]) * self.zoom,
        ]
    }

    pub fn screen_to_world(&self, screen: [f32; 2]) -> [f32; 2] {
        [
            screen[0] / self.zoom + self.offset[0],
            screen[1] / self.zoom + self.offset[1],
        ]
    }

    /// Cell under a screen position
    pub fn cell_at(&self, screen: [f32; 2]) -> Cell {
        let world = self.screen_to_world(screen);
        Cell::new(
            (world[0] / GRID_SIZE).floor() as i32,
            (world[1] / GRID_SIZE).floor() as i32,
        )
    }

    /// Zoom by `wheel` notches, keeping the world point under `cursor` fixed
    pub fn zoom_at(&mut self, cursor: [f32; 2], wheel: f32) {
        let anchor = self.screen_to_world(cursor);
        self.zoom = (self.zoom * (1.0 + wheel * ZOOM_SPEED)).clamp(ZOOM_MIN, ZOOM_MAX);
        self.offset = [
            anchor[0] - cursor[0] / self.zoom,
            anchor[1] - cursor[1] / self.zoom,
        ];
    }

    /// Drag the view by a screen-space delta
    pub fn pan(&mut self, delta: [f32; 2]) {
        self.offset[0] -= delta[0] / self.zoom;
        self.offset[1] -= delta[1] / self.zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-3 && (a[1] - b[1]).abs() < 1e-3
    }

    #[test]
    fn test_transforms_are_inverse() {
        let camera = Camera {
            offset: [-120.0, 37.5],
            zoom: 2.5,
        };
        let world = [310.0, -42.0];
        assert!(approx(camera.screen_to_world(camera.world_to_screen(world)), world));
    }

    #[test]
    fn test_cell_at_floors_negative_coordinates() {
        let camera = Camera::default();
        assert_eq!(camera.cell_at([0.0, 0.0]), Cell::new(0, 0));
        assert_eq!(camera.cell_at([49.9, 50.0]), Cell::new(0, 1));

        let shifted = Camera {
            offset: [-100.0, -1.0],
            zoom: 1.0,
        };
        assert_eq!(shifted.cell_at([0.0, 0.0]), Cell::new(-2, -1));
    }

    #[test]
    fn test_zoom_keeps_cursor_anchor() {
        let mut camera = Camera::default();
        let cursor = [400.0, 300.0];
        let before = camera.screen_to_world(cursor);
        camera.zoom_at(cursor, 3.0);
        assert!((camera.zoom - 1.3).abs() < 1e-6);
        assert!(approx(camera.screen_to_world(cursor), before));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::default();
        for _ in 0..100 {
            camera.zoom_at([0.0, 0.0], 5.0);
        }
        assert_eq!(camera.zoom, ZOOM_MAX);
        for _ in 0..100 {
            camera.zoom_at([0.0, 0.0], -5.0);
        }
        assert_eq!(camera.zoom, ZOOM_MIN);
    }

    #[test]
    fn test_pan_moves_opposite_to_drag() {
        let mut camera = Camera {
            offset: [0.0, 0.0],
            zoom: 2.0,
        };
        camera.pan([10.0, -20.0]);
        assert!(approx(camera.offset, [-5.0, 10.0]));
    }
}
