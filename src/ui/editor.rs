use crate::config::{BUTTON_RECT, LEFT_DRAG_THRESHOLD};
use crate::simulation::{Cell, LiveSet};
use crate::ui::camera::Camera;

/// What the left mouse button is currently doing
#[derive(Clone, Copy, Debug, PartialEq)]
enum LeftButton {
    Up,
    /// Pressed on the play/pause button; the release must not reach the grid
    OnButton,
    /// Pressed on the grid; becomes a pan once the cursor leaves the threshold
    Pressed { start: [f32; 2], dragging: bool },
}

/// Everything the editor tracks besides the live cells themselves.
///
/// The live set stays with the caller and is only borrowed when a click edits it.
#[derive(Clone, Debug)]
pub struct UiState {
    pub camera: Camera,
    pub running: bool,
    cursor: [f32; 2],
    last_mouse: [f32; 2],
    left: LeftButton,
    middle_dragging: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            running: false,
            cursor: [0.0, 0.0],
            last_mouse: [0.0, 0.0],
            left: LeftButton::Up,
            middle_dragging: false,
        }
    }
}

impl UiState {
    pub fn cursor(&self) -> [f32; 2] {
        self.cursor
    }

    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        log::info!("Simulation {}", if self.running { "running" } else { "paused" });
        self.running
    }

    pub fn button_hovered(&self) -> bool {
        in_button(self.cursor)
    }

    pub fn cursor_moved(&mut self, position: [f32; 2]) {
        self.cursor = position;

        if let LeftButton::Pressed { start, dragging } = &mut self.left {
            if !*dragging && distance(position, *start) > LEFT_DRAG_THRESHOLD {
                *dragging = true;
            }
            if *dragging {
                self.camera.pan(sub(position, self.last_mouse));
                self.last_mouse = position;
            }
        }

        if self.middle_dragging {
            self.camera.pan(sub(position, self.last_mouse));
            self.last_mouse = position;
        }
    }

    pub fn left_pressed(&mut self) {
        if self.button_hovered() {
            self.left = LeftButton::OnButton;
            self.toggle_running();
        } else {
            self.left = LeftButton::Pressed {
                start: self.cursor,
                dragging: false,
            };
            self.last_mouse = self.cursor;
        }
    }

    /// Finish a left click. A press+release without dragging toggles the cell under
    /// the cursor; returns that cell and its new state.
    pub fn left_released(&mut self, live: &mut LiveSet) -> Option<(Cell, bool)> {
        let released = std::mem::replace(&mut self.left, LeftButton::Up);
        match released {
            LeftButton::Pressed {
                dragging: false, ..
            } => {
                let cell = self.camera.cell_at(self.cursor);
                let alive = live.toggle(cell);
                log::debug!("Toggled ({}, {}) -> {}", cell.x, cell.y, alive);
                Some((cell, alive))
            }
            _ => None,
        }
    }

    pub fn middle_pressed(&mut self) {
        self.middle_dragging = true;
        self.last_mouse = self.cursor;
    }

    pub fn middle_released(&mut self) {
        self.middle_dragging = false;
    }

    /// Mouse wheel by `lines` notches (positive zooms in)
    pub fn wheel(&mut self, lines: f32) {
        self.camera.zoom_at(self.cursor, lines);
    }

    /// Cell at the centre of a `screen_size` viewport
    pub fn view_center(&self, screen_size: [f32; 2]) -> Cell {
        self.camera.cell_at([screen_size[0] / 2.0, screen_size[1] / 2.0])
    }
}

fn in_button(p: [f32; 2]) -> bool {
    let [x, y, w, h] = BUTTON_RECT;
    p[0] >= x && p[0] < x + w && p[1] >= y && p[1] < y + h
}

fn sub(a: [f32; 2], b: [f32; 2]) -> [f32; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    let d = sub(a, b);
    d[0].hypot(d[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(ui: &mut UiState, live: &mut LiveSet, at: [f32; 2]) -> Option<(Cell, bool)> {
        ui.cursor_moved(at);
        ui.left_pressed();
        ui.left_released(live)
    }

    #[test]
    fn test_click_toggles_cell() {
        let mut ui = UiState::default();
        let mut live = LiveSet::new();

        assert_eq!(click(&mut ui, &mut live, [275.0, 130.0]), Some((Cell::new(5, 2), true)));
        assert!(live.contains(Cell::new(5, 2)));

        assert_eq!(click(&mut ui, &mut live, [260.0, 149.0]), Some((Cell::new(5, 2), false)));
        assert!(live.is_empty());
    }

    #[test]
    fn test_click_on_button_toggles_running_only() {
        let mut ui = UiState::default();
        let mut live = LiveSet::new();

        assert_eq!(click(&mut ui, &mut live, [30.0, 30.0]), None);
        assert!(ui.running);
        assert!(live.is_empty());

        click(&mut ui, &mut live, [139.0, 59.0]);
        assert!(!ui.running);
    }

    #[test]
    fn test_small_jitter_still_clicks() {
        let mut ui = UiState::default();
        let mut live = LiveSet::new();
        ui.cursor_moved([300.0, 300.0]);
        ui.left_pressed();
        ui.cursor_moved([303.0, 302.0]);

        assert!(ui.left_released(&mut live).is_some());
        assert_eq!(ui.camera, Camera::default());
    }

    #[test]
    fn test_left_drag_pans_without_toggling() {
        let mut ui = UiState::default();
        let mut live = LiveSet::new();
        ui.cursor_moved([300.0, 300.0]);
        ui.left_pressed();
        ui.cursor_moved([320.0, 300.0]);
        ui.cursor_moved([330.0, 310.0]);

        assert_eq!(ui.left_released(&mut live), None);
        assert!(live.is_empty());
        assert_eq!(ui.camera.offset, [-30.0, -10.0]);
    }

    #[test]
    fn test_middle_drag_pans() {
        let mut ui = UiState::default();
        ui.cursor_moved([100.0, 100.0]);
        ui.middle_pressed();
        ui.cursor_moved([102.0, 97.0]);
        ui.middle_released();
        ui.cursor_moved([500.0, 500.0]);

        assert_eq!(ui.camera.offset, [-2.0, 3.0]);
    }

    #[test]
    fn test_view_center() {
        let ui = UiState::default();
        assert_eq!(ui.view_center([1280.0, 1000.0]), Cell::new(12, 10));
    }
}
