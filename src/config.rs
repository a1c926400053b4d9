use std::time::Duration;

/// Dead border added around the bounding box on every side of the dense grid.
///
/// One cell is enough to hold every birth B3/S23 can produce in a single generation.
pub const PADDING: usize = 1;

/// Compute shader workgroup size (square, matches `@workgroup_size` in life.wgsl)
pub const WORKGROUP_SIZE: u32 = 16;

/// Kernel selection environment variable (`gpu` or `cpu`)
pub const KERNEL_ENV_VAR: &str = "SPARSE_LIFE_KERNEL";

// ============================================
// Window
// ============================================

pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 1000;

/// Time between generations while the simulation is running (2 Hz)
pub const STEP_INTERVAL: Duration = Duration::from_millis(500);

// ============================================
// Camera & editor
// ============================================

/// Side length of one cell in world pixels
pub const GRID_SIZE: f32 = 50.0;

/// Cursor travel (screen pixels) before a left press turns into a pan
pub const LEFT_DRAG_THRESHOLD: f32 = 6.0;

pub const ZOOM_MIN: f32 = 0.2;
pub const ZOOM_MAX: f32 = 5.0;

/// Relative zoom change per wheel line
pub const ZOOM_SPEED: f32 = 0.1;

/// Pixels per wheel "line" for touchpads reporting pixel deltas
pub const PIXELS_PER_WHEEL_LINE: f32 = 40.0;

/// Play/pause button rectangle in screen pixels: x, y, width, height
pub const BUTTON_RECT: [f32; 4] = [20.0, 20.0, 120.0, 40.0];

/// Side of the square used for `R` random soups, in cells
pub const SOUP_SIZE: i32 = 24;

/// Probability that a soup cell starts alive
pub const SOUP_DENSITY: f64 = 0.35;

// ============================================
// Colors (linear RGBA)
// ============================================

pub const BG_COLOR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};
pub const CELL_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const GRID_COLOR: [f32; 4] = [0.39, 0.39, 0.39, 1.0];
pub const BUTTON_COLOR: [f32; 4] = [0.27, 0.27, 0.27, 1.0];
pub const BUTTON_HOVER: [f32; 4] = [0.39, 0.39, 0.39, 1.0];
pub const BUTTON_GLYPH_COLOR: [f32; 4] = [0.94, 0.94, 0.94, 1.0];
