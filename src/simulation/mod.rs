mod bounds;
mod cell;
mod grid;
mod kernel;
pub mod patterns;
mod step;

pub use bounds::BoundingBox;
pub use cell::{Cell, GpuCell, LiveSet};
pub use grid::{DenseGrid, MIN_DIMENSION};
pub use kernel::{count_neighbors, next_state, CpuKernel, StepKernel};
pub use step::{step, step_with};
