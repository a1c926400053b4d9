//! Conway's Game of Life on an unbounded plane.
//!
//! The live cells are kept sparse. Each generation rasterizes them into a dense
//! grid padded by one dead cell, runs the update rule over that grid in parallel
//! (rayon on the CPU, or a wgpu compute shader), and extracts the survivors back
//! into a sparse set.

pub mod config;
pub mod error;
pub mod gpu;
pub mod simulation;
pub mod ui;

pub use error::{EmptyInputError, GpuError, KernelError};
pub use simulation::{step, step_with, Cell, LiveSet, StepKernel};
