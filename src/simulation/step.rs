use crate::error::KernelError;
use crate::simulation::bounds::BoundingBox;
use crate::simulation::cell::LiveSet;
use crate::simulation::grid::DenseGrid;
use crate::simulation::kernel::{CpuKernel, StepKernel};

/// Advance `live` by exactly one generation on the CPU.
///
/// Pure: the same input always gives the same output and nothing is retained
/// between calls. An empty set steps to an empty set.
pub fn step(live: &LiveSet) -> LiveSet {
    let Ok(bounds) = BoundingBox::of(live) else {
        return LiveSet::new();
    };

    let input = DenseGrid::rasterize(live, &bounds);
    let output = CpuKernel.evolve(&input);
    finish(live, &bounds, &input, &output)
}

/// Advance `live` by one generation through an arbitrary kernel backend.
///
/// # Panics
/// If the kernel returns a grid whose shape differs from its input.
pub fn step_with<K: StepKernel + ?Sized>(
    kernel: &K,
    live: &LiveSet,
) -> Result<LiveSet, KernelError> {
    let Ok(bounds) = BoundingBox::of(live) else {
        return Ok(LiveSet::new());
    };

    let input = DenseGrid::rasterize(live, &bounds);
    let output = kernel.advance(&input)?;
    assert!(
        output.same_shape(&input),
        "{} kernel returned {}x{} for a {}x{} input",
        kernel.name(),
        output.width(),
        output.height(),
        input.width(),
        input.height()
    );
    Ok(finish(live, &bounds, &input, &output))
}

fn finish(live: &LiveSet, bounds: &BoundingBox, input: &DenseGrid, output: &DenseGrid) -> LiveSet {
    let next = output.extract(bounds);
    log::debug!(
        "Stepped {}x{} grid: {} -> {} cells",
        input.width(),
        input.height(),
        live.len(),
        next.len()
    );
    next
}
