use crate::config::WORKGROUP_SIZE;
use crate::error::KernelError;
use crate::gpu::buffers::GridBuffers;
use crate::gpu::compute::{workgroups, ComputePipeline};
use crate::gpu::context::ComputeContext;
use crate::simulation::{DenseGrid, StepKernel};

/// Life kernel dispatched as a wgpu compute shader.
///
/// Every step uploads the dense grid, runs one invocation per cell, and blocks on
/// the readback before returning.
pub struct GpuKernel {
    context: ComputeContext,
    pipeline: ComputePipeline,
}

impl GpuKernel {
    /// Acquire a headless device and build the pipeline
    pub fn new() -> Result<Self, KernelError> {
        let context = pollster::block_on(ComputeContext::new())?;
        let pipeline = ComputePipeline::new(&context.device);
        log::info!("GPU kernel ready on {}", context.adapter_name);
        Ok(Self { context, pipeline })
    }

    pub fn adapter_name(&self) -> &str {
        &self.context.adapter_name
    }

    fn check_limits(&self, input: &DenseGrid) -> Result<(u32, u32), KernelError> {
        let (width, height) = (input.width(), input.height());
        let limits = self.context.device.limits();

        let bytes = (width as u64)
            .saturating_mul(height as u64)
            .saturating_mul(std::mem::size_of::<u32>() as u64);
        let limit = u64::from(limits.max_storage_buffer_binding_size).min(limits.max_buffer_size);
        if bytes > limit {
            return Err(KernelError::GridTooLarge {
                width,
                height,
                bytes,
                limit,
            });
        }

        let max_groups = limits.max_compute_workgroups_per_dimension;
        let dims = (u32::try_from(width), u32::try_from(height));
        match dims {
            (Ok(w), Ok(h)) if workgroups(w).max(workgroups(h)) <= max_groups => Ok((w, h)),
            _ => Err(KernelError::DispatchTooLarge {
                width,
                height,
                workgroups: (width.max(height) as u64).div_ceil(u64::from(WORKGROUP_SIZE)),
                limit: max_groups,
            }),
        }
    }
}

impl StepKernel for GpuKernel {
    fn name(&self) -> &'static str {
        "gpu"
    }

    fn advance(&self, input: &DenseGrid) -> Result<DenseGrid, KernelError> {
        let (width, height) = self.check_limits(input)?;
        let device = &self.context.device;
        let queue = &self.context.queue;

        let cells: Vec<u32> = input.as_slice().iter().map(|&alive| u32::from(alive)).collect();
        let buffers = GridBuffers::new(device, queue, width, height, &cells);
        let bind_group =
            self.pipeline
                .create_bind_group(device, &buffers.input, &buffers.output, &buffers.params);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("life-step-encoder"),
        });
        self.pipeline.dispatch(&mut encoder, &bind_group, width, height);
        buffers.copy_output(&mut encoder);
        queue.submit(std::iter::once(encoder.finish()));

        let output = buffers.read_output(device)?;
        log::trace!("GPU kernel stepped {}x{} grid", width, height);

        Ok(DenseGrid::from_cells(
            input.width(),
            input.height(),
            output.into_iter().map(|cell| cell != 0).collect(),
        ))
    }
}
