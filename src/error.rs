use thiserror::Error;

/// Returned when a bounding box is requested for a live set with no cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("bounding box of an empty live set is undefined")]
pub struct EmptyInputError;

/// Failures while acquiring a GPU adapter, device or surface.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to create window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("surface not supported by adapter {0}")]
    SurfaceUnsupported(String),
}

/// Failures of a [`StepKernel`](crate::simulation::StepKernel) backend.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Gpu(#[from] GpuError),

    #[error("{width}x{height} grid needs {bytes} bytes, storage buffers are limited to {limit}")]
    GridTooLarge {
        width: usize,
        height: usize,
        bytes: u64,
        limit: u64,
    },

    #[error("{width}x{height} grid needs {workgroups} workgroups on one axis, device allows {limit}")]
    DispatchTooLarge {
        width: usize,
        height: usize,
        workgroups: u64,
        limit: u32,
    },

    #[error("failed to map kernel output for reading: {0}")]
    Readback(#[from] wgpu::BufferAsyncError),

    #[error("readback callback dropped before the map completed")]
    ReadbackLost,
}
