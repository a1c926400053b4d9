mod context;
mod buffers;
mod compute;
mod kernel;
mod render;

pub use context::{ComputeContext, GpuContext};
pub use buffers::{GridBuffers, GridParams, RenderBuffers, ViewParams};
pub use compute::ComputePipeline;
pub use kernel::GpuKernel;
pub use render::RenderPipeline;
