use std::sync::mpsc;

use wgpu::{Buffer, BufferUsages, CommandEncoder, Device, Queue};

use crate::error::KernelError;
use crate::simulation::GpuCell;

/// Grid dimensions passed to the life shader (16 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GridParams {
    pub width: u32,
    pub height: u32,
    pub _padding: [u32; 2],
}

/// Storage buffers for one kernel invocation.
///
/// Dense grids change shape every generation, so these are built per step and
/// dropped once the output has been read back.
pub struct GridBuffers {
    /// Input cells, one u32 per cell
    pub input: Buffer,
    /// Output cells written by the shader
    pub output: Buffer,
    /// CPU-mappable copy of `output`
    pub staging: Buffer,
    /// Uniform buffer for grid dimensions
    pub params: Buffer,
    size: u64,
}

impl GridBuffers {
    /// Create grid buffers and upload the input cells
    pub fn new(device: &Device, queue: &Queue, width: u32, height: u32, cells: &[u32]) -> Self {
        assert_eq!(
            cells.len(),
            (width as usize) * (height as usize),
            "Initial data size mismatch"
        );

        let size = std::mem::size_of_val(cells) as u64;

        let input = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("life-input-buffer"),
            size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let output = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("life-output-buffer"),
            size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("life-staging-buffer"),
            size,
            usage: BufferUsages::MAP_READ | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("life-params-buffer"),
            size: std::mem::size_of::<GridParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        queue.write_buffer(&input, 0, bytemuck::cast_slice(cells));
        queue.write_buffer(
            &params,
            0,
            bytemuck::bytes_of(&GridParams {
                width,
                height,
                _padding: [0, 0],
            }),
        );

        Self {
            input,
            output,
            staging,
            params,
            size,
        }
    }

    /// Record a copy of the shader output into the staging buffer
    pub fn copy_output(&self, encoder: &mut CommandEncoder) {
        encoder.copy_buffer_to_buffer(&self.output, 0, &self.staging, 0, self.size);
    }

    /// Block until the staging copy is mapped, then read it.
    ///
    /// Waiting on the device here is the barrier between the compute pass and
    /// anything that consumes its output.
    pub fn read_output(&self, device: &Device) -> Result<Vec<u32>, KernelError> {
        let slice = self.staging.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        let _ = device.poll(wgpu::Maintain::Wait);
        rx.recv().map_err(|_| KernelError::ReadbackLost)??;

        let cells = {
            let data = slice.get_mapped_range();
            bytemuck::cast_slice::<u8, u32>(&data).to_vec()
        };
        self.staging.unmap();

        Ok(cells)
    }
}

/// View parameters passed to the render shader (128 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewParams {
    // Screen & camera (16 bytes)
    pub screen_size: [f32; 2],
    pub camera_offset: [f32; 2],

    // Play/pause button: x, y, width, height (16 bytes)
    pub button: [f32; 4],

    // Scalars (16 bytes)
    pub zoom: f32,
    pub cell_size: f32,
    pub running: u32,
    pub hovered: u32,

    // Colors (80 bytes)
    pub cell_color: [f32; 4],
    pub grid_color: [f32; 4],
    pub button_color: [f32; 4],
    pub button_hover: [f32; 4],
    pub glyph_color: [f32; 4],
}

/// Buffers the renderer draws from: one uniform and a growable instance buffer
pub struct RenderBuffers {
    pub view_buffer: Buffer,
    pub instance_buffer: Buffer,
    instance_capacity: usize,
    instance_count: u32,
}

impl RenderBuffers {
    const MIN_CAPACITY: usize = 256;

    pub fn new(device: &Device) -> Self {
        let view_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("view-params-buffer"),
            size: std::mem::size_of::<ViewParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            view_buffer,
            instance_buffer: create_instance_buffer(device, Self::MIN_CAPACITY),
            instance_capacity: Self::MIN_CAPACITY,
            instance_count: 0,
        }
    }

    /// Upload the cells to draw, growing the instance buffer when needed
    pub fn upload_cells(&mut self, device: &Device, queue: &Queue, cells: &[GpuCell]) {
        if cells.len() > self.instance_capacity {
            self.instance_capacity = cells.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(device, self.instance_capacity);
            log::debug!("Instance buffer grown to {} cells", self.instance_capacity);
        }

        if !cells.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(cells));
        }
        self.instance_count = cells.len() as u32;
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Update view parameters
    pub fn update_view(&self, queue: &Queue, params: &ViewParams) {
        queue.write_buffer(&self.view_buffer, 0, bytemuck::bytes_of(params));
    }
}

fn create_instance_buffer(device: &Device, capacity: usize) -> Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("cell-instance-buffer"),
        size: (capacity * std::mem::size_of::<GpuCell>()) as u64,
        usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_params_size() {
        assert_eq!(std::mem::size_of::<GridParams>(), 16);
    }

    #[test]
    fn test_view_params_size() {
        assert_eq!(std::mem::size_of::<ViewParams>(), 128);
        assert_eq!(std::mem::size_of::<ViewParams>() % 16, 0);
    }
}
