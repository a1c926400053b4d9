use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use sparse_life::config::{
    BUTTON_COLOR, BUTTON_GLYPH_COLOR, BUTTON_HOVER, BUTTON_RECT, CELL_COLOR, GRID_COLOR,
    GRID_SIZE, PIXELS_PER_WHEEL_LINE, SOUP_DENSITY, SOUP_SIZE, STEP_INTERVAL, WINDOW_HEIGHT,
    WINDOW_WIDTH,
};
use sparse_life::gpu::{GpuContext, GpuKernel, RenderBuffers, RenderPipeline, ViewParams};
use sparse_life::simulation::patterns::{random_soup, PATTERNS};
use sparse_life::simulation::{step, step_with, GpuCell, LiveSet};
use sparse_life::ui::UiState;

/// Which kernel backend advances the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelChoice {
    Cpu,
    Gpu,
}

impl KernelChoice {
    pub fn from_env(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("gpu") => Self::Gpu,
            _ => Self::Cpu,
        }
    }
}

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    render_buffers: Option<RenderBuffers>,
    render_pipeline: Option<RenderPipeline>,
    kernel_choice: KernelChoice,
    gpu_kernel: Option<GpuKernel>,
    live: LiveSet,
    ui: UiState,
    generation: u64,
    last_step: Instant,
    fps_counter: FpsCounter,
}

impl App {
    pub fn new(kernel_choice: KernelChoice) -> Self {
        Self {
            window: None,
            gpu: None,
            render_buffers: None,
            render_pipeline: None,
            kernel_choice,
            gpu_kernel: None,
            live: LiveSet::new(),
            ui: UiState::default(),
            generation: 0,
            last_step: Instant::now(),
            fps_counter: FpsCounter::new(),
        }
    }

    /// Advance one generation, falling back to the CPU if the GPU kernel fails
    fn advance(&mut self) {
        let gpu_result = self.gpu_kernel.as_ref().map(|kernel| step_with(kernel, &self.live));
        self.live = match gpu_result {
            Some(Ok(next)) => next,
            Some(Err(e)) => {
                log::warn!("GPU kernel failed ({}), switching to CPU kernel", e);
                self.gpu_kernel = None;
                step(&self.live)
            }
            None => step(&self.live),
        };
        self.generation += 1;
        self.last_step = Instant::now();
    }

    fn screen_size(&self) -> [f32; 2] {
        self.gpu
            .as_ref()
            .map(GpuContext::size)
            .unwrap_or([WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32])
    }

    fn view_params(&self, screen_size: [f32; 2]) -> ViewParams {
        ViewParams {
            screen_size,
            camera_offset: self.ui.camera.offset,
            button: BUTTON_RECT,
            zoom: self.ui.camera.zoom,
            cell_size: GRID_SIZE,
            running: u32::from(self.ui.running),
            hovered: u32::from(self.ui.button_hovered()),
            cell_color: CELL_COLOR,
            grid_color: GRID_COLOR,
            button_color: BUTTON_COLOR,
            button_hover: BUTTON_HOVER,
            glyph_color: BUTTON_GLYPH_COLOR,
        }
    }

    fn render(&mut self) {
        if self.ui.running && self.last_step.elapsed() >= STEP_INTERVAL {
            self.advance();
        }

        let params = self.view_params(self.screen_size());
        let (Some(gpu), Some(buffers), Some(render)) = (
            self.gpu.as_ref(),
            self.render_buffers.as_mut(),
            self.render_pipeline.as_ref(),
        ) else {
            return;
        };

        let cells: Vec<GpuCell> = self.live.iter().copied().map(GpuCell::from).collect();
        buffers.upload_cells(&gpu.device, &gpu.queue, &cells);
        buffers.update_view(&gpu.queue, &params);

        // Get surface texture
        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure surface
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let bind_group = render.create_bind_group(&gpu.device, &buffers.view_buffer);
        render.draw(
            &mut encoder,
            &view,
            &bind_group,
            &buffers.instance_buffer,
            buffers.instance_count(),
        );

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                let state = if self.ui.running { "Running" } else { "Paused" };
                window.set_title(&format!(
                    "Conway's Game of Life - {} - gen {} - {} cells - {:.0} FPS",
                    state,
                    self.generation,
                    self.live.len(),
                    fps
                ));
            }
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        let center = self.ui.view_center(self.screen_size());

        match key_code {
            KeyCode::Space => {
                self.ui.toggle_running();
            }

            // Single step while paused
            KeyCode::KeyN if !self.ui.running => {
                self.advance();
                log::info!("Generation {}: {} cells", self.generation, self.live.len());
            }

            KeyCode::KeyR => {
                let soup = random_soup(&mut rand::thread_rng(), center, SOUP_SIZE, SOUP_DENSITY);
                log::info!("Seeded {} random cells around ({}, {})", soup.len(), center.x, center.y);
                self.live.extend(soup);
            }

            KeyCode::KeyC => {
                self.live.clear();
                self.generation = 0;
                log::info!("Cleared");
            }

            KeyCode::Digit1
            | KeyCode::Digit2
            | KeyCode::Digit3
            | KeyCode::Digit4
            | KeyCode::Digit5
            | KeyCode::Digit6 => {
                let index = pattern_index(key_code);
                if let Some(pattern) = PATTERNS.get(index) {
                    self.live.extend(pattern.placed_at(center));
                    log::info!("Placed {} at ({}, {})", pattern.name, center.x, center.y);
                }
            }

            _ => {}
        }
    }

    fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) => self.ui.left_pressed(),
            (MouseButton::Left, ElementState::Released) => {
                self.ui.left_released(&mut self.live);
            }
            (MouseButton::Middle, ElementState::Pressed) => self.ui.middle_pressed(),
            (MouseButton::Middle, ElementState::Released) => self.ui.middle_released(),
            _ => {}
        }
    }
}

fn pattern_index(key_code: KeyCode) -> usize {
    match key_code {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        _ => 5,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing Game of Life editor...");

        // Create window
        let window_attrs = Window::default_attributes()
            .with_title("Conway's Game of Life")
            .with_inner_size(winit::dpi::PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Initialize GPU
        log::info!("Creating GPU context...");
        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("Failed to initialize rendering: {}", e);
                event_loop.exit();
                return;
            }
        };

        if self.kernel_choice == KernelChoice::Gpu {
            log::info!("Creating GPU kernel...");
            self.gpu_kernel = match GpuKernel::new() {
                Ok(kernel) => Some(kernel),
                Err(e) => {
                    log::warn!("GPU kernel unavailable ({}), using CPU kernel", e);
                    None
                }
            };
        }

        log::info!("Creating render pipeline...");
        let render_pipeline = RenderPipeline::new(&gpu.device, gpu.format());
        let render_buffers = RenderBuffers::new(&gpu.device);

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Left click: Toggle cell");
        log::info!("  Left/middle drag: Pan view");
        log::info!("  Wheel: Zoom");
        log::info!("  Space or button: Play/pause");
        log::info!("  N: Single step (paused)");
        log::info!("  1-6: Place pattern");
        log::info!("  R: Random soup");
        log::info!("  C: Clear");
        log::info!("  Escape: Quit");

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.render_buffers = Some(render_buffers);
        self.render_pipeline = Some(render_pipeline);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.ui.cursor_moved([position.x as f32, position.y as f32]);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(state, button);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_WHEEL_LINE,
                };
                self.ui.wheel(lines);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                // Request another frame immediately
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_choice_from_env() {
        assert_eq!(KernelChoice::from_env(None), KernelChoice::Cpu);
        assert_eq!(KernelChoice::from_env(Some("cpu")), KernelChoice::Cpu);
        assert_eq!(KernelChoice::from_env(Some(" GPU ")), KernelChoice::Gpu);
        assert_eq!(KernelChoice::from_env(Some("cuda")), KernelChoice::Cpu);
    }

    #[test]
    fn test_pattern_keys_cover_all_patterns() {
        assert_eq!(pattern_index(KeyCode::Digit6), PATTERNS.len() - 1);
    }
}
