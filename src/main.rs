mod app;

use winit::event_loop::{ControlFlow, EventLoop};

use app::{App, KernelChoice};
use sparse_life::config::KERNEL_ENV_VAR;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let kernel = KernelChoice::from_env(std::env::var(KERNEL_ENV_VAR).ok().as_deref());
    log::info!("Requested kernel: {:?}", kernel);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(kernel);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
