mod camera;
mod editor;

pub use camera::Camera;
pub use editor::UiState;
