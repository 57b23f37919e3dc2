//! wgpu forward rendering for the mascot scene.

pub mod context;
pub mod renderer;
pub mod settings;

pub use renderer::Renderer;
pub use settings::{RenderSettings, Rgba};
