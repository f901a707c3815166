pub mod renderer;
pub mod shaders;

pub use renderer::{CapturedFrame, FrameUniforms, GlRenderer, RendererError};
