use gl_render::prelude::{DeviceError, ShaderError, TextureError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("could not create the event loop: {0}")]
    EventLoop(String),
    #[error("could not create the window: {0}")]
    Window(String),
    #[error("OpenGL context error: {0}")]
    Context(String),
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Device(#[from] DeviceError),
}
