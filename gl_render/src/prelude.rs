pub use crate::core::math::{glam, Colorf32};
pub use crate::core::platform::opengl::opengl_device::OpenGLDevice;
pub use crate::core::rendering::buffer::{
    BufferElement, BufferLayout, ComponentType, IndexBuffer, VertexBuffer,
};
pub use crate::core::rendering::device::{DeviceError, RenderDevice};
pub use crate::core::rendering::renderer::Renderer;
pub use crate::core::rendering::shader::{
    parse_shader, Shader, ShaderDataType, ShaderError, ShaderProgramSource, ShaderStage,
};
pub use crate::core::rendering::texture::{Texture, TextureError};
pub use crate::core::rendering::vertex_array::VertexArray;
pub use crate::gl_call;
