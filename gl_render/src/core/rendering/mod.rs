pub mod buffer;
pub mod device;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod vertex_array;
