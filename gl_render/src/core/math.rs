pub use glam;

/// RGBA color, each channel in [0, 1]
pub type Colorf32 = glam::Vec4;
