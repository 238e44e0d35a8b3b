pub mod core;
pub mod prelude;

// Lets the crate refer to itself by name, the same way downstream code does.
extern crate self as gl_render;

#[cfg(any(test, feature = "recording"))]
mod tests;

/// A device that records calls instead of drawing, for testing code built on this crate
#[cfg(feature = "recording")]
pub mod recording {
    pub use crate::tests::recording_device::{DeviceCall, RecordingDevice, UniformValue};
}
