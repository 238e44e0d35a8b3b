use std::num::NonZeroU32;
use thiserror::Error;

/// Name of a device object (buffer, vertex array, shader, program, texture).
/// The device never hands out zero, so an invalid object can't be represented.
pub type RawHandle = NonZeroU32;

/// Location of a uniform inside a linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The driver refused to create an object of this kind
    #[error("could not create {kind}: {reason}")]
    CreationFailed { kind: &'static str, reason: String },
}

impl DeviceError {
    pub(crate) fn creation(kind: &'static str) -> impl FnOnce(String) -> DeviceError {
        move |reason| DeviceError::CreationFailed { kind, reason }
    }
}

/// The subset of the graphics API the resource wrappers are written against.
///
/// Enum-like arguments (targets, stages, parameters) use the raw `glow`
/// constants. Implementations are expected to be driven from the single
/// thread that owns the graphics context, so every method takes `&self`.
pub trait RenderDevice {
    // Buffers
    fn create_buffer(&self) -> Result<RawHandle, String>;
    fn bind_buffer(&self, target: u32, buffer: Option<RawHandle>);
    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32);
    fn delete_buffer(&self, buffer: RawHandle);

    // Vertex arrays
    fn create_vertex_array(&self) -> Result<RawHandle, String>;
    fn bind_vertex_array(&self, vertex_array: Option<RawHandle>);
    fn delete_vertex_array(&self, vertex_array: RawHandle);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );
    fn vertex_attrib_pointer_i32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        stride: i32,
        offset: i32,
    );

    // Shaders and programs
    fn create_shader(&self, shader_type: u32) -> Result<RawHandle, String>;
    fn shader_source(&self, shader: RawHandle, source: &str);
    fn compile_shader(&self, shader: RawHandle);
    fn get_shader_compile_status(&self, shader: RawHandle) -> bool;
    fn get_shader_info_log(&self, shader: RawHandle) -> String;
    fn delete_shader(&self, shader: RawHandle);
    fn create_program(&self) -> Result<RawHandle, String>;
    fn attach_shader(&self, program: RawHandle, shader: RawHandle);
    fn detach_shader(&self, program: RawHandle, shader: RawHandle);
    fn link_program(&self, program: RawHandle);
    fn get_program_link_status(&self, program: RawHandle) -> bool;
    fn get_program_info_log(&self, program: RawHandle) -> String;
    fn use_program(&self, program: Option<RawHandle>);
    fn delete_program(&self, program: RawHandle);

    // Uniforms
    fn get_uniform_location(&self, program: RawHandle, name: &str) -> Option<UniformLocation>;
    fn uniform_1_i32(&self, location: UniformLocation, x: i32);
    fn uniform_1_f32(&self, location: UniformLocation, x: f32);
    fn uniform_4_f32(&self, location: UniformLocation, x: f32, y: f32, z: f32, w: f32);
    fn uniform_matrix_4_f32_slice(&self, location: UniformLocation, transpose: bool, v: &[f32]);

    // Textures
    fn create_texture(&self) -> Result<RawHandle, String>;
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, target: u32, texture: Option<RawHandle>);
    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32);
    #[allow(clippy::too_many_arguments)]
    fn tex_image_2d(
        &self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        border: i32,
        format: u32,
        ty: u32,
        pixels: Option<&[u8]>,
    );
    fn delete_texture(&self, texture: RawHandle);

    // Frame state and drawing
    fn clear(&self, mask: u32);
    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn enable(&self, capability: u32);
    fn blend_func(&self, src: u32, dst: u32);
    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32);

    // Queries
    fn get_error(&self) -> u32;
    fn get_parameter_string(&self, parameter: u32) -> String;
}

/// Wraps a device call with error checking in debug builds.
///
/// Pending errors are drained before the call; any error recorded by the
/// call itself is logged and aborts with a panic. Release builds run the
/// call unchecked.
#[macro_export]
macro_rules! gl_call {
    ($device:expr, $call:expr) => {{
        #[cfg(debug_assertions)]
        $crate::core::rendering::device::clear_errors($device);
        let result = $call;
        #[cfg(debug_assertions)]
        $crate::core::rendering::device::check_errors(
            $device,
            stringify!($call),
            file!(),
            line!(),
        );
        result
    }};
}

/// Discard every error the device has queued so far
pub fn clear_errors(device: &dyn RenderDevice) {
    while device.get_error() != glow::NO_ERROR {}
}

/// Drain and log the device error queue, panicking if it wasn't empty
pub fn check_errors(device: &dyn RenderDevice, call: &str, file: &str, line: u32) {
    let mut had_error = false;
    loop {
        let error = device.get_error();
        if error == glow::NO_ERROR {
            break;
        }
        had_error = true;
        log::error!(
            "[OpenGL Error] ({:#06x} {}) {} {}:{}",
            error,
            error_name(error),
            call,
            file,
            line
        );
    }

    assert!(!had_error, "OpenGL call failed: {}", call);
}

pub fn error_name(error: u32) -> &'static str {
    match error {
        glow::NO_ERROR => "NO_ERROR",
        glow::INVALID_ENUM => "INVALID_ENUM",
        glow::INVALID_VALUE => "INVALID_VALUE",
        glow::INVALID_OPERATION => "INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "STACK_OVERFLOW",
        _ => "UNKNOWN_ERROR",
    }
}
