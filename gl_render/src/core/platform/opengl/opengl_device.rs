use std::ffi::{c_void, CStr};

use glow::{
    Context, HasContext, NativeBuffer, NativeProgram, NativeShader, NativeTexture,
    NativeUniformLocation, NativeVertexArray,
};
use gl_render::core::rendering::device::{RawHandle, RenderDevice, UniformLocation};

/// [RenderDevice] backed by a `glow` OpenGL context.
///
/// The context is only valid on the thread it was made current on, and
/// every resource borrowing this device must be dropped before the context
/// is destroyed.
pub struct OpenGLDevice {
    gl: Context,
}

impl OpenGLDevice {
    pub fn new(gl: Context) -> Self {
        OpenGLDevice { gl }
    }

    /// Load every GL entry point through `loader`.
    ///
    /// # Safety
    /// A context has to be current on the calling thread, and `loader` must
    /// return function pointers valid for it.
    pub unsafe fn from_loader_function_cstr<F>(loader: F) -> Self
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        Self::new(Context::from_loader_function_cstr(loader))
    }

    #[inline(always)]
    pub fn get_context(&self) -> &Context {
        &self.gl
    }
}

impl RenderDevice for OpenGLDevice {
    fn create_buffer(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_buffer().map(|buffer| buffer.0) }
    }

    fn bind_buffer(&self, target: u32, buffer: Option<RawHandle>) {
        unsafe { self.gl.bind_buffer(target, buffer.map(NativeBuffer)) }
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        unsafe { self.gl.buffer_data_u8_slice(target, data, usage) }
    }

    fn delete_buffer(&self, buffer: RawHandle) {
        unsafe { self.gl.delete_buffer(NativeBuffer(buffer)) }
    }

    fn create_vertex_array(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_vertex_array().map(|array| array.0) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<RawHandle>) {
        unsafe {
            self.gl
                .bind_vertex_array(vertex_array.map(NativeVertexArray))
        }
    }

    fn delete_vertex_array(&self, vertex_array: RawHandle) {
        unsafe { self.gl.delete_vertex_array(NativeVertexArray(vertex_array)) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, size, data_type, normalized, stride, offset)
        }
    }

    fn vertex_attrib_pointer_i32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_i32(index, size, data_type, stride, offset)
        }
    }

    fn create_shader(&self, shader_type: u32) -> Result<RawHandle, String> {
        unsafe { self.gl.create_shader(shader_type).map(|shader| shader.0) }
    }

    fn shader_source(&self, shader: RawHandle, source: &str) {
        unsafe { self.gl.shader_source(NativeShader(shader), source) }
    }

    fn compile_shader(&self, shader: RawHandle) {
        unsafe { self.gl.compile_shader(NativeShader(shader)) }
    }

    fn get_shader_compile_status(&self, shader: RawHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(NativeShader(shader)) }
    }

    fn get_shader_info_log(&self, shader: RawHandle) -> String {
        unsafe { self.gl.get_shader_info_log(NativeShader(shader)) }
    }

    fn delete_shader(&self, shader: RawHandle) {
        unsafe { self.gl.delete_shader(NativeShader(shader)) }
    }

    fn create_program(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_program().map(|program| program.0) }
    }

    fn attach_shader(&self, program: RawHandle, shader: RawHandle) {
        unsafe {
            self.gl
                .attach_shader(NativeProgram(program), NativeShader(shader))
        }
    }

    fn detach_shader(&self, program: RawHandle, shader: RawHandle) {
        unsafe {
            self.gl
                .detach_shader(NativeProgram(program), NativeShader(shader))
        }
    }

    fn link_program(&self, program: RawHandle) {
        unsafe { self.gl.link_program(NativeProgram(program)) }
    }

    fn get_program_link_status(&self, program: RawHandle) -> bool {
        unsafe { self.gl.get_program_link_status(NativeProgram(program)) }
    }

    fn get_program_info_log(&self, program: RawHandle) -> String {
        unsafe { self.gl.get_program_info_log(NativeProgram(program)) }
    }

    fn use_program(&self, program: Option<RawHandle>) {
        unsafe { self.gl.use_program(program.map(NativeProgram)) }
    }

    fn delete_program(&self, program: RawHandle) {
        unsafe { self.gl.delete_program(NativeProgram(program)) }
    }

    fn get_uniform_location(&self, program: RawHandle, name: &str) -> Option<UniformLocation> {
        unsafe {
            self.gl
                .get_uniform_location(NativeProgram(program), name)
                .map(|location| UniformLocation(location.0))
        }
    }

    fn uniform_1_i32(&self, location: UniformLocation, x: i32) {
        let location = NativeUniformLocation(location.0);
        unsafe { self.gl.uniform_1_i32(Some(&location), x) }
    }

    fn uniform_1_f32(&self, location: UniformLocation, x: f32) {
        let location = NativeUniformLocation(location.0);
        unsafe { self.gl.uniform_1_f32(Some(&location), x) }
    }

    fn uniform_4_f32(&self, location: UniformLocation, x: f32, y: f32, z: f32, w: f32) {
        let location = NativeUniformLocation(location.0);
        unsafe { self.gl.uniform_4_f32(Some(&location), x, y, z, w) }
    }

    fn uniform_matrix_4_f32_slice(&self, location: UniformLocation, transpose: bool, v: &[f32]) {
        let location = NativeUniformLocation(location.0);
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(Some(&location), transpose, v)
        }
    }

    fn create_texture(&self) -> Result<RawHandle, String> {
        unsafe { self.gl.create_texture().map(|texture| texture.0) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(unit) }
    }

    fn bind_texture(&self, target: u32, texture: Option<RawHandle>) {
        unsafe { self.gl.bind_texture(target, texture.map(NativeTexture)) }
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        unsafe { self.gl.tex_parameter_i32(target, parameter, value) }
    }

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
    ) {
        unsafe {
            self.gl.tex_image_2d(
                target,
                level,
                internal_format,
                width,
                height,
                border,
                format,
                ty,
                pixels,
            )
        }
    }

    fn delete_texture(&self, texture: RawHandle) {
        unsafe { self.gl.delete_texture(NativeTexture(texture)) }
    }

    fn clear(&self, mask: u32) {
        unsafe { self.gl.clear(mask) }
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { self.gl.clear_color(red, green, blue, alpha) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn enable(&self, capability: u32) {
        unsafe { self.gl.enable(capability) }
    }

    fn blend_func(&self, src: u32, dst: u32) {
        unsafe { self.gl.blend_func(src, dst) }
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        unsafe { self.gl.draw_elements(mode, count, element_type, offset) }
    }

    fn get_error(&self) -> u32 {
        unsafe { self.gl.get_error() }
    }

    fn get_parameter_string(&self, parameter: u32) -> String {
        unsafe { self.gl.get_parameter_string(parameter) }
    }
}
