use gl_render::core::math::Colorf32;
use gl_render::core::rendering::buffer::IndexBuffer;
use gl_render::core::rendering::device::RenderDevice;
use gl_render::core::rendering::shader::Shader;
use gl_render::core::rendering::vertex_array::VertexArray;
use gl_render::gl_call;

/// Issues frame level commands against a device. Holds no state of its own:
/// every draw binds what it needs first.
pub struct Renderer<'a> {
    device: &'a dyn RenderDevice,
}

impl<'a> Renderer<'a> {
    pub fn new(device: &'a dyn RenderDevice) -> Self {
        Renderer { device }
    }

    pub fn clear(&self) {
        gl_call!(self.device, self.device.clear(glow::COLOR_BUFFER_BIT));
    }

    pub fn set_clear_color(&self, color: Colorf32) {
        gl_call!(
            self.device,
            self.device.clear_color(color.x, color.y, color.z, color.w)
        );
    }

    pub fn set_viewport(&self, x: u32, y: u32, width: u32, height: u32) {
        gl_call!(
            self.device,
            self.device
                .viewport(x as i32, y as i32, width as i32, height as i32)
        );
    }

    /// Standard alpha blending, needed by textures with transparent texels
    pub fn enable_blending(&self) {
        gl_call!(self.device, self.device.enable(glow::BLEND));
        gl_call!(
            self.device,
            self.device
                .blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA)
        );
    }

    pub fn draw(&self, vertex_array: &VertexArray, index_buffer: &IndexBuffer, shader: &Shader) {
        shader.bind();
        vertex_array.bind();
        index_buffer.bind();

        // IndexBuffer::new caps the count at i32::MAX
        let count = i32::try_from(index_buffer.get_count()).unwrap_or(i32::MAX);
        gl_call!(
            self.device,
            self.device.draw_elements(
                glow::TRIANGLES,
                count,
                glow::UNSIGNED_INT,
                0
            )
        );
    }

    pub fn log_device_info(&self) {
        let device = self.device;
        let version = gl_call!(device, device.get_parameter_string(glow::VERSION));
        let renderer = gl_call!(device, device.get_parameter_string(glow::RENDERER));
        let vendor = gl_call!(device, device.get_parameter_string(glow::VENDOR));

        log::info!("OpenGL device ready");
        log::info!("\tOpenGL Version: {}", version);
        log::info!("\tOpenGL Renderer: {}", renderer);
        log::info!("\tOpenGL Vendor: {}", vendor);
    }

    #[inline(always)]
    pub fn get_device(&self) -> &'a dyn RenderDevice {
        self.device
    }
}
