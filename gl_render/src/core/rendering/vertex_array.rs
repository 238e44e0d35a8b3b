use gl_render::core::rendering::buffer::{BufferLayout, VertexBuffer};
use gl_render::core::rendering::device::{DeviceError, RawHandle, RenderDevice};
use gl_render::gl_call;

/// Binding state tying vertex buffers to the attribute slots of the vertex stage.
///
/// The array records which buffers it was configured with but doesn't own
/// them: every buffer added has to outlive the array.
pub struct VertexArray<'a> {
    device: &'a dyn RenderDevice,
    native_array: RawHandle,
    vertex_buffers: Vec<RawHandle>,
    attribute_count: u32,
}

impl<'a> VertexArray<'a> {
    pub fn new(device: &'a dyn RenderDevice) -> Result<Self, DeviceError> {
        let native_array = gl_call!(device, device.create_vertex_array())
            .map_err(DeviceError::creation("vertex array"))?;
        log::trace!("Created vertex array {}", native_array);

        Ok(VertexArray {
            device,
            native_array,
            vertex_buffers: Vec::new(),
            attribute_count: 0,
        })
    }

    /// Describe `vertex_buffer` to the vertex stage using `layout`.
    ///
    /// Attributes take consecutive slots in push order, so the layout has to
    /// match the order the shader declares its inputs in. A second buffer
    /// continues after the slots taken by the first.
    pub fn add_buffer(&mut self, vertex_buffer: &VertexBuffer, layout: &BufferLayout) {
        self.bind();
        vertex_buffer.bind();

        let device = self.device;
        let stride = layout.get_stride() as i32;
        for element in layout.iter() {
            let columns = element.get_column_count();
            let rows = element.get_column_component_count();
            let column_size = element.get_component_type().get_size() * rows;

            for column in 0..columns {
                let index = self.attribute_count;
                let offset = (element.get_offset() + column * column_size) as i32;
                let data_type = element.get_component_type().get_gl_type();

                gl_call!(device, device.enable_vertex_attrib_array(index));
                if element.get_component_type().is_integer() && !element.is_normalized() {
                    gl_call!(
                        device,
                        device.vertex_attrib_pointer_i32(
                            index,
                            rows as i32,
                            data_type,
                            stride,
                            offset
                        )
                    );
                } else {
                    gl_call!(
                        device,
                        device.vertex_attrib_pointer_f32(
                            index,
                            rows as i32,
                            data_type,
                            element.is_normalized(),
                            stride,
                            offset
                        )
                    );
                }
                self.attribute_count += 1;
            }
        }

        self.vertex_buffers.push(vertex_buffer.get_native_buffer());
    }

    pub fn bind(&self) {
        gl_call!(
            self.device,
            self.device.bind_vertex_array(Some(self.native_array))
        );
    }

    pub fn unbind(&self) {
        gl_call!(self.device, self.device.bind_vertex_array(None));
    }

    /// Number of attribute slots enabled so far
    #[inline(always)]
    pub fn get_attribute_count(&self) -> u32 {
        self.attribute_count
    }

    #[inline(always)]
    pub fn get_vertex_buffers(&self) -> &[RawHandle] {
        &self.vertex_buffers
    }
}

impl Drop for VertexArray<'_> {
    fn drop(&mut self) {
        log::trace!("Deleting vertex array {}", self.native_array);
        gl_call!(
            self.device,
            self.device.delete_vertex_array(self.native_array)
        );
    }
}
