use gl_render::core::rendering::device::{DeviceError, RawHandle, RenderDevice};
use gl_render::core::rendering::shader::ShaderDataType;
use gl_render::gl_call;
use std::slice::Iter;

/// A block of vertex data living on the device.
///
/// Data is uploaded once on creation and never changes afterwards.
pub struct VertexBuffer<'a> {
    device: &'a dyn RenderDevice,
    native_buffer: RawHandle,
    size: usize,
}

impl<'a> VertexBuffer<'a> {
    pub fn new<T: bytemuck::Pod>(
        device: &'a dyn RenderDevice,
        vertices: &[T],
    ) -> Result<Self, DeviceError> {
        Self::from_bytes(device, bytemuck::cast_slice(vertices))
    }

    pub fn from_bytes(device: &'a dyn RenderDevice, bytes: &[u8]) -> Result<Self, DeviceError> {
        let native_buffer = gl_call!(device, device.create_buffer())
            .map_err(DeviceError::creation("vertex buffer"))?;
        gl_call!(device, device.bind_buffer(glow::ARRAY_BUFFER, Some(native_buffer)));
        gl_call!(
            device,
            device.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytes, glow::STATIC_DRAW)
        );
        log::trace!("Created vertex buffer {} ({} bytes)", native_buffer, bytes.len());

        Ok(VertexBuffer {
            device,
            native_buffer,
            size: bytes.len(),
        })
    }

    pub fn bind(&self) {
        gl_call!(
            self.device,
            self.device
                .bind_buffer(glow::ARRAY_BUFFER, Some(self.native_buffer))
        );
    }

    pub fn unbind(&self) {
        gl_call!(self.device, self.device.bind_buffer(glow::ARRAY_BUFFER, None));
    }

    /// Size in bytes of the uploaded data
    #[inline(always)]
    pub fn get_size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn get_native_buffer(&self) -> RawHandle {
        self.native_buffer
    }
}

impl Drop for VertexBuffer<'_> {
    fn drop(&mut self) {
        log::trace!("Deleting vertex buffer {}", self.native_buffer);
        gl_call!(self.device, self.device.delete_buffer(self.native_buffer));
    }
}

/// Most indices a single indexed draw can consume
pub const MAX_INDEX_COUNT: usize = i32::MAX as usize;

/// Element indices on the device, always `u32`
pub struct IndexBuffer<'a> {
    device: &'a dyn RenderDevice,
    native_buffer: RawHandle,
    element_count: u32,
}

impl<'a> IndexBuffer<'a> {
    /// Upload `indices`. Fails without touching the device when there are
    /// more than [MAX_INDEX_COUNT] of them.
    pub fn new(device: &'a dyn RenderDevice, indices: &[u32]) -> Result<Self, DeviceError> {
        let element_count = checked_index_count(indices.len())?;
        let native_buffer = gl_call!(device, device.create_buffer())
            .map_err(DeviceError::creation("index buffer"))?;
        gl_call!(
            device,
            device.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(native_buffer))
        );
        gl_call!(
            device,
            device.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW
            )
        );
        log::trace!("Created index buffer {} ({} indices)", native_buffer, indices.len());

        Ok(IndexBuffer {
            device,
            native_buffer,
            element_count,
        })
    }

    pub fn bind(&self) {
        gl_call!(
            self.device,
            self.device
                .bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.native_buffer))
        );
    }

    pub fn unbind(&self) {
        gl_call!(
            self.device,
            self.device.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None)
        );
    }

    /// Number of indices supplied on creation
    #[inline(always)]
    pub fn get_count(&self) -> u32 {
        self.element_count
    }
}

pub(crate) fn checked_index_count(len: usize) -> Result<u32, DeviceError> {
    if len > MAX_INDEX_COUNT {
        return Err(DeviceError::creation("index buffer")(format!(
            "{} indices exceed the limit of {}",
            len, MAX_INDEX_COUNT
        )));
    }
    Ok(len as u32)
}

impl Drop for IndexBuffer<'_> {
    fn drop(&mut self) {
        log::trace!("Deleting index buffer {}", self.native_buffer);
        gl_call!(self.device, self.device.delete_buffer(self.native_buffer));
    }
}

/// Scalar type of a single vertex attribute component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Float,
    Int,
    UnsignedInt,
    UnsignedByte,
}

impl ComponentType {
    /// Size in bytes of one component
    pub fn get_size(&self) -> u32 {
        match self {
            ComponentType::Float | ComponentType::Int | ComponentType::UnsignedInt => 4,
            ComponentType::UnsignedByte => 1,
        }
    }

    pub fn get_gl_type(&self) -> u32 {
        match self {
            ComponentType::Float => glow::FLOAT,
            ComponentType::Int => glow::INT,
            ComponentType::UnsignedInt => glow::UNSIGNED_INT,
            ComponentType::UnsignedByte => glow::UNSIGNED_BYTE,
        }
    }

    /// Whether the vertex stage reads this component as an integer
    pub fn is_integer(&self) -> bool {
        matches!(self, ComponentType::Int | ComponentType::UnsignedInt)
    }
}

/// Rust types that can be pushed into a [BufferLayout]
pub trait VertexComponent {
    const COMPONENT_TYPE: ComponentType;
}

impl VertexComponent for f32 {
    const COMPONENT_TYPE: ComponentType = ComponentType::Float;
}

impl VertexComponent for i32 {
    const COMPONENT_TYPE: ComponentType = ComponentType::Int;
}

impl VertexComponent for u32 {
    const COMPONENT_TYPE: ComponentType = ComponentType::UnsignedInt;
}

impl VertexComponent for u8 {
    const COMPONENT_TYPE: ComponentType = ComponentType::UnsignedByte;
}

/// Ordered description of the attributes interleaved in a vertex buffer
#[derive(Debug, Default, Clone)]
pub struct BufferLayout {
    elements: Vec<BufferElement>,
    stride: u32,
}

impl BufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<BufferElement>) -> Self {
        let mut layout = BufferLayout {
            elements,
            stride: 0,
        };

        layout.compute_offset_and_stride();

        layout
    }

    /// Append `count` components of `T` after the attributes pushed so far.
    ///
    /// Panics unless `count` is between 1 and 4, the most a single
    /// attribute slot can hold.
    pub fn push<T: VertexComponent>(&mut self, count: u32) -> &mut Self {
        self.push_element(T::COMPONENT_TYPE, count, false)
    }

    /// Like [BufferLayout::push], but the vertex stage reads the components
    /// mapped to [0, 1] (or [-1, 1] for signed types) as floats
    pub fn push_normalized<T: VertexComponent>(&mut self, count: u32) -> &mut Self {
        self.push_element(T::COMPONENT_TYPE, count, true)
    }

    fn push_element(
        &mut self,
        component_type: ComponentType,
        count: u32,
        normalized: bool,
    ) -> &mut Self {
        let name = format!("a_Attribute{}", self.elements.len());
        let mut element = BufferElement::from_components(name, component_type, count, normalized);
        element.offset = self.stride;
        self.stride += element.size;
        self.elements.push(element);
        self
    }

    fn compute_offset_and_stride(&mut self) {
        let mut offset = 0;
        for element in self.elements.iter_mut() {
            element.offset = offset;
            offset += element.size;
        }

        self.stride = offset;
    }

    #[inline(always)]
    pub fn get_buffer_elements(&self) -> &Vec<BufferElement> {
        &self.elements
    }

    #[inline(always)]
    pub fn get_stride(&self) -> u32 {
        self.stride
    }

    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, BufferElement> {
        self.elements.iter()
    }
}

/// Describes a buffer element, part of the vertex data to send to a shader
#[derive(Debug, Clone, PartialEq)]
pub struct BufferElement {
    name: String,
    component_type: ComponentType,
    component_count: u32,
    // Matrices are split in one attribute slot per column
    column_count: u32,
    size: u32,
    offset: u32,
    normalized: bool,
}

/// Most components a single attribute slot can hold
pub const MAX_SLOT_COMPONENTS: u32 = 4;

impl BufferElement {
    pub fn new(name: String, data_type: ShaderDataType, normalized: bool) -> Self {
        let (component_type, column_count) = match data_type {
            ShaderDataType::Int
            | ShaderDataType::Int2
            | ShaderDataType::Int3
            | ShaderDataType::Int4 => (ComponentType::Int, 1),
            ShaderDataType::Bool => (ComponentType::UnsignedByte, 1),
            ShaderDataType::Mat3 => (ComponentType::Float, 3),
            ShaderDataType::Mat4 => (ComponentType::Float, 4),
            ShaderDataType::Float
            | ShaderDataType::Float2
            | ShaderDataType::Float3
            | ShaderDataType::Float4 => (ComponentType::Float, 1),
        };
        let component_count = data_type.get_component_count();

        BufferElement {
            size: component_type.get_size() * component_count,
            name,
            component_type,
            component_count,
            column_count,
            normalized,
            offset: 0,
        }
    }

    /// Element of `count` components of `component_type` filling one slot.
    ///
    /// Panics unless `count` is between 1 and 4.
    pub fn from_components(
        name: String,
        component_type: ComponentType,
        count: u32,
        normalized: bool,
    ) -> Self {
        assert!(
            (1..=MAX_SLOT_COMPONENTS).contains(&count),
            "Attribute '{}' has {} components, a slot holds 1 to {}",
            name,
            count,
            MAX_SLOT_COMPONENTS
        );

        BufferElement {
            size: component_type.get_size() * count,
            name,
            component_type,
            component_count: count,
            column_count: 1,
            normalized,
            offset: 0,
        }
    }

    #[inline(always)]
    pub fn get_component_count(&self) -> u32 {
        self.component_count
    }

    /// Attribute slots taken by this element, one per matrix column
    #[inline(always)]
    pub fn get_column_count(&self) -> u32 {
        self.column_count
    }

    /// Components held by each slot
    #[inline(always)]
    pub fn get_column_component_count(&self) -> u32 {
        self.component_count / self.column_count
    }

    #[inline(always)]
    pub fn get_component_type(&self) -> ComponentType {
        self.component_type
    }

    #[inline(always)]
    pub fn get_size(&self) -> u32 {
        self.size
    }

    #[inline(always)]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    #[inline(always)]
    pub fn get_offset(&self) -> u32 {
        self.offset
    }

    #[inline(always)]
    pub fn get_name(&self) -> &str {
        self.name.as_str()
    }
}
