// -- < Testing buffers and layouts > ---------------------------
#[cfg(test)]
pub mod buffer_test {
    use super::super::recording_device::{DeviceCall, RecordingDevice};
    use crate::core::rendering::buffer::{
        checked_index_count, BufferElement, BufferLayout, ComponentType, IndexBuffer,
        VertexBuffer, MAX_INDEX_COUNT,
    };
    use crate::core::rendering::device::DeviceError;
    use crate::core::rendering::shader::ShaderDataType;

    #[test]
    fn test_layout_stride_and_offsets() {
        let mut layout = BufferLayout::new();
        layout.push::<f32>(3).push::<f32>(2).push::<u8>(4).push::<u32>(1);

        let sizes: Vec<u32> = layout.iter().map(|element| element.get_size()).collect();
        assert_eq!(sizes, vec![12, 8, 4, 4]);
        assert_eq!(layout.get_stride(), sizes.iter().sum::<u32>());

        let mut expected_offset = 0;
        for (element, size) in layout.iter().zip(sizes.iter()) {
            assert_eq!(element.get_offset(), expected_offset);
            expected_offset += size;
        }
    }

    #[test]
    fn test_push_infers_component_type() {
        let mut layout = BufferLayout::new();
        layout.push::<f32>(2).push::<i32>(1).push::<u32>(1).push::<u8>(4);

        let elements = layout.get_buffer_elements();
        assert_eq!(elements[0].get_component_type(), ComponentType::Float);
        assert_eq!(elements[0].get_component_count(), 2);
        assert_eq!(elements[1].get_component_type(), ComponentType::Int);
        assert_eq!(elements[2].get_component_type(), ComponentType::UnsignedInt);
        assert_eq!(elements[3].get_component_type(), ComponentType::UnsignedByte);
        assert!(elements.iter().all(|element| !element.is_normalized()));
    }

    #[test]
    fn test_layout_from_elements() {
        let layout = BufferLayout::from_elements(vec![
            BufferElement::new("a_Position".into(), ShaderDataType::Float3, false),
            BufferElement::new("a_Color".into(), ShaderDataType::Float4, false),
            BufferElement::new("a_Model".into(), ShaderDataType::Mat4, false),
            BufferElement::new("a_Id".into(), ShaderDataType::Int, false),
        ]);

        let offsets: Vec<u32> = layout.iter().map(|element| element.get_offset()).collect();
        assert_eq!(offsets, vec![0, 12, 28, 92]);
        assert_eq!(layout.get_stride(), 96);
        assert_eq!(layout.get_buffer_elements()[1].get_name(), "a_Color");
        assert_eq!(
            layout.get_buffer_elements()[3].get_component_type(),
            ComponentType::Int
        );
    }

    #[test]
    fn test_matrix_columns_come_from_the_data_type() {
        let model = BufferElement::new("a_Model".into(), ShaderDataType::Mat3, false);
        assert_eq!(model.get_component_count(), 9);
        assert_eq!(model.get_column_count(), 3);
        assert_eq!(model.get_column_component_count(), 3);

        let color = BufferElement::new("a_Color".into(), ShaderDataType::Float4, false);
        assert_eq!(color.get_column_count(), 1);
        assert_eq!(color.get_column_component_count(), 4);
    }

    #[test]
    fn test_push_normalized_bytes() {
        let mut layout = BufferLayout::new();
        layout.push::<f32>(2).push_normalized::<u8>(4);

        let color = &layout.get_buffer_elements()[1];
        assert_eq!(color.get_component_type(), ComponentType::UnsignedByte);
        assert_eq!(color.get_component_count(), 4);
        assert!(color.is_normalized());
        assert_eq!(color.get_offset(), 8);
        assert_eq!(layout.get_stride(), 12);
    }

    #[test]
    #[should_panic(expected = "a slot holds 1 to 4")]
    fn test_push_rejects_more_than_a_slot() {
        BufferLayout::new().push::<f32>(8);
    }

    #[test]
    #[should_panic(expected = "a slot holds 1 to 4")]
    fn test_push_rejects_zero_components() {
        BufferLayout::new().push::<u8>(0);
    }

    #[test]
    #[should_panic(expected = "a slot holds 1 to 4")]
    fn test_element_rejects_sixteen_bytes() {
        BufferElement::from_components("a_Bytes".into(), ComponentType::UnsignedByte, 16, true);
    }

    #[test]
    fn test_empty_layout() {
        let layout = BufferLayout::new();
        assert_eq!(layout.get_stride(), 0);
        assert!(layout.get_buffer_elements().is_empty());
    }

    #[test]
    fn test_vertex_buffer_uploads_bytes_verbatim() {
        let device = RecordingDevice::new();
        let positions: [f32; 4] = [-0.5, -0.5, 0.5, 0.5];

        let buffer = VertexBuffer::new(&device, &positions).unwrap();
        assert_eq!(buffer.get_size(), 16);

        let expected: Vec<u8> = positions.iter().flat_map(|v| v.to_ne_bytes()).collect();
        let calls = device.calls();
        assert!(calls.contains(&DeviceCall::BindBuffer(
            glow::ARRAY_BUFFER,
            Some(buffer.get_native_buffer())
        )));
        assert!(calls.contains(&DeviceCall::BufferData {
            target: glow::ARRAY_BUFFER,
            data: expected,
            usage: glow::STATIC_DRAW,
        }));
    }

    #[test]
    fn test_vertex_buffer_released_on_drop() {
        let device = RecordingDevice::new();
        let handle = {
            let buffer = VertexBuffer::from_bytes(&device, &[0u8; 32]).unwrap();
            buffer.unbind();
            buffer.get_native_buffer()
        };

        assert_eq!(device.live_objects(), 0);
        assert_eq!(device.calls().last(), Some(&DeviceCall::DeleteBuffer(handle)));
    }

    #[test]
    fn test_index_buffer_count() {
        let device = RecordingDevice::new();
        for count in [0usize, 1, 6, 1000] {
            let indices: Vec<u32> = (0..count as u32).collect();
            let index_buffer = IndexBuffer::new(&device, &indices).unwrap();
            assert_eq!(index_buffer.get_count(), count as u32);
        }
        assert_eq!(device.live_objects(), 0);
    }

    #[test]
    fn test_index_buffer_targets_element_array() {
        let device = RecordingDevice::new();
        let index_buffer = IndexBuffer::new(&device, &[0, 1, 2, 2, 3, 0]).unwrap();
        device.clear_calls();

        index_buffer.bind();
        index_buffer.unbind();
        let calls = device.calls();
        assert!(matches!(
            calls[0],
            DeviceCall::BindBuffer(glow::ELEMENT_ARRAY_BUFFER, Some(_))
        ));
        assert_eq!(
            calls[1],
            DeviceCall::BindBuffer(glow::ELEMENT_ARRAY_BUFFER, None)
        );
    }

    #[test]
    fn test_index_count_limit() {
        assert_eq!(checked_index_count(6), Ok(6));
        assert_eq!(
            checked_index_count(MAX_INDEX_COUNT),
            Ok(i32::MAX as u32)
        );
        assert!(matches!(
            checked_index_count(MAX_INDEX_COUNT + 1),
            Err(DeviceError::CreationFailed {
                kind: "index buffer",
                ..
            })
        ));
    }
}
