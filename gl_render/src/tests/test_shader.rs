// -- < Testing shader parsing, compilation and uniforms > ---------------------------
#[cfg(test)]
pub mod shader_test {
    use super::super::recording_device::{DeviceCall, RecordingDevice, UniformValue};
    use crate::core::rendering::device::UniformLocation;
    use crate::core::rendering::shader::{parse_shader, Shader, ShaderError, ShaderStage};

    const BASIC_SHADER: &str = "#shader vertex
#version 330 core

layout(location = 0) in vec4 position;

void main()
{
    gl_Position = position;
}

#shader fragment
#version 330 core

layout(location = 0) out vec4 color;

uniform vec4 u_Color;

void main()
{
    color = u_Color;
}
";

    fn stage_lines(source: &str) -> Vec<&str> {
        source.lines().collect()
    }

    #[test]
    fn test_parse_splits_stages_in_order() {
        let sources = parse_shader(BASIC_SHADER);

        assert!(!sources.vertex_source.is_empty());
        assert!(!sources.fragment_source.is_empty());
        assert_eq!(
            stage_lines(&sources.vertex_source),
            vec![
                "#version 330 core",
                "",
                "layout(location = 0) in vec4 position;",
                "",
                "void main()",
                "{",
                "    gl_Position = position;",
                "}",
                "",
            ]
        );
        assert!(sources.fragment_source.starts_with("#version 330 core\n"));
        assert!(sources.fragment_source.contains("uniform vec4 u_Color;\n"));
        assert!(!sources.vertex_source.contains("#shader"));
        assert!(!sources.fragment_source.contains("#shader"));
    }

    #[test]
    fn test_parse_reassembles_non_directive_lines() {
        let sources = parse_shader(BASIC_SHADER);
        let original: Vec<&str> = BASIC_SHADER
            .lines()
            .filter(|line| !line.contains("#shader"))
            .collect();
        let combined = format!("{}{}", sources.vertex_source, sources.fragment_source);

        assert_eq!(stage_lines(&combined), original);
    }

    #[test]
    fn test_parse_drops_lines_before_directive() {
        let source = "// header comment\nstray line\n#shader fragment\nvoid main() {}\n#shader vertex\nvoid main() {}";
        let sources = parse_shader(source);

        assert_eq!(sources.vertex_source, "void main() {}\n");
        assert_eq!(sources.fragment_source, "void main() {}\n");
        assert!(!sources.vertex_source.contains("stray"));
        assert!(!sources.fragment_source.contains("header"));
    }

    #[test]
    fn test_parse_unknown_directive_deselects_stage() {
        let source = "#shader vertex\na\n#shader geometry\nb\n#shader fragment\nc\n";
        let sources = parse_shader(source);

        assert_eq!(sources.vertex_source, "a\n");
        assert_eq!(sources.fragment_source, "c\n");
    }

    #[test]
    fn test_parse_empty_source() {
        let sources = parse_shader("");
        assert!(sources.vertex_source.is_empty());
        assert!(sources.fragment_source.is_empty());
    }

    #[test]
    fn test_compile_and_link() {
        let device = RecordingDevice::new();
        let sources = parse_shader(BASIC_SHADER);
        let shader = Shader::from_sources(
            &device,
            "Basic",
            &sources.vertex_source,
            &sources.fragment_source,
        )
        .unwrap();

        assert_eq!(shader.get_name(), "Basic");
        let calls = device.calls();
        assert!(calls.contains(&DeviceCall::LinkProgram(shader.get_native_program())));
        // Stage objects are released once linked, only the program is alive
        assert_eq!(device.live_objects(), 1);
        assert_eq!(
            device.count_calls(|call| matches!(call, DeviceCall::DetachShader(_, _))),
            2
        );

        drop(shader);
        assert_eq!(device.live_objects(), 0);
    }

    #[test]
    fn test_failed_stage_aborts_creation() {
        let device = RecordingDevice::failing_stage(glow::FRAGMENT_SHADER);

        let result = Shader::from_sources(&device, "Broken", "void main() {}", "void main() {");
        match result {
            Err(ShaderError::CompilationFailed { stage, log }) => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(log.contains("rejected"));
            }
            _ => panic!("expected a compilation failure"),
        }

        let calls = device.calls();
        assert!(!calls
            .iter()
            .any(|call| matches!(call, DeviceCall::LinkProgram(_))));
        assert_eq!(device.live_objects(), 0);
    }

    #[test]
    fn test_failed_vertex_stage_skips_fragment() {
        let device = RecordingDevice::failing_stage(glow::VERTEX_SHADER);

        let result = Shader::from_sources(&device, "Broken", "void main() {", "void main() {}");
        assert!(matches!(
            result,
            Err(ShaderError::CompilationFailed {
                stage: ShaderStage::Vertex,
                ..
            })
        ));
        assert_eq!(
            device.count_calls(|call| matches!(call, DeviceCall::CreateShader(_, _))),
            1
        );
    }

    #[test]
    fn test_link_failure() {
        let device = RecordingDevice::failing_link();

        let result = Shader::from_sources(&device, "Unlinked", "a", "b");
        assert!(matches!(result, Err(ShaderError::LinkFailed(_))));
        assert_eq!(device.live_objects(), 0);
    }

    #[test]
    fn test_missing_file() {
        let device = RecordingDevice::new();
        let result = Shader::from_file(&device, "res/shaders/does_not_exist.shader");

        assert!(matches!(result, Err(ShaderError::Io { .. })));
        assert!(device.calls().is_empty());
    }

    #[test]
    fn test_from_file_uses_file_stem() {
        let device = RecordingDevice::new();
        let path = std::env::temp_dir().join(format!("gl_render_{}.shader", std::process::id()));
        std::fs::write(&path, BASIC_SHADER).unwrap();

        let shader = Shader::from_file(&device, &path);
        std::fs::remove_file(&path).unwrap();

        let shader = shader.unwrap();
        assert_eq!(
            shader.get_name(),
            format!("gl_render_{}", std::process::id())
        );
    }

    #[test]
    fn test_uniform_setters_bind_and_upload() {
        let device = RecordingDevice::with_uniforms(&["u_Color", "u_MVP", "u_Texture", "u_Time"]);
        let shader = Shader::from_sources(&device, "Basic", "a", "b").unwrap();
        shader.unbind();

        shader.set_uniform_4f("u_Color", 0.8, 0.3, 0.8, 1.0);
        assert_eq!(device.bound_program(), Some(shader.get_native_program()));

        shader.set_uniform_mat4f("u_MVP", &glam::Mat4::IDENTITY);
        shader.set_uniform_1i("u_Texture", 0);
        shader.set_uniform_1f("u_Time", 1.5);

        assert_eq!(
            device.uniform_value(UniformLocation(0)),
            Some(UniformValue::Vec4([0.8, 0.3, 0.8, 1.0]))
        );
        assert_eq!(
            device.uniform_value(UniformLocation(1)),
            Some(UniformValue::Mat4(glam::Mat4::IDENTITY.to_cols_array().to_vec()))
        );
        assert_eq!(
            device.uniform_value(UniformLocation(2)),
            Some(UniformValue::Int(0))
        );
        assert_eq!(
            device.uniform_value(UniformLocation(3)),
            Some(UniformValue::Float(1.5))
        );
    }

    #[test]
    fn test_unknown_uniform_is_noop() {
        let device = RecordingDevice::with_uniforms(&["u_Color"]);
        let shader = Shader::from_sources(&device, "Basic", "a", "b").unwrap();
        shader.set_uniform_4f("u_Color", 0.1, 0.2, 0.3, 0.4);
        let uploads_before =
            device.count_calls(|call| matches!(call, DeviceCall::Uniform(_, _)));

        shader.set_uniform_4f("u_Missing", 1.0, 1.0, 1.0, 1.0);
        shader.set_uniform_1i("u_Missing", 7);
        shader.set_uniform_mat4f("u_Missing", &glam::Mat4::ZERO);

        assert_eq!(shader.get_uniform_location("u_Missing"), None);
        assert_eq!(
            device.count_calls(|call| matches!(call, DeviceCall::Uniform(_, _))),
            uploads_before
        );
        assert_eq!(
            device.uniform_value(UniformLocation(0)),
            Some(UniformValue::Vec4([0.1, 0.2, 0.3, 0.4]))
        );
    }

    #[test]
    fn test_uniform_locations_are_cached() {
        let device = RecordingDevice::with_uniforms(&["u_Color"]);
        let shader = Shader::from_sources(&device, "Basic", "a", "b").unwrap();

        for frame in 0..10 {
            shader.set_uniform_4f("u_Color", frame as f32 / 10.0, 0.3, 0.8, 1.0);
            shader.set_uniform_1f("u_Missing", 0.0);
        }

        let lookups = |name: &str| {
            device.count_calls(
                |call| matches!(call, DeviceCall::GetUniformLocation(looked_up) if looked_up == name),
            )
        };
        assert_eq!(lookups("u_Color"), 1);
        assert_eq!(lookups("u_Missing"), 1);
    }
}
