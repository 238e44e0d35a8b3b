use gl_render::core::rendering::device::{DeviceError, RawHandle, RenderDevice, UniformLocation};
use gl_render::gl_call;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Possible data types for shader inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderDataType {
    Float,
    Float2,
    Float3,
    Float4,
    Mat3,
    Mat4,
    Int,
    Int2,
    Int3,
    Int4,
    Bool,
}

impl ShaderDataType {
    /// Size in bytes for this data type
    pub fn get_size(&self) -> u32 {
        match self {
            ShaderDataType::Float | ShaderDataType::Int => 4,
            ShaderDataType::Float2 | ShaderDataType::Int2 => 2 * 4,
            ShaderDataType::Float3 | ShaderDataType::Int3 => 3 * 4,
            ShaderDataType::Float4 | ShaderDataType::Int4 => 4 * 4,
            ShaderDataType::Mat3 => 3 * 3 * 4,
            ShaderDataType::Mat4 => 4 * 4 * 4,
            ShaderDataType::Bool => 1,
        }
    }

    pub fn get_component_count(&self) -> u32 {
        match self {
            ShaderDataType::Float | ShaderDataType::Int | ShaderDataType::Bool => 1,
            ShaderDataType::Float2 | ShaderDataType::Int2 => 2,
            ShaderDataType::Float3 | ShaderDataType::Int3 => 3,
            ShaderDataType::Float4 | ShaderDataType::Int4 => 4,
            ShaderDataType::Mat3 => 3 * 3,
            ShaderDataType::Mat4 => 4 * 4,
        }
    }
}

/// One of the two halves of a shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn get_gl_type(&self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ShaderError {
    /// Could not read the shader source file
    #[error("could not read shader file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Could not compile one of the stages
    #[error("failed to compile {stage} shader: {log}")]
    CompilationFailed { stage: ShaderStage, log: String },
    /// Stages compiled but the program did not link
    #[error("failed to link program: {0}")]
    LinkFailed(String),
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Per stage sources extracted from a combined shader file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShaderProgramSource {
    pub vertex_source: String,
    pub fragment_source: String,
}

/// Split a combined source into its stages.
///
/// A line containing `#shader` selects the stage named on that same line
/// (`vertex` or `fragment`). Every other line goes to the selected stage.
/// Lines found while no stage is selected are dropped.
pub fn parse_shader(source: &str) -> ShaderProgramSource {
    let mut result = ShaderProgramSource::default();
    let mut current: Option<ShaderStage> = None;

    for line in source.lines() {
        if line.contains("#shader") {
            current = if line.contains("vertex") {
                Some(ShaderStage::Vertex)
            } else if line.contains("fragment") {
                Some(ShaderStage::Fragment)
            } else {
                None
            };
            continue;
        }

        let target = match current {
            Some(ShaderStage::Vertex) => &mut result.vertex_source,
            Some(ShaderStage::Fragment) => &mut result.fragment_source,
            None => continue,
        };
        target.push_str(line);
        target.push('\n');
    }

    result
}

/// A linked vertex + fragment program
pub struct Shader<'a> {
    device: &'a dyn RenderDevice,
    name: String,
    native_program: RawHandle,
    // None marks a name the program doesn't know about
    uniform_location_cache: RefCell<HashMap<String, Option<UniformLocation>>>,
}

impl<'a> Shader<'a> {
    /// Load a file holding both stages, see [parse_shader] for the format.
    /// The shader is named after the file stem.
    pub fn from_file(
        device: &'a dyn RenderDevice,
        path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("unnamed");

        let sources = parse_shader(&source);
        Self::from_sources(
            device,
            name,
            &sources.vertex_source,
            &sources.fragment_source,
        )
    }

    pub fn from_sources(
        device: &'a dyn RenderDevice,
        name: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let native_program = compile_program(
            device,
            &[
                (ShaderStage::Vertex, vertex_source),
                (ShaderStage::Fragment, fragment_source),
            ],
        )?;
        log::debug!("Shader '{}' linked as program {}", name, native_program);

        Ok(Shader {
            device,
            name: name.to_string(),
            native_program,
            uniform_location_cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn bind(&self) {
        gl_call!(
            self.device,
            self.device.use_program(Some(self.native_program))
        );
    }

    pub fn unbind(&self) {
        gl_call!(self.device, self.device.use_program(None));
    }

    #[inline(always)]
    pub fn get_name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn get_native_program(&self) -> RawHandle {
        self.native_program
    }

    pub fn set_uniform_1i(&self, name: &str, value: i32) {
        if let Some(location) = self.bound_location(name) {
            gl_call!(self.device, self.device.uniform_1_i32(location, value));
        }
    }

    pub fn set_uniform_1f(&self, name: &str, value: f32) {
        if let Some(location) = self.bound_location(name) {
            gl_call!(self.device, self.device.uniform_1_f32(location, value));
        }
    }

    pub fn set_uniform_4f(&self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) {
        if let Some(location) = self.bound_location(name) {
            gl_call!(
                self.device,
                self.device.uniform_4_f32(location, v0, v1, v2, v3)
            );
        }
    }

    pub fn set_uniform_mat4f(&self, name: &str, matrix: &glam::Mat4) {
        if let Some(location) = self.bound_location(name) {
            let columns = matrix.to_cols_array();
            gl_call!(
                self.device,
                self.device
                    .uniform_matrix_4_f32_slice(location, false, &columns)
            );
        }
    }

    /// Location of `name` in this program, looked up once and cached
    pub fn get_uniform_location(&self, name: &str) -> Option<UniformLocation> {
        if let Some(location) = self.uniform_location_cache.borrow().get(name) {
            return *location;
        }

        let location = gl_call!(
            self.device,
            self.device.get_uniform_location(self.native_program, name)
        );
        if location.is_none() {
            log::warn!("Uniform '{}' doesn't exist in shader '{}'", name, self.name);
        }
        self.uniform_location_cache
            .borrow_mut()
            .insert(name.to_string(), location);

        location
    }

    fn bound_location(&self, name: &str) -> Option<UniformLocation> {
        let location = self.get_uniform_location(name)?;
        self.bind();
        Some(location)
    }
}

impl Drop for Shader<'_> {
    fn drop(&mut self) {
        log::trace!("Deleting shader program '{}'", self.name);
        gl_call!(self.device, self.device.delete_program(self.native_program));
    }
}

/// Compile every stage and link them into a program.
///
/// Nothing is linked unless every stage compiled; on any failure all the
/// objects created so far are released.
fn compile_program(
    device: &dyn RenderDevice,
    stages: &[(ShaderStage, &str)],
) -> Result<RawHandle, ShaderError> {
    let program = gl_call!(device, device.create_program())
        .map_err(DeviceError::creation("shader program"))?;
    let mut created_shaders: Vec<RawHandle> = Vec::with_capacity(stages.len());

    let release = |shaders: &[RawHandle]| {
        for shader in shaders {
            gl_call!(device, device.delete_shader(*shader));
        }
        gl_call!(device, device.delete_program(program));
    };

    for (stage, source) in stages {
        let shader = match gl_call!(device, device.create_shader(stage.get_gl_type())) {
            Ok(shader) => shader,
            Err(reason) => {
                release(&created_shaders);
                return Err(DeviceError::creation("shader")(reason).into());
            }
        };
        gl_call!(device, device.shader_source(shader, source));
        gl_call!(device, device.compile_shader(shader));

        if !gl_call!(device, device.get_shader_compile_status(shader)) {
            let log = gl_call!(device, device.get_shader_info_log(shader));
            log::error!("Failed to compile {} shader!", stage);
            log::error!("{}", log);

            gl_call!(device, device.delete_shader(shader));
            release(&created_shaders);
            return Err(ShaderError::CompilationFailed { stage: *stage, log });
        }

        gl_call!(device, device.attach_shader(program, shader));
        created_shaders.push(shader);
    }

    gl_call!(device, device.link_program(program));
    if !gl_call!(device, device.get_program_link_status(program)) {
        let log = gl_call!(device, device.get_program_info_log(program));
        log::error!("Failed to link program: {}", log);

        release(&created_shaders);
        return Err(ShaderError::LinkFailed(log));
    }

    // Stage objects are not needed once the program is linked
    for shader in created_shaders {
        gl_call!(device, device.detach_shader(program, shader));
        gl_call!(device, device.delete_shader(shader));
    }

    Ok(program)
}
