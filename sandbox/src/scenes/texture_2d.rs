use gl_render::prelude::*;
use glam::{Mat4, Vec3};
use winit::keyboard::{Key, NamedKey};

use super::Scene;
use crate::errors::SandboxError;

const SHADER_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/res/shaders/Texture.shader");
const TEXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/res/textures/checker.png");

// Position (x, y) followed by texture coordinate (u, v)
const VERTICES: [f32; 16] = [
    -50.0, -50.0, 0.0, 0.0, //
    50.0, -50.0, 1.0, 0.0, //
    50.0, 50.0, 1.0, 1.0, //
    -50.0, 50.0, 0.0, 1.0, //
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Pixels moved per arrow key press
const MOVE_STEP: f32 = 10.0;

pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

/// Projection mapping pixel coordinates to clip space, origin at the bottom left
pub fn screen_projection() -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, SCREEN_WIDTH, 0.0, SCREEN_HEIGHT, -1.0, 1.0)
}

fn arrow_offset(key: &Key) -> Option<Vec3> {
    match key {
        Key::Named(NamedKey::ArrowLeft) => Some(Vec3::new(-MOVE_STEP, 0.0, 0.0)),
        Key::Named(NamedKey::ArrowRight) => Some(Vec3::new(MOVE_STEP, 0.0, 0.0)),
        Key::Named(NamedKey::ArrowUp) => Some(Vec3::new(0.0, MOVE_STEP, 0.0)),
        Key::Named(NamedKey::ArrowDown) => Some(Vec3::new(0.0, -MOVE_STEP, 0.0)),
        _ => None,
    }
}

/// Two textured quads sharing one set of buffers. The first one follows the arrow keys.
pub struct Texture2DScene<'a> {
    vertex_array: VertexArray<'a>,
    _vertex_buffer: VertexBuffer<'a>,
    index_buffer: IndexBuffer<'a>,
    shader: Shader<'a>,
    texture: Texture<'a>,
    projection: Mat4,
    view: Mat4,
    translation_a: Vec3,
    translation_b: Vec3,
}

impl<'a> Texture2DScene<'a> {
    pub fn new(device: &'a dyn RenderDevice) -> Result<Self, SandboxError> {
        let vertex_buffer = VertexBuffer::new(device, &VERTICES)?;
        let mut layout = BufferLayout::new();
        layout.push::<f32>(2).push::<f32>(2);

        let mut vertex_array = VertexArray::new(device)?;
        vertex_array.add_buffer(&vertex_buffer, &layout);

        let index_buffer = IndexBuffer::new(device, &INDICES)?;
        let shader = Shader::from_file(device, SHADER_PATH)?;
        let texture = Texture::from_file(device, TEXTURE_PATH)?;
        log::debug!(
            "Loaded texture {}x{} with {} channels",
            texture.get_width(),
            texture.get_height(),
            texture.get_channels()
        );
        shader.set_uniform_1i("u_Texture", 0);

        vertex_array.unbind();
        vertex_buffer.unbind();
        index_buffer.unbind();
        shader.unbind();

        Ok(Texture2DScene {
            vertex_array,
            _vertex_buffer: vertex_buffer,
            index_buffer,
            shader,
            texture,
            projection: screen_projection(),
            view: Mat4::from_translation(Vec3::new(-100.0, 0.0, 0.0)),
            translation_a: Vec3::new(200.0, 200.0, 0.0),
            translation_b: Vec3::new(400.0, 200.0, 0.0),
        })
    }

    fn model_view_projection(&self, translation: Vec3) -> Mat4 {
        self.projection * self.view * Mat4::from_translation(translation)
    }
}

impl<'a> Scene for Texture2DScene<'a> {
    fn on_render(&mut self, renderer: &Renderer) {
        renderer.set_clear_color(Colorf32::new(0.0, 0.0, 0.0, 1.0));
        renderer.clear();
        self.texture.bind(0);

        for translation in [self.translation_a, self.translation_b] {
            let mvp = self.model_view_projection(translation);
            self.shader.set_uniform_mat4f("u_MVP", &mvp);
            renderer.draw(&self.vertex_array, &self.index_buffer, &self.shader);
        }
    }

    fn on_key(&mut self, key: &Key) {
        if let Some(offset) = arrow_offset(key) {
            self.translation_a += offset;
        }
    }
}
