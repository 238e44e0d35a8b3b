use gl_render::prelude::*;

use super::Scene;
use crate::errors::SandboxError;

const SHADER_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/res/shaders/Basic.shader");

const POSITIONS: [f32; 8] = [
    -0.5, -0.5, //
    0.5, -0.5, //
    0.5, 0.5, //
    -0.5, 0.5, //
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

const RED_STEP: f32 = 0.05;

/// Moves `red` one step along `increment`, turning around at the ends of [0, 1]
fn bounce(red: f32, increment: f32) -> (f32, f32) {
    let increment = if red > 1.0 {
        -RED_STEP
    } else if red < 0.0 {
        RED_STEP
    } else {
        increment
    };
    (red + increment, increment)
}

/// A single quad whose red channel pulses every frame
pub struct ColorQuadScene<'a> {
    // Array before buffers so it is released first
    vertex_array: VertexArray<'a>,
    _vertex_buffer: VertexBuffer<'a>,
    index_buffer: IndexBuffer<'a>,
    shader: Shader<'a>,
    red: f32,
    increment: f32,
}

impl<'a> ColorQuadScene<'a> {
    pub fn new(device: &'a dyn RenderDevice) -> Result<Self, SandboxError> {
        let vertex_buffer = VertexBuffer::new(device, &POSITIONS)?;
        let mut layout = BufferLayout::new();
        layout.push::<f32>(2);

        let mut vertex_array = VertexArray::new(device)?;
        vertex_array.add_buffer(&vertex_buffer, &layout);

        let index_buffer = IndexBuffer::new(device, &INDICES)?;
        let shader = Shader::from_file(device, SHADER_PATH)?;
        shader.set_uniform_4f("u_Color", 0.8, 0.3, 0.8, 1.0);

        // Leave nothing bound, each draw binds again
        vertex_array.unbind();
        vertex_buffer.unbind();
        index_buffer.unbind();
        shader.unbind();

        Ok(ColorQuadScene {
            vertex_array,
            _vertex_buffer: vertex_buffer,
            index_buffer,
            shader,
            red: 0.0,
            increment: RED_STEP,
        })
    }
}

impl<'a> Scene for ColorQuadScene<'a> {
    fn on_render(&mut self, renderer: &Renderer) {
        renderer.set_clear_color(Colorf32::new(0.0, 0.0, 0.0, 1.0));
        renderer.clear();

        self.shader
            .set_uniform_4f("u_Color", self.red, 0.3, 0.8, 1.0);
        renderer.draw(&self.vertex_array, &self.index_buffer, &self.shader);

        (self.red, self.increment) = bounce(self.red, self.increment);
    }
}

#[cfg(test)]
mod tests {
    use super::{bounce, RED_STEP};

    #[test]
    fn test_red_bounces_between_bounds() {
        let (mut red, mut increment) = (0.0, RED_STEP);
        let mut min = red;
        let mut max = red;
        for _ in 0..200 {
            (red, increment) = bounce(red, increment);
            min = f32::min(min, red);
            max = f32::max(max, red);
        }

        // One step of overshoot before turning around
        assert!(max > 1.0 && max <= 1.0 + 2.0 * RED_STEP);
        assert!(min < 0.0 && min >= -2.0 * RED_STEP);
    }

    #[test]
    fn test_turns_around_past_one() {
        let (red, increment) = bounce(1.01, RED_STEP);
        assert_eq!(increment, -RED_STEP);
        assert!((red - 0.96).abs() < 1e-6);
    }
}
