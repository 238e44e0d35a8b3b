use gl_render::prelude::{Colorf32, Renderer};
use std::f32::consts::TAU;

use super::Scene;

/// Seconds for the color to go around once
const CYCLE_SECONDS: f32 = 6.0;

/// Fills the screen with a color that slowly walks around the hue circle
pub struct ClearColorScene {
    phase: f32,
}

impl Default for ClearColorScene {
    fn default() -> Self {
        Self::new()
    }
}

impl ClearColorScene {
    pub fn new() -> Self {
        ClearColorScene { phase: 0.0 }
    }

    pub fn get_color(&self) -> Colorf32 {
        let angle = self.phase * TAU;
        let channel = |offset: f32| 0.5 + 0.5 * (angle + offset * TAU / 3.0).cos();
        Colorf32::new(channel(0.0), channel(1.0), channel(2.0), 1.0)
    }
}

impl Scene for ClearColorScene {
    fn on_update(&mut self, delta_time: f32) {
        self.phase = (self.phase + delta_time / CYCLE_SECONDS).fract();
    }

    fn on_render(&mut self, renderer: &Renderer) {
        renderer.set_clear_color(self.get_color());
        renderer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{ClearColorScene, CYCLE_SECONDS};
    use crate::scenes::Scene;

    #[test]
    fn test_color_starts_red_and_wraps() {
        let mut scene = ClearColorScene::new();
        let start = scene.get_color();
        assert!((start.x - 1.0).abs() < 1e-5);
        assert!(start.y < 0.5 && start.z < 0.5);

        scene.on_update(CYCLE_SECONDS / 2.0);
        let half = scene.get_color();
        assert!(half.x < 1e-5);

        scene.on_update(CYCLE_SECONDS / 2.0);
        assert!((scene.get_color().x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_channels_stay_in_range() {
        let mut scene = ClearColorScene::new();
        for _ in 0..100 {
            scene.on_update(0.137);
            let color = scene.get_color();
            for channel in [color.x, color.y, color.z] {
                assert!((0.0..=1.0).contains(&channel));
            }
            assert_eq!(color.w, 1.0);
        }
    }
}
