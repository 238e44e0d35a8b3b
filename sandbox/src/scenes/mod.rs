/// Scenes are the interactive demos. Only one of them is alive at a time,
/// the menu builds it when selected and drops it when going back.
use gl_render::prelude::{Colorf32, Renderer};
use winit::keyboard::{Key, NamedKey};

use crate::errors::SandboxError;

pub mod clear_color;
pub mod color_quad;
pub mod texture_2d;

pub type ScenePtr<'a> = Box<dyn Scene + 'a>;
pub type SceneFactory<'a> = Box<dyn Fn() -> Result<ScenePtr<'a>, SandboxError> + 'a>;

pub trait Scene {
    // Allow unused variables because these are just empty default implementations.
    #[allow(unused)]
    fn on_update(&mut self, delta_time: f32) {}

    fn on_render(&mut self, renderer: &Renderer);

    #[allow(unused)]
    fn on_key(&mut self, key: &Key) {}
}

struct SceneEntry<'a> {
    name: String,
    factory: SceneFactory<'a>,
}

/// Lists the registered scenes and owns the one currently open.
///
/// Digits `1`-`9` open the matching entry while no scene is open,
/// `Backspace` drops the open scene and returns to the list.
#[derive(Default)]
pub struct SceneMenu<'a> {
    entries: Vec<SceneEntry<'a>>,
    current: Option<(usize, ScenePtr<'a>)>,
}

impl<'a> SceneMenu<'a> {
    pub fn new() -> Self {
        SceneMenu {
            entries: Vec::new(),
            current: None,
        }
    }

    pub fn register<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn() -> Result<ScenePtr<'a>, SandboxError> + 'a,
    {
        self.entries.push(SceneEntry {
            name: name.to_owned(),
            factory: Box::new(factory),
        });
        self
    }

    /// Build the scene at `index` and make it current. A scene that fails
    /// to build is reported and the menu stays where it was.
    pub fn open(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.get(index) else {
            return false;
        };

        match (entry.factory)() {
            Ok(scene) => {
                log::info!("Opened scene '{}'", entry.name);
                self.current = Some((index, scene));
                true
            }
            Err(e) => {
                log::error!("Could not open scene '{}': {}", entry.name, e);
                false
            }
        }
    }

    pub fn back(&mut self) {
        if let Some((index, _)) = self.current.take() {
            log::info!("Closed scene '{}'", self.entries[index].name);
            self.log_entries();
        }
    }

    pub fn on_key(&mut self, key: &Key) {
        if let Key::Named(NamedKey::Backspace) = key {
            self.back();
            return;
        }

        match &mut self.current {
            Some((_, scene)) => scene.on_key(key),
            None => {
                if let Some(index) = menu_index(key) {
                    self.open(index);
                }
            }
        }
    }

    pub fn on_update(&mut self, delta_time: f32) {
        if let Some((_, scene)) = &mut self.current {
            scene.on_update(delta_time);
        }
    }

    pub fn on_render(&mut self, renderer: &Renderer) {
        match &mut self.current {
            Some((_, scene)) => scene.on_render(renderer),
            None => {
                renderer.set_clear_color(Colorf32::new(0.0, 0.0, 0.0, 1.0));
                renderer.clear();
            }
        }
    }

    /// Advance and draw one frame. The open scene, or the menu's black
    /// background, is the only thing that clears the screen.
    pub fn on_frame(&mut self, renderer: &Renderer, delta_time: f32) {
        self.on_update(delta_time);
        self.on_render(renderer);
    }

    pub fn log_entries(&self) {
        log::info!("Scenes (press the number to open, Backspace to go back):");
        for (i, entry) in self.entries.iter().enumerate() {
            log::info!("  {}: {}", i + 1, entry.name);
        }
    }

    pub fn get_current_scene_name(&self) -> Option<&str> {
        self.current
            .as_ref()
            .map(|(index, _)| self.entries[*index].name.as_str())
    }

    #[inline(always)]
    pub fn get_entry_count(&self) -> usize {
        self.entries.len()
    }
}

/// `1` selects the first entry
fn menu_index(key: &Key) -> Option<usize> {
    let Key::Character(text) = key else {
        return None;
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ '1'..='9'), None) => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}
