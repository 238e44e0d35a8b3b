use std::time::{Duration, Instant};

use gl_render::prelude::*;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};

mod errors;
mod scenes;
mod time;
mod window;

use errors::SandboxError;
use scenes::clear_color::ClearColorScene;
use scenes::color_quad::ColorQuadScene;
use scenes::texture_2d::Texture2DScene;
use scenes::SceneMenu;
use time::Time;
use window::WindowBuilder;

/// What the window told us since the last frame
#[derive(Default)]
struct FrameInput {
    close_requested: bool,
    resized: Option<(u32, u32)>,
    pressed_keys: Vec<Key>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SandboxError> {
    let mut event_loop = EventLoop::new().map_err(|e| SandboxError::EventLoop(e.to_string()))?;
    let (mut window, device) = WindowBuilder::new().build(&event_loop)?;

    let renderer = Renderer::new(&device);
    renderer.log_device_info();
    renderer.set_viewport(0, 0, window.get_width(), window.get_height());
    renderer.enable_blending();

    let device: &dyn RenderDevice = &device;
    let mut menu = SceneMenu::new();
    menu.register("Clear Color", || Ok(Box::new(ClearColorScene::new())))
        .register("Color Quad", move || Ok(Box::new(ColorQuadScene::new(device)?)))
        .register("Texture 2D", move || Ok(Box::new(Texture2DScene::new(device)?)));
    menu.log_entries();

    let mut shown_scene: Option<String> = None;
    let mut time = Time::new(Instant::now());
    loop {
        let mut input = FrameInput::default();
        let status = event_loop.pump_events(Some(Duration::ZERO), |event, _| {
            if let Event::WindowEvent { event, .. } = event {
                match event {
                    WindowEvent::CloseRequested => input.close_requested = true,
                    WindowEvent::Resized(size) => input.resized = Some((size.width, size.height)),
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key,
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    } => input.pressed_keys.push(logical_key),
                    _ => {}
                }
            }
        });

        if let PumpStatus::Exit(code) = status {
            log::info!("Event loop exited with code {}", code);
            break;
        }
        if input.close_requested {
            break;
        }

        if let Some((width, height)) = input.resized {
            if window.resize(width, height) {
                renderer.set_viewport(0, 0, width, height);
            }
        }

        let mut quit = false;
        for key in &input.pressed_keys {
            if let Key::Named(NamedKey::Escape) = key {
                quit = true;
            } else {
                menu.on_key(key);
            }
        }
        if quit {
            break;
        }

        let scene_name = menu.get_current_scene_name().map(str::to_owned);
        if scene_name != shown_scene {
            match &scene_name {
                Some(name) => window.set_title(&format!("Hello World - {}", name)),
                None => window.set_title("Hello World"),
            }
            shown_scene = scene_name;
        }

        time.step(Instant::now());
        menu.on_frame(&renderer, time.delta_seconds());
        window.swap_buffers()?;
    }

    log::info!("Closing after {} frames", time.get_frame_count());
    Ok(())
}
