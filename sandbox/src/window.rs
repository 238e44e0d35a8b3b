use std::num::NonZeroU32;

use gl_render::prelude::OpenGLDevice;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window as NativeWindow, WindowBuilder as NativeWindowBuilder};

use crate::errors::SandboxError;

pub struct WindowProperties {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

/// Describes the window to open. Defaults match the demo scenes' coordinate space.
pub struct WindowBuilder {
    properties: WindowProperties,
}

impl Default for WindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowBuilder {
    pub fn new() -> Self {
        WindowBuilder {
            properties: WindowProperties {
                title: "Hello World".to_owned(),
                width: 960,
                height: 540,
                vsync: true,
            },
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.properties.width = width;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.properties.height = height;
        self
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.properties.title = title;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.properties.vsync = vsync;
        self
    }

    #[inline(always)]
    pub fn get_properties(&self) -> &WindowProperties {
        &self.properties
    }

    /// Open the window and make an OpenGL 3.3 core context current on this thread
    pub fn build(self, event_loop: &EventLoop<()>) -> Result<(GlWindow, OpenGLDevice), SandboxError> {
        let props = self.properties;
        let window_builder = NativeWindowBuilder::new()
            .with_title(props.title.clone())
            .with_inner_size(LogicalSize::new(props.width, props.height))
            .with_decorations(true);

        // Window creation
        let (window, cfg) = glutin_winit::DisplayBuilder::new()
            .with_window_builder(Some(window_builder))
            .build(event_loop, ConfigTemplateBuilder::new(), |configs| {
                configs
                    .reduce(|best, config| {
                        if config.num_samples() > best.num_samples() {
                            config
                        } else {
                            best
                        }
                    })
                    .expect("The display offered no OpenGL configuration")
            })
            .map_err(|e| SandboxError::Window(e.to_string()))?;
        let window = window.ok_or_else(|| SandboxError::Window("no window was built".into()))?;

        // Context creation
        let raw_window_handle = window.raw_window_handle();
        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));
        let display = cfg.display();
        let context = unsafe { display.create_context(&cfg, &context_attrs) }
            .map_err(|e| SandboxError::Context(e.to_string()))?;

        let size = window.inner_size();
        let (width, height) = non_zero_size(size.width, size.height)?;
        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new()
            .with_srgb(Some(true))
            .build(raw_window_handle, width, height);
        let surface = unsafe { display.create_window_surface(&cfg, &surface_attrs) }
            .map_err(|e| SandboxError::Context(e.to_string()))?;

        let context = context
            .make_current(&surface)
            .map_err(|e| SandboxError::Context(e.to_string()))?;

        if props.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
                log::warn!("Could not enable vsync: {}", e);
            }
        }

        let device = unsafe {
            OpenGLDevice::from_loader_function_cstr(|s| display.get_proc_address(s).cast())
        };
        log::info!(
            "Created window '{}' ({}x{})",
            props.title,
            size.width,
            size.height
        );

        Ok((
            GlWindow {
                width: size.width,
                height: size.height,
                window,
                surface,
                context,
            },
            device,
        ))
    }
}

/// A window with a current OpenGL context drawing to it
pub struct GlWindow {
    width: u32,
    height: u32,
    // Surface and context go before the window they were created from
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: NativeWindow,
}

impl GlWindow {
    #[inline(always)]
    pub fn get_width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    pub fn get_height(&self) -> u32 {
        self.height
    }

    /// Present the frame drawn so far
    pub fn swap_buffers(&self) -> Result<(), SandboxError> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| SandboxError::Context(e.to_string()))
    }

    /// Returns false when the new size has no area (minimized window)
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let Ok((non_zero_width, non_zero_height)) = non_zero_size(width, height) else {
            return false;
        };
        self.surface
            .resize(&self.context, non_zero_width, non_zero_height);
        self.width = width;
        self.height = height;
        true
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

fn non_zero_size(width: u32, height: u32) -> Result<(NonZeroU32, NonZeroU32), SandboxError> {
    match (NonZeroU32::new(width), NonZeroU32::new(height)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(SandboxError::Window(format!(
            "window size {}x{} has no area",
            width, height
        ))),
    }
}
