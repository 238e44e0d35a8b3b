use gl_render::core::rendering::device::{DeviceError, RawHandle, RenderDevice};
use gl_render::gl_call;
use image::GenericImageView;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("could not load image '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    /// Pixel buffer doesn't hold `width * height` RGBA texels
    #[error("expected {expected} bytes of RGBA8 pixels for a {width}x{height} texture, got {actual}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Immutable 2D RGBA8 image on the device
pub struct Texture<'a> {
    device: &'a dyn RenderDevice,
    native_texture: RawHandle,
    file_path: Option<String>,
    width: u32,
    height: u32,
    channels: u8,
}

impl<'a> Texture<'a> {
    /// Decode the image at `path` and upload it.
    ///
    /// Rows are flipped so the first row uploaded is the bottom of the image,
    /// which is where texture coordinates start.
    pub fn from_file(
        device: &'a dyn RenderDevice,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| TextureError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        let (width, height) = image.dimensions();
        let channels = image.color().channel_count();
        let pixels = image.flipv().to_rgba8().into_raw();

        let mut texture = Self::from_rgba8(device, width, height, &pixels)?;
        texture.channels = channels;
        texture.file_path = Some(path.display().to_string());
        // `pixels` is released here, the device keeps its own copy
        Ok(texture)
    }

    pub fn from_rgba8(
        device: &'a dyn RenderDevice,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureError::InvalidDimensions {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        let native_texture = gl_call!(device, device.create_texture())
            .map_err(DeviceError::creation("texture"))?;
        gl_call!(
            device,
            device.bind_texture(glow::TEXTURE_2D, Some(native_texture))
        );

        let parameters = [
            (glow::TEXTURE_MIN_FILTER, glow::LINEAR),
            (glow::TEXTURE_MAG_FILTER, glow::LINEAR),
            (glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE),
            (glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE),
        ];
        for (parameter, value) in parameters {
            gl_call!(
                device,
                device.tex_parameter_i32(glow::TEXTURE_2D, parameter, value as i32)
            );
        }

        gl_call!(
            device,
            device.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            )
        );
        gl_call!(device, device.bind_texture(glow::TEXTURE_2D, None));
        log::trace!("Created {}x{} texture {}", width, height, native_texture);

        Ok(Texture {
            device,
            native_texture,
            file_path: None,
            width,
            height,
            channels: 4,
        })
    }

    /// Bind to texture unit `slot`, the value a sampler uniform should hold
    pub fn bind(&self, slot: u32) {
        gl_call!(
            self.device,
            self.device.active_texture(glow::TEXTURE0 + slot)
        );
        gl_call!(
            self.device,
            self.device
                .bind_texture(glow::TEXTURE_2D, Some(self.native_texture))
        );
    }

    pub fn unbind(&self) {
        gl_call!(self.device, self.device.bind_texture(glow::TEXTURE_2D, None));
    }

    #[inline(always)]
    pub fn get_width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    pub fn get_height(&self) -> u32 {
        self.height
    }

    /// Channel count of the source image, before expansion to RGBA
    #[inline(always)]
    pub fn get_channels(&self) -> u8 {
        self.channels
    }

    #[inline(always)]
    pub fn get_file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }
}

impl Drop for Texture<'_> {
    fn drop(&mut self) {
        log::trace!("Deleting texture {}", self.native_texture);
        gl_call!(
            self.device,
            self.device.delete_texture(self.native_texture)
        );
    }
}
