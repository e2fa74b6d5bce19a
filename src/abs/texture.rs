//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which owns a single GPU texture loaded from an
//! image file. A texture without a GPU object is *invalid*; it stays invalid when loading fails.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use glint_core::{
    TextureId,
    image_data::{self, TextureError, TextureFlags},
};
use glow::HasContext;

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: Option<glow::Texture>,
    file: Option<PathBuf>,
    flags: TextureFlags,
    width: u32,
    height: u32,
}

impl Texture {
    /// Creates a texture that holds no GPU object yet.
    pub fn blank(gl: &Arc<glow::Context>) -> Self {
        Self {
            gl: Arc::clone(gl),
            id: None,
            file: None,
            flags: TextureFlags::default(),
            width: 0,
            height: 0,
        }
    }

    /// Creates a texture and loads it from `file`.
    ///
    /// The texture is returned even if loading failed, check [`Texture::is_valid`] before use.
    pub fn from_file(gl: &Arc<glow::Context>, file: impl AsRef<Path>, flags: TextureFlags) -> Self {
        let mut texture = Self::blank(gl);
        // failures are logged by load and leave the texture invalid
        let _ = texture.load(file, flags);
        texture
    }

    /// Loads the image at `file` into this texture, replacing whatever it held before.
    ///
    /// On failure the texture is left invalid.
    pub fn load(&mut self, file: impl AsRef<Path>, flags: TextureFlags) -> Result<(), TextureError> {
        self.unload();
        self.file = Some(file.as_ref().to_path_buf());
        self.flags = flags;

        let image = match image_data::decode_file(file.as_ref(), flags) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Failed to load texture {}: {}", file.as_ref().display(), e);
                return Err(e);
            }
        };
        let (width, height) = image.dimensions();

        unsafe {
            let texture = match self.gl.create_texture() {
                Ok(texture) => texture,
                Err(e) => {
                    log::error!("Failed to create texture object: {}", e);
                    return Err(TextureError::Upload(e));
                }
            };
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.as_raw().as_slice())),
            );

            let wrap = if flags.contains(TextureFlags::TEXTURE_REPEATS) {
                glow::REPEAT
            } else {
                glow::CLAMP_TO_EDGE
            };
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap as i32);

            let min_filter = if flags.contains(TextureFlags::MIPMAPS) {
                self.gl.generate_mipmap(glow::TEXTURE_2D);
                glow::LINEAR_MIPMAP_LINEAR
            } else {
                glow::LINEAR
            };
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                min_filter as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            self.gl.bind_texture(glow::TEXTURE_2D, None);

            self.id = Some(texture);
        }
        self.width = width;
        self.height = height;
        log::debug!("Loaded texture {} ({}x{})", file.as_ref().display(), width, height);
        Ok(())
    }

    /// Loads the texture again from the last file with the last flags.
    pub fn reload(&mut self) -> Result<(), TextureError> {
        match self.file.clone() {
            Some(file) => self.load(file, self.flags),
            None => Ok(()),
        }
    }

    /// Frees the GPU texture, if there is one.
    pub fn unload(&mut self) {
        if let Some(id) = self.id.take() {
            unsafe {
                self.gl.delete_texture(id);
            }
        }
        self.width = 0;
        self.height = 0;
    }

    /// Returns `true` if the texture holds a GPU object.
    pub fn is_valid(&self) -> bool {
        self.id.is_some()
    }

    /// Returns an id material can refer to this texture by, or `None` while it is invalid.
    pub fn id(&self) -> Option<TextureId> {
        self.id.map(|t| TextureId(t.0))
    }

    /// The file the texture was last loaded from.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Binds a texture by id to the specified texture unit.
pub fn bind_texture_id(gl: &glow::Context, id: TextureId, unit: u32) {
    unsafe {
        gl.active_texture(glow::TEXTURE0 + unit);
        gl.bind_texture(glow::TEXTURE_2D, Some(glow::NativeTexture(id.0)));
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.unload();
    }
}
