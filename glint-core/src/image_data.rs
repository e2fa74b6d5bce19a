//! Decoding of texture images and the CPU side preprocessing selected by [`TextureFlags`].
//!
//! The GPU upload itself happens in the binary; this module only produces the RGBA8 pixels and
//! tells the uploader which sampler options were requested.

use std::path::Path;

use bitflags::bitflags;
use image::{ImageError, RgbaImage};

bitflags! {
    /// Options for loading a texture. Every bit is independent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureFlags: u32 {
        /// Generate mipmaps after upload.
        const MIPMAPS = 2;
        /// Repeat the texture outside `[0, 1]` instead of clamping to the edge.
        const TEXTURE_REPEATS = 4;
        /// Premultiply the color channels by alpha.
        const MULTIPLY_ALPHA = 8;
        /// Flip the image vertically so the first row is the bottom of the texture.
        const INVERT_Y = 16;
        /// Clamp color channels to the NTSC safe range `[16, 235]`.
        const NTSC_SAFE_RGB = 128;
    }
}

impl Default for TextureFlags {
    fn default() -> Self {
        Self::MIPMAPS | Self::INVERT_Y | Self::NTSC_SAFE_RGB
    }
}

const NTSC_MIN: u8 = 16;
const NTSC_MAX: u8 = 235;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] ImageError),
    #[error("image has no pixels")]
    Empty,
    #[error("failed to upload texture: {0}")]
    Upload(String),
}

/// Decodes the image file at `path` and applies the pixel options in `flags`.
pub fn decode_file(path: impl AsRef<Path>, flags: TextureFlags) -> Result<RgbaImage, TextureError> {
    let image = image::open(path)?.to_rgba8();
    process(image, flags)
}

/// Decodes an in-memory encoded image and applies the pixel options in `flags`.
pub fn decode_bytes(bytes: &[u8], flags: TextureFlags) -> Result<RgbaImage, TextureError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    process(image, flags)
}

fn process(mut image: RgbaImage, flags: TextureFlags) -> Result<RgbaImage, TextureError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(TextureError::Empty);
    }
    if flags.contains(TextureFlags::INVERT_Y) {
        image::imageops::flip_vertical_in_place(&mut image);
    }
    if flags.contains(TextureFlags::MULTIPLY_ALPHA) {
        for pixel in image.pixels_mut() {
            let a = pixel[3] as u16;
            for c in &mut pixel.0[..3] {
                *c = ((*c as u16 * a + 127) / 255) as u8;
            }
        }
    }
    if flags.contains(TextureFlags::NTSC_SAFE_RGB) {
        for pixel in image.pixels_mut() {
            for c in &mut pixel.0[..3] {
                *c = (*c).clamp(NTSC_MIN, NTSC_MAX);
            }
        }
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba};

    use super::*;

    /// A 1x2 png with a black top row and a white, half transparent bottom row.
    fn encoded() -> Vec<u8> {
        let mut image = RgbaImage::new(1, 2);
        image.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        image.put_pixel(0, 1, Rgba([255, 255, 255, 128]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_default_flags() {
        let flags = TextureFlags::default();
        assert!(flags.contains(TextureFlags::MIPMAPS));
        assert!(flags.contains(TextureFlags::INVERT_Y));
        assert!(flags.contains(TextureFlags::NTSC_SAFE_RGB));
        assert!(!flags.contains(TextureFlags::TEXTURE_REPEATS));
        assert_eq!(flags.bits(), 2 | 16 | 128);
    }

    #[test]
    fn test_no_flags_keeps_pixels() {
        let image = decode_bytes(&encoded(), TextureFlags::empty()).unwrap();
        assert_eq!(image.dimensions(), (1, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(0, 1), &Rgba([255, 255, 255, 128]));
    }

    #[test]
    fn test_invert_y() {
        let image = decode_bytes(&encoded(), TextureFlags::INVERT_Y).unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 128]));
        assert_eq!(image.get_pixel(0, 1), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_ntsc_safe_clamps_color_only() {
        let image = decode_bytes(&encoded(), TextureFlags::NTSC_SAFE_RGB).unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgba([16, 16, 16, 255]));
        assert_eq!(image.get_pixel(0, 1), &Rgba([235, 235, 235, 128]));
    }

    #[test]
    fn test_multiply_alpha() {
        let image = decode_bytes(&encoded(), TextureFlags::MULTIPLY_ALPHA).unwrap();
        assert_eq!(image.get_pixel(0, 1), &Rgba([128, 128, 128, 128]));
    }

    #[test]
    fn test_flags_combine() {
        let image = decode_bytes(&encoded(), TextureFlags::default()).unwrap();
        assert_eq!(image.get_pixel(0, 0), &Rgba([235, 235, 235, 128]));
        assert_eq!(image.get_pixel(0, 1), &Rgba([16, 16, 16, 255]));
    }

    #[test]
    fn test_decode_failures() {
        assert!(matches!(
            decode_bytes(b"definitely not an image", TextureFlags::default()),
            Err(TextureError::Decode(_))
        ));
        assert!(decode_file("does/not/exist.png", TextureFlags::default()).is_err());
    }
}
