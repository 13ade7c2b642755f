//! Still-image decoding on top of the `image` crate.
//!
//! Decodes encoded image bytes into interleaved 8-bit rows plus dimensions,
//! the shape a `FrameBuffer` stores. Pixel layout is row-major with
//! `elem_size` bytes per pixel (1 = gray, 2 = gray+alpha, 3 = RGB,
//! 4 = RGBA).

pub mod error;

pub use error::ImageError;

use image::DynamicImage;

/// A decoded frame: raw interleaved bytes plus dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub width: u32,
    pub height: u32,
    pub elem_size: u32,
    pub data: Vec<u8>,
}

/// Decode an image from raw encoded bytes. The format is auto-detected.
///
/// 8-bit images keep their channel count; deeper formats (16-bit, float)
/// are converted to 8-bit RGBA.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is
/// unsupported by the `image` crate.
pub fn decode_image(data: &[u8]) -> Result<DecodedFrame, ImageError> {
    let img = image::load_from_memory(data)?;

    let frame = match img {
        DynamicImage::ImageLuma8(buf) => {
            let (width, height) = buf.dimensions();
            DecodedFrame {
                width,
                height,
                elem_size: 1,
                data: buf.into_raw(),
            }
        }
        DynamicImage::ImageLumaA8(buf) => {
            let (width, height) = buf.dimensions();
            DecodedFrame {
                width,
                height,
                elem_size: 2,
                data: buf.into_raw(),
            }
        }
        DynamicImage::ImageRgb8(buf) => {
            let (width, height) = buf.dimensions();
            DecodedFrame {
                width,
                height,
                elem_size: 3,
                data: buf.into_raw(),
            }
        }
        DynamicImage::ImageRgba8(buf) => {
            let (width, height) = buf.dimensions();
            DecodedFrame {
                width,
                height,
                elem_size: 4,
                data: buf.into_raw(),
            }
        }
        other => {
            // 16-bit and float variants: flatten to 8-bit RGBA
            log::debug!("flattening {:?} pixels to rgba8", other.color());
            let buf = other.to_rgba8();
            let (width, height) = buf.dimensions();
            DecodedFrame {
                width,
                height,
                elem_size: 4,
                data: buf.into_raw(),
            }
        }
    };

    Ok(frame)
}
