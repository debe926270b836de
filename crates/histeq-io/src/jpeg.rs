//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Grayscale decodes to 1 channel and color to 3.
//! 16-bit grayscale is reduced to its high byte; CMYK is rejected.

use crate::{IoError, IoResult};
use histeq_core::Image;
use jpeg_decoder::PixelFormat;
use std::io::{Read, Write};
use tracing::debug;

/// Default JPEG quality (1..=100).
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG frame info".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);

    let image = match info.pixel_format {
        PixelFormat::L8 => Image::from_raw(width, height, 1, pixels)?,
        PixelFormat::L16 => {
            // big-endian pairs; keep the high byte
            let data = pixels.chunks_exact(2).map(|p| p[0]).collect();
            Image::from_raw(width, height, 1, data)?
        }
        PixelFormat::RGB24 => Image::from_raw(width, height, 3, pixels)?,
        PixelFormat::CMYK32 => {
            return Err(IoError::UnsupportedFormat(
                "CMYK JPEG is not supported".to_string(),
            ));
        }
    };

    debug!(width, height, channels = image.channels(), "decoded JPEG");
    Ok(image)
}

/// Write a JPEG image with the given quality.
///
/// Accepts 1-channel (gray), 3-channel (RGB) and 4-channel (RGBA, alpha
/// discarded) images. JPEG dimensions are limited to 65535.
pub fn write_jpeg<W: Write>(image: &Image, writer: W, quality: u8) -> IoResult<()> {
    let color_type = match image.channels() {
        1 => jpeg_encoder::ColorType::Luma,
        3 => jpeg_encoder::ColorType::Rgb,
        4 => jpeg_encoder::ColorType::Rgba,
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {}-channel image as JPEG",
                n
            )));
        }
    };
    let width = u16::try_from(image.width())
        .map_err(|_| IoError::EncodeError(format!("width {} too large", image.width())))?;
    let height = u16::try_from(image.height())
        .map_err(|_| IoError::EncodeError(format!("height {} too large", image.height())))?;

    let encoder = jpeg_encoder::Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(image.data(), width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    debug!(width, height, quality, "encoded JPEG");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_gray_shape() {
        let data: Vec<u8> = (0..32 * 16).map(|i| (i % 32 * 8) as u8).collect();
        let img = Image::from_raw(32, 16, 1, data).unwrap();

        let mut buffer = Vec::new();
        write_jpeg(&img, &mut buffer, 95).unwrap();
        let img2 = read_jpeg(Cursor::new(buffer)).unwrap();

        assert_eq!(img2.width(), 32);
        assert_eq!(img2.height(), 16);
        assert_eq!(img2.channels(), 1);
        // lossy: allow small error on a smooth ramp
        for (a, b) in img.data().iter().zip(img2.data()) {
            assert!((*a as i32 - *b as i32).abs() <= 24, "{a} vs {b}");
        }
    }

    #[test]
    fn test_jpeg_rgb_channels() {
        let img = Image::from_raw(8, 8, 3, vec![128; 8 * 8 * 3]).unwrap();
        let mut buffer = Vec::new();
        write_jpeg(&img, &mut buffer, DEFAULT_QUALITY).unwrap();
        let img2 = read_jpeg(Cursor::new(buffer)).unwrap();
        assert_eq!(img2.channels(), 3);
        assert!(img2.data().iter().all(|&v| (v as i32 - 128).abs() <= 2));
    }

    #[test]
    fn test_jpeg_reject_two_channels() {
        let img = Image::new(4, 4, 2).unwrap();
        assert!(write_jpeg(&img, Vec::new(), 90).is_err());
    }
}
