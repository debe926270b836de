//! TGA image format support
//!
//! Decoding and encoding go through the `image` crate's TGA codec, which
//! handles raw and RLE packets, color maps and both row orders. Grayscale
//! decodes to 1 channel, grayscale with alpha to 2, true-color to 3 and
//! true-color with alpha to 4.

use crate::{IoError, IoResult};
use histeq_core::Image;
use image::codecs::tga::TgaEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use std::io::{BufRead, Seek, Write};
use tracing::debug;

/// Read a TGA image
pub fn read_tga<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let decoded = image::load(reader, image::ImageFormat::Tga)
        .map_err(|e| IoError::DecodeError(format!("TGA decode error: {}", e)))?;

    let width = decoded.width();
    let height = decoded.height();
    let (channels, data): (u32, Vec<u8>) = match decoded {
        DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
        other => (3, other.into_rgb8().into_raw()),
    };

    debug!(width, height, channels, "decoded TGA");
    Ok(Image::from_raw(width, height, channels, data)?)
}

/// Write a TGA image
///
/// Channel count selects the color type: 1 gray, 2 gray + alpha,
/// 3 RGB, 4 RGBA.
pub fn write_tga<W: Write>(image: &Image, writer: W) -> IoResult<()> {
    let color_type = match image.channels() {
        1 => ExtendedColorType::L8,
        2 => ExtendedColorType::La8,
        3 => ExtendedColorType::Rgb8,
        4 => ExtendedColorType::Rgba8,
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {}-channel image as TGA",
                n
            )));
        }
    };

    TgaEncoder::new(writer)
        .write_image(image.data(), image.width(), image.height(), color_type)
        .map_err(|e| IoError::EncodeError(format!("TGA encode error: {}", e)))?;

    debug!(
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
        "encoded TGA"
    );
    Ok(())
}
