//! PNG image format support
//!
//! Palettes are expanded and 16-bit samples are reduced to their high
//! byte on read, so every decoded image carries 8-bit samples with
//! 1 (gray), 2 (gray + alpha), 3 (RGB) or 4 (RGBA) channels.

use crate::{IoError, IoResult};
use histeq_core::Image;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};
use tracing::debug;

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            output_info.bit_depth
        )));
    }
    let channels: u32 = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG color type: {:?}",
                other
            )));
        }
    };

    let width = output_info.width;
    let height = output_info.height;
    let row_bytes = width as usize * channels as usize;
    let line_size = output_info.line_size;

    // Rows may carry padding beyond the packed sample bytes.
    let mut data = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let start = y * line_size;
        data.extend_from_slice(&buf[start..start + row_bytes]);
    }

    debug!(width, height, channels, "decoded PNG");
    Ok(Image::from_raw(width, height, channels, data)?)
}

/// Write a PNG image
///
/// Channel count selects the color type: 1 gray, 2 gray + alpha,
/// 3 RGB, 4 RGBA.
pub fn write_png<W: Write>(image: &Image, writer: W) -> IoResult<()> {
    let color_type = match image.channels() {
        1 => ColorType::Grayscale,
        2 => ColorType::GrayscaleAlpha,
        3 => ColorType::Rgb,
        4 => ColorType::Rgba,
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {}-channel image as PNG",
                n
            )));
        }
    };

    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    debug!(
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
        "encoded PNG"
    );
    Ok(())
}
