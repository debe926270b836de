//! BMP image format support
//!
//! Reads and writes uncompressed Windows Bitmap (BMP) files.
//!
//! Palette images (1, 4, 8 bpp) are expanded through their palette: a
//! gray palette decodes to 1 channel, anything else to 3. 24 bpp decodes
//! to 3 channels and 32 bpp to 4.

use crate::{IoError, IoResult};
use histeq_core::Image;
use std::io::{self, Read, Write};
use tracing::debug;

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

/// Discard exactly `count` bytes, failing on a short stream.
fn skip_bytes<R: Read>(reader: &mut R, count: u64) -> IoResult<()> {
    let skipped = io::copy(&mut reader.by_ref().take(count), &mut io::sink())?;
    if skipped != count {
        return Err(IoError::InvalidData("truncated BMP header".to_string()));
    }
    Ok(())
}

#[inline]
fn le_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

#[inline]
fn le_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

#[inline]
fn le_i32(b: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<Image> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header).map_err(IoError::Io)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }
    let pixel_offset = le_u32(&file_header, 10) as usize;

    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    reader.read_exact(&mut info_header).map_err(IoError::Io)?;

    let header_size = le_u32(&info_header, 0);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_i32(&info_header, 4);
    let height = le_i32(&info_header, 8);

    let planes = le_u16(&info_header, 12);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }

    let bits_per_pixel = le_u16(&info_header, 14);
    let compression = le_u32(&info_header, 16);
    let colors_used = le_u32(&info_header, 32) as usize;

    // Only support uncompressed BMP for now
    if compression != 0 && compression != 3 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }

    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();

    if !matches!(bits_per_pixel, 1 | 4 | 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    skip_bytes(&mut reader, u64::from(header_size - BMP_INFO_HEADER_SIZE))?;

    // Palette as RGB triples
    let palette: Vec<[u8; 3]> = if bits_per_pixel <= 8 {
        let max_colors = 1usize << bits_per_pixel;
        let num_colors = if colors_used == 0 {
            max_colors
        } else {
            colors_used.min(max_colors)
        };
        let mut raw = vec![0u8; num_colors * 4];
        reader.read_exact(&mut raw).map_err(IoError::Io)?;
        raw.chunks_exact(4).map(|q| [q[2], q[1], q[0]]).collect()
    } else {
        Vec::new()
    };
    let gray_palette = palette.iter().all(|c| c[0] == c[1] && c[1] == c[2]);

    let current_pos = BMP_FILE_HEADER_SIZE + header_size as usize + palette.len() * 4;
    if pixel_offset > current_pos {
        skip_bytes(&mut reader, (pixel_offset - current_pos) as u64)?;
    }

    let channels: u32 = match bits_per_pixel {
        1 | 4 | 8 if gray_palette => 1,
        1 | 4 | 8 | 24 => 3,
        _ => 4,
    };

    // BMP rows are 4-byte aligned
    let (row_stride, raster_size) = (width as usize)
        .checked_mul(bits_per_pixel as usize)
        .map(|bits| bits.div_ceil(32) * 4)
        .and_then(|stride| Some((stride, stride.checked_mul(height as usize)?)))
        .ok_or_else(|| {
            IoError::InvalidData(format!("BMP dimensions too large: {}x{}", width, height))
        })?;

    // The raster must be present in full before the image is allocated.
    let mut raster = Vec::new();
    reader
        .by_ref()
        .take(raster_size as u64)
        .read_to_end(&mut raster)?;
    if raster.len() != raster_size {
        return Err(IoError::InvalidData(format!(
            "truncated BMP raster: expected {} bytes, found {}",
            raster_size,
            raster.len()
        )));
    }

    let mut image = Image::new(width, height, channels)?;

    for (row, row_buffer) in (0..height).zip(raster.chunks_exact(row_stride.max(1))) {
        let y = if top_down { row } else { height - 1 - row };
        let Some(out) = image.row_mut(y) else {
            continue;
        };

        match bits_per_pixel {
            1 | 4 | 8 => {
                let per_byte = 8 / bits_per_pixel as usize;
                let mask = ((1u16 << bits_per_pixel) - 1) as u8;
                for x in 0..width as usize {
                    let byte = row_buffer[x / per_byte];
                    let shift = 8 - bits_per_pixel as usize * (x % per_byte + 1);
                    let index = ((byte >> shift) & mask) as usize;
                    let rgb = palette.get(index).copied().unwrap_or([0, 0, 0]);
                    if gray_palette {
                        out[x] = rgb[0];
                    } else {
                        out[x * 3..x * 3 + 3].copy_from_slice(&rgb);
                    }
                }
            }
            24 => {
                for (dst, src) in out.chunks_exact_mut(3).zip(row_buffer.chunks_exact(3)) {
                    dst.copy_from_slice(&[src[2], src[1], src[0]]);
                }
            }
            _ => {
                for (dst, src) in out.chunks_exact_mut(4).zip(row_buffer.chunks_exact(4)) {
                    dst.copy_from_slice(&[src[2], src[1], src[0], src[3]]);
                }
            }
        }
    }

    debug!(width, height, channels, bits_per_pixel, "decoded BMP");
    Ok(image)
}

/// Write a BMP image
///
/// 1-channel images are written as 8 bpp with a gray palette, 3-channel
/// as 24 bpp and 4-channel as 32 bpp BGRA.
pub fn write_bmp<W: Write>(image: &Image, mut writer: W) -> IoResult<()> {
    let width = image.width();
    let height = image.height();

    let bits_per_pixel: u16 = match image.channels() {
        1 => 8,
        3 => 24,
        4 => 32,
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {}-channel image as BMP",
                n
            )));
        }
    };
    let has_palette = bits_per_pixel == 8;

    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let pixel_data_size = row_stride * height as usize;
    let palette_size = if has_palette { 256 * 4 } else { 0 };
    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize + palette_size;
    let file_size = pixel_offset + pixel_data_size;

    let file_size = u32::try_from(file_size)
        .map_err(|_| IoError::EncodeError("image too large for BMP".to_string()))?;

    // File header
    writer.write_all(b"BM")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(&[0u8; 4])?; // Reserved
    writer.write_all(&(pixel_offset as u32).to_le_bytes())?;

    // Info header
    writer.write_all(&BMP_INFO_HEADER_SIZE.to_le_bytes())?;
    writer.write_all(&(width as i32).to_le_bytes())?;
    writer.write_all(&(height as i32).to_le_bytes())?; // Bottom-up
    writer.write_all(&1u16.to_le_bytes())?; // Planes
    writer.write_all(&bits_per_pixel.to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?; // Compression
    writer.write_all(&(pixel_data_size as u32).to_le_bytes())?;
    writer.write_all(&0i32.to_le_bytes())?; // X pixels per meter
    writer.write_all(&0i32.to_le_bytes())?; // Y pixels per meter
    writer.write_all(&0u32.to_le_bytes())?; // Colors used
    writer.write_all(&0u32.to_le_bytes())?; // Important colors

    if has_palette {
        for i in 0..=255u8 {
            writer.write_all(&[i, i, i, 0])?;
        }
    }

    let mut row_buffer = vec![0u8; row_stride];
    for row in 0..height {
        let y = height - 1 - row;
        let Some(src) = image.row(y) else {
            continue;
        };

        match bits_per_pixel {
            8 => row_buffer[..src.len()].copy_from_slice(src),
            24 => {
                for (dst, px) in row_buffer.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
                    dst.copy_from_slice(&[px[2], px[1], px[0]]);
                }
            }
            _ => {
                for (dst, px) in row_buffer.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                    dst.copy_from_slice(&[px[2], px[1], px[0], px[3]]);
                }
            }
        }

        writer.write_all(&row_buffer)?;
    }

    debug!(width, height, bits_per_pixel, "encoded BMP");
    Ok(())
}
