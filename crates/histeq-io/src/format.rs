//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header,
//! and picks an encoder from a file extension.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// BMP format
    Bmp,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
    /// PNM format (PGM / PPM)
    Pnm,
    /// Truevision TGA format
    Tga,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Bmp => "bmp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Pnm => "pnm",
            Self::Tga => "tga",
        }
    }

    /// Pick a format from a file extension (case-insensitive).
    ///
    /// Returns [`ImageFormat::Unknown`] for unrecognized extensions.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => Self::Bmp,
            "jpg" | "jpeg" | "jfif" => Self::Jpeg,
            "png" => Self::Png,
            "pnm" | "pgm" | "ppm" => Self::Pnm,
            "tga" | "targa" => Self::Tga,
            _ => Self::Unknown,
        }
    }

    /// Pick a format from the extension of `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }
}

/// Magic numbers for image format detection
mod magic {
    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// PNM formats (graymap and pixmap, ASCII and binary)
    pub const PGM_ASCII: &[u8] = b"P2";
    pub const PPM_ASCII: &[u8] = b"P3";
    pub const PGM_BINARY: &[u8] = b"P5";
    pub const PPM_BINARY: &[u8] = b"P6";
}

/// TGA header length; TGA has no magic number, so the header is checked
/// field by field instead.
const TGA_HEADER_SIZE: usize = 18;

/// Detect image format from a file path
///
/// Falls back to the extension for TGA files whose header is not
/// recognized by content.
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let path = path.as_ref();
    let file = File::open(path).map_err(IoError::Io)?;
    let mut header = Vec::with_capacity(TGA_HEADER_SIZE);
    file.take(TGA_HEADER_SIZE as u64)
        .read_to_end(&mut header)
        .map_err(IoError::Io)?;
    match detect_format_from_bytes(&header) {
        Err(_) if ImageFormat::from_path(path) == ImageFormat::Tga => Ok(ImageFormat::Tga),
        result => result,
    }
}

/// Check whether `data` starts with a plausible TGA header.
fn looks_like_tga(data: &[u8]) -> bool {
    if data.len() < TGA_HEADER_SIZE {
        return false;
    }
    let colormap_type = data[1];
    let image_type = data[2];
    let width = u16::from_le_bytes([data[12], data[13]]);
    let height = u16::from_le_bytes([data[14], data[15]]);
    let depth = data[16];
    let descriptor = data[17];

    let type_ok = match image_type {
        // color-mapped, raw and RLE
        1 | 9 => colormap_type == 1,
        // true-color and grayscale, raw and RLE
        2 | 3 | 10 | 11 => colormap_type <= 1,
        _ => false,
    };
    let colormap_ok = colormap_type == 1 || data[3..8].iter().all(|&b| b == 0);

    type_ok
        && colormap_ok
        && width > 0
        && height > 0
        && matches!(depth, 8 | 15 | 16 | 24 | 32)
        && descriptor & 0xC0 == 0
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::BMP) {
        return Ok(ImageFormat::Bmp);
    }

    if data.len() >= 8 && data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }

    if data.len() >= 3 && data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }

    let first_two = &data[..2];
    if first_two == magic::PGM_ASCII
        || first_two == magic::PPM_ASCII
        || first_two == magic::PGM_BINARY
        || first_two == magic::PPM_BINARY
    {
        return Ok(ImageFormat::Pnm);
    }

    if looks_like_tga(data) {
        return Ok(ImageFormat::Tga);
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}
