//! histeq-io - Image I/O for histeq
//!
//! Decodes files into [`histeq_core::Image`] buffers of 8-bit samples and
//! encodes them back out.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | BMP    | 1/4/8/24/32 bpp | 8/24/32 bpp | `bmp` |
//! | PNM    | P2, P3, P5, P6 | P5, P6 | `pnm` |
//! | PNG    | all color types | gray, gray+alpha, RGB, RGBA | `png-format` |
//! | JPEG   | gray, RGB | gray, RGB, RGBA | `jpeg` |
//! | TGA    | raw and RLE gray, RGB, RGBA, color-mapped | gray, gray+alpha, RGB, RGBA | `tga` |
//!
//! All formats are enabled by default. A format whose feature is disabled
//! is reported as [`IoError::UnsupportedFormat`].

mod error;
mod format;

#[cfg(feature = "bmp")]
pub mod bmp;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;
#[cfg(feature = "tga")]
pub mod tga;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use histeq_core::Image;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;
use tracing::debug;

/// Read an image from a file, detecting its format from the content.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    debug!(path = %path.display(), ?format, "reading image");
    let reader = BufReader::new(File::open(path)?);
    read_image_format(reader, format)
}

/// Read an image from an in-memory encoded buffer.
pub fn read_image_from_bytes(data: &[u8]) -> IoResult<Image> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

/// Read an image of a known format from a reader.
#[allow(unused_variables)]
pub fn read_image_format<R: BufRead + Seek>(reader: R, format: ImageFormat) -> IoResult<Image> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[cfg(feature = "tga")]
        ImageFormat::Tga => tga::read_tga(reader),
        _ => Err(IoError::UnsupportedFormat(format!(
            "reading {:?} is not supported",
            format
        ))),
    }
}

/// Write an image to a file in the given format.
///
/// [`ImageFormat::Unknown`] falls back to the format implied by the
/// path's extension.
pub fn write_image<P: AsRef<Path>>(image: &Image, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let format = match format {
        ImageFormat::Unknown => ImageFormat::from_path(path),
        other => other,
    };
    debug!(path = %path.display(), ?format, "writing image");
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(image, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into an in-memory buffer.
pub fn write_image_to_bytes(image: &Image, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(image, &mut buffer, format)?;
    Ok(buffer)
}

/// Encode an image of a known format to a writer.
#[allow(unused_variables)]
pub fn write_image_format<W: Write>(
    image: &Image,
    writer: W,
    format: ImageFormat,
) -> IoResult<()> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::write_bmp(image, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(image, writer, jpeg::DEFAULT_QUALITY),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(image, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(image, writer),
        #[cfg(feature = "tga")]
        ImageFormat::Tga => tga::write_tga(image, writer),
        _ => Err(IoError::UnsupportedFormat(format!(
            "writing {:?} is not supported",
            format
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_rejected() {
        let img = Image::new(1, 1, 1).unwrap();
        assert!(matches!(
            write_image_to_bytes(&img, ImageFormat::Unknown),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_bytes_dispatch_by_content() {
        let img = Image::from_raw(2, 1, 1, vec![7, 200]).unwrap();
        for format in [
            ImageFormat::Bmp,
            ImageFormat::Png,
            ImageFormat::Pnm,
            ImageFormat::Tga,
        ] {
            let bytes = write_image_to_bytes(&img, format).unwrap();
            assert_eq!(detect_format_from_bytes(&bytes).unwrap(), format);
            assert_eq!(read_image_from_bytes(&bytes).unwrap(), img);
        }
    }
}
