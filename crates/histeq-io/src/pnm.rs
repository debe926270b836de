//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary) with a
//! maxval of at most 255; smaller maxvals are rescaled to the full
//! 8-bit range. Writes binary P5 (1 channel) and P6 (3 channels).
//! Bitmaps (P1/P4) and 16-bit maps are not 8-bit sample data and are
//! rejected.

use crate::{IoError, IoResult};
use histeq_core::Image;
use std::io::{Read, Write};
use tracing::debug;

/// Cursor over the raw PNM bytes.
struct Parser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn skip_whitespace_and_comments(&mut self) {
        while self.pos < self.data.len() {
            match self.data[self.pos] {
                b'#' => {
                    while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                c if c.is_ascii_whitespace() => self.pos += 1,
                _ => break,
            }
        }
    }

    fn next_u32(&mut self, what: &str) -> IoResult<u32> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self.pos < self.data.len() && self.data[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("bad PNM {}", what)))
    }
}

/// Read a PNM image (P2/P3/P5/P6) from a reader.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Image> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;

    if raw.len() < 2 || raw[0] != b'P' {
        return Err(IoError::InvalidData("not a PNM file".to_string()));
    }
    let (channels, binary) = match raw[1] {
        b'2' => (1u32, false),
        b'3' => (3, false),
        b'5' => (1, true),
        b'6' => (3, true),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type: P{}",
                other as char
            )));
        }
    };

    let mut parser = Parser {
        data: &raw,
        pos: 2,
    };
    let width = parser.next_u32("width")?;
    let height = parser.next_u32("height")?;
    let maxval = parser.next_u32("maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNM maxval: {}",
            maxval
        )));
    }

    let count = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or_else(|| {
            IoError::InvalidData(format!("PNM dimensions too large: {}x{}", width, height))
        })?;

    let mut samples = if binary {
        // exactly one whitespace byte separates the header from the raster
        let start = parser.pos + 1;
        let available = raw.len().saturating_sub(start);
        if count > available {
            return Err(IoError::InvalidData(format!(
                "truncated PNM raster: expected {} bytes, found {}",
                count, available
            )));
        }
        raw[start..start + count].to_vec()
    } else {
        // every ASCII sample takes at least one byte
        let mut samples = Vec::with_capacity(count.min(raw.len()));
        for _ in 0..count {
            let v = parser.next_u32("sample")?;
            if v > maxval {
                return Err(IoError::InvalidData(format!(
                    "PNM sample {} exceeds maxval {}",
                    v, maxval
                )));
            }
            samples.push(v as u8);
        }
        samples
    };

    if maxval != 255 {
        for s in samples.iter_mut() {
            *s = ((u32::from(*s) * 255 + maxval / 2) / maxval).min(255) as u8;
        }
    }

    debug!(width, height, channels, "decoded PNM");
    Ok(Image::from_raw(width, height, channels, samples)?)
}

/// Write an image as binary PNM to a writer.
///
/// Chooses P5 (1 channel) or P6 (3 channels).
pub fn write_pnm<W: Write>(image: &Image, mut writer: W) -> IoResult<()> {
    let magic = match image.channels() {
        1 => "P5",
        3 => "P6",
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {}-channel image as PNM",
                n
            )));
        }
    };
    write!(writer, "{}\n{} {}\n255\n", magic, image.width(), image.height())?;
    writer.write_all(image.data())?;

    debug!(width = image.width(), height = image.height(), magic, "encoded PNM");
    Ok(())
}
