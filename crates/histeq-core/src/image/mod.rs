//! Image - The pixel buffer container
//!
//! `Image` owns a contiguous byte array holding 8-bit samples in
//! row-major order with interleaved channels. Sample `c` of pixel
//! `(x, y)` lives at `(y * width + x) * channels + c`.
//!
//! # Shape rules
//!
//! - `channels` is at least 1
//! - `data.len() == width * height * channels`
//! - zero width or height is allowed; such an image has no pixels and
//!   is rejected later by lookup table construction

mod access;

use crate::error::{Error, Result};
use std::fmt;

/// Selects one byte of every pixel.
///
/// The selector is validated against an image with
/// [`Image::check_channel`] before any phase touches pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Channel(usize);

impl Channel {
    /// The first byte of each pixel (gray, or red for RGB data).
    pub const FIRST: Channel = Channel(0);

    /// Create a selector for the given byte offset within a pixel.
    pub const fn new(index: usize) -> Self {
        Channel(index)
    }

    /// Byte offset within a pixel.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Channel {
    fn from(index: usize) -> Self {
        Channel(index)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 8-bit interleaved raster image
///
/// # Examples
///
/// ```
/// use histeq_core::Image;
///
/// let img = Image::new(640, 480, 3).unwrap();
/// assert_eq!(img.width(), 640);
/// assert_eq!(img.pixel_count(), 640 * 480);
/// assert_eq!(img.data().len(), 640 * 480 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Bytes per pixel
    channels: u32,
    /// Row-major interleaved samples
    data: Vec<u8>,
}

impl Image {
    /// Create a zero-filled image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannelCount`] if `channels` is 0, or
    /// [`Error::ImageTooLarge`] if the sample count overflows `usize`.
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        let len = Self::sample_count(width, height, channels)?;
        Ok(Image {
            width,
            height,
            channels,
            data: vec![0u8; len],
        })
    }

    /// Wrap an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data` does not hold
    /// exactly `width * height * channels` samples.
    pub fn from_raw(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        let expected = Self::sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Image {
            width,
            height,
            channels,
            data,
        })
    }

    /// Build an image from wide, externally supplied samples.
    ///
    /// Every value must lie in `[0, 255]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SampleOutOfRange`] for the first offending
    /// sample, plus the shape errors of [`Image::from_raw`].
    pub fn from_samples(width: u32, height: u32, channels: u32, samples: &[i32]) -> Result<Self> {
        let expected = Self::sample_count(width, height, channels)?;
        if samples.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        let data = samples
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                u8::try_from(value).map_err(|_| Error::SampleOutOfRange {
                    index,
                    value: i64::from(value),
                })
            })
            .collect::<Result<Vec<u8>>>()?;
        Ok(Image {
            width,
            height,
            channels,
            data,
        })
    }

    /// Allocate a zero-filled image with the same shape as `self`.
    pub fn new_like(&self) -> Self {
        Image {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: vec![0u8; self.data.len()],
        }
    }

    fn sample_count(width: u32, height: u32, channels: u32) -> Result<usize> {
        if channels == 0 {
            return Err(Error::InvalidChannelCount(channels));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels as usize))
            .ok_or(Error::ImageTooLarge {
                width,
                height,
                channels,
            })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Number of pixels (`width * height`), independent of channel count.
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// True if the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get raw access to the sample buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable access to the sample buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the image and return its sample buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Verify that `channel` addresses a byte inside each pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannel`] if `channel >= channels`.
    pub fn check_channel(&self, channel: Channel) -> Result<()> {
        if channel.index() >= self.channels as usize {
            return Err(Error::InvalidChannel {
                channel: channel.index(),
                channels: self.channels,
            });
        }
        Ok(())
    }

    /// True if `self` and `other` have identical width, height and channels.
    pub fn same_shape(&self, other: &Image) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zero_filled() {
        let img = Image::new(4, 3, 2).unwrap();
        assert_eq!(img.data().len(), 24);
        assert!(img.data().iter().all(|&v| v == 0));
        assert_eq!(img.pixel_count(), 12);
        assert_eq!(img.row_stride(), 8);
    }

    #[test]
    fn test_new_zero_channels() {
        assert_eq!(
            Image::new(4, 4, 0).unwrap_err(),
            Error::InvalidChannelCount(0)
        );
    }

    #[test]
    fn test_empty_image_allowed() {
        let img = Image::new(0, 10, 1).unwrap();
        assert!(img.is_empty());
        assert_eq!(img.pixel_count(), 0);
        assert!(img.data().is_empty());
    }

    #[test]
    fn test_from_raw_size_mismatch() {
        let err = Image::from_raw(2, 2, 3, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            Error::BufferSizeMismatch {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_from_samples_in_range() {
        let img = Image::from_samples(2, 1, 1, &[0, 255]).unwrap();
        assert_eq!(img.data(), &[0, 255]);
    }

    #[test]
    fn test_from_samples_out_of_range() {
        let err = Image::from_samples(3, 1, 1, &[0, 256, 3]).unwrap_err();
        assert_eq!(
            err,
            Error::SampleOutOfRange {
                index: 1,
                value: 256
            }
        );
        let err = Image::from_samples(1, 1, 1, &[-1]).unwrap_err();
        assert!(matches!(err, Error::SampleOutOfRange { index: 0, .. }));
    }

    #[test]
    fn test_check_channel() {
        let img = Image::new(2, 2, 3).unwrap();
        assert!(img.check_channel(Channel::new(2)).is_ok());
        assert_eq!(
            img.check_channel(Channel::new(3)).unwrap_err(),
            Error::InvalidChannel {
                channel: 3,
                channels: 3
            }
        );
    }

    #[test]
    fn test_new_like_does_not_share() {
        let mut src = Image::new(2, 2, 1).unwrap();
        src.data_mut().fill(7);
        let dst = src.new_like();
        assert!(dst.same_shape(&src));
        assert!(dst.data().iter().all(|&v| v == 0));
    }
}
