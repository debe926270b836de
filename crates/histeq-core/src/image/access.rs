//! Sample access functions
//!
//! Row, pixel and per-sample getters and setters for [`Image`].
//! Coordinates are checked; the `Option`/`Result` returns mirror each
//! other so callers can choose between silent and loud bounds handling.

use super::{Channel, Image};
use crate::error::{Error, Result};

impl Image {
    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.channels as usize)
    }

    /// Get the samples of row `y`.
    ///
    /// Returns `None` if `y` is out of bounds.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.row_stride();
        let start = y as usize * stride;
        Some(&self.data[start..start + stride])
    }

    /// Get mutable samples of row `y`.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.row_stride();
        let start = y as usize * stride;
        Some(&mut self.data[start..start + stride])
    }

    /// Get all channels of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let off = self.offset(x, y)?;
        Some(&self.data[off..off + self.channels as usize])
    }

    /// Get one sample at (x, y).
    ///
    /// Returns `None` if the coordinates or the channel are out of bounds.
    pub fn sample(&self, x: u32, y: u32, channel: Channel) -> Option<u8> {
        if channel.index() >= self.channels as usize {
            return None;
        }
        let off = self.offset(x, y)?;
        Some(self.data[off + channel.index()])
    }

    /// Set one sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannel`] for a bad channel and
    /// [`Error::IndexOutOfBounds`] for bad coordinates.
    pub fn set_sample(&mut self, x: u32, y: u32, channel: Channel, value: u8) -> Result<()> {
        self.check_channel(channel)?;
        let off = self.offset(x, y).ok_or(Error::IndexOutOfBounds {
            index: y as usize * self.width as usize + x as usize,
            len: self.pixel_count() as usize,
        })?;
        self.data[off + channel.index()] = value;
        Ok(())
    }

    /// Iterate over one channel's samples in raster order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannel`] if `channel` is out of range.
    pub fn channel_samples(&self, channel: Channel) -> Result<impl Iterator<Item = u8> + '_> {
        self.check_channel(channel)?;
        Ok(self
            .data
            .iter()
            .skip(channel.index())
            .step_by(self.channels as usize)
            .copied())
    }

    /// Copy one channel out into a single-channel image.
    pub fn extract_channel(&self, channel: Channel) -> Result<Image> {
        let data: Vec<u8> = self.channel_samples(channel)?.collect();
        Image::from_raw(self.width, self.height, 1, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_2x2() -> Image {
        Image::from_raw(
            2,
            2,
            3,
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        )
        .unwrap()
    }

    #[test]
    fn test_row_access() {
        let img = rgb_2x2();
        assert_eq!(img.row(1), Some(&[7u8, 8, 9, 10, 11, 12][..]));
        assert_eq!(img.row(2), None);
    }

    #[test]
    fn test_pixel_and_sample() {
        let img = rgb_2x2();
        assert_eq!(img.pixel(1, 0), Some(&[4u8, 5, 6][..]));
        assert_eq!(img.sample(0, 1, Channel::new(2)), Some(9));
        assert_eq!(img.sample(0, 1, Channel::new(3)), None);
        assert_eq!(img.sample(2, 0, Channel::FIRST), None);
    }

    #[test]
    fn test_set_sample() {
        let mut img = rgb_2x2();
        img.set_sample(1, 1, Channel::new(1), 99).unwrap();
        assert_eq!(img.sample(1, 1, Channel::new(1)), Some(99));
        assert!(img.set_sample(5, 0, Channel::FIRST, 0).is_err());
        assert!(img.set_sample(0, 0, Channel::new(4), 0).is_err());
    }

    #[test]
    fn test_channel_samples() {
        let img = rgb_2x2();
        let greens: Vec<u8> = img.channel_samples(Channel::new(1)).unwrap().collect();
        assert_eq!(greens, vec![2, 5, 8, 11]);
    }

    #[test]
    fn test_extract_channel() {
        let img = rgb_2x2();
        let blue = img.extract_channel(Channel::new(2)).unwrap();
        assert_eq!(blue.channels(), 1);
        assert_eq!(blue.data(), &[3, 6, 9, 12]);
    }
}
