//! Level remapping lookup table
//!
//! A `LookupTable` maps every old 8-bit level to a new one. Tables built
//! from a cumulative distribution are non-decreasing; tables supplied from
//! outside go through [`LookupTable::from_levels`], which performs the
//! length and range checks.

use crate::error::{Error, Result};
use crate::histogram::LEVELS;
use std::ops::Index;

/// 256-entry level remapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupTable([u8; LEVELS]);

impl Default for LookupTable {
    fn default() -> Self {
        Self::identity()
    }
}

impl LookupTable {
    /// The table that maps every level to itself.
    pub fn identity() -> Self {
        let mut table = [0u8; LEVELS];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as u8;
        }
        LookupTable(table)
    }

    /// Wrap a complete table.
    pub const fn from_array(table: [u8; LEVELS]) -> Self {
        LookupTable(table)
    }

    /// Build a table from externally supplied levels.
    ///
    /// Only the first 256 entries are used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LookupTableTooShort`] if fewer than 256 entries are
    /// given, or [`Error::LevelOutOfRange`] if an entry exceeds 255.
    pub fn from_levels(levels: &[u32]) -> Result<Self> {
        if levels.len() < LEVELS {
            return Err(Error::LookupTableTooShort { len: levels.len() });
        }
        let mut table = [0u8; LEVELS];
        for (index, (dst, &value)) in table.iter_mut().zip(levels.iter()).enumerate() {
            *dst = u8::try_from(value).map_err(|_| Error::LevelOutOfRange { index, value })?;
        }
        Ok(LookupTable(table))
    }

    /// Map one level.
    #[inline]
    pub fn map(&self, level: u8) -> u8 {
        self.0[level as usize]
    }

    /// Borrow the raw table.
    #[inline]
    pub fn as_array(&self) -> &[u8; LEVELS] {
        &self.0
    }

    /// True if `table[i] <= table[i + 1]` for every `i`.
    pub fn is_monotonic(&self) -> bool {
        self.0.windows(2).all(|w| w[0] <= w[1])
    }

    /// True if this is the identity mapping.
    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &v)| v as usize == i)
    }
}

impl Index<u8> for LookupTable {
    type Output = u8;

    fn index(&self, level: u8) -> &u8 {
        &self.0[level as usize]
    }
}

impl From<[u8; LEVELS]> for LookupTable {
    fn from(table: [u8; LEVELS]) -> Self {
        LookupTable(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let lut = LookupTable::identity();
        assert!(lut.is_identity());
        assert!(lut.is_monotonic());
        assert_eq!(lut.map(77), 77);
    }

    #[test]
    fn test_from_levels_ok() {
        let levels: Vec<u32> = (0..256).map(|i| 255 - i).collect();
        let lut = LookupTable::from_levels(&levels).unwrap();
        assert_eq!(lut[0u8], 255);
        assert_eq!(lut[255u8], 0);
        assert!(!lut.is_monotonic());
    }

    #[test]
    fn test_from_levels_extra_entries_ignored() {
        let levels: Vec<u32> = (0..300).map(|i| i.min(255)).collect();
        let lut = LookupTable::from_levels(&levels).unwrap();
        assert!(lut.is_identity());
    }

    #[test]
    fn test_from_levels_too_short() {
        let levels = vec![0u32; 255];
        assert_eq!(
            LookupTable::from_levels(&levels).unwrap_err(),
            Error::LookupTableTooShort { len: 255 }
        );
    }

    #[test]
    fn test_from_levels_out_of_range() {
        let mut levels = vec![0u32; 256];
        levels[10] = 256;
        assert_eq!(
            LookupTable::from_levels(&levels).unwrap_err(),
            Error::LevelOutOfRange {
                index: 10,
                value: 256
            }
        );
    }
}
