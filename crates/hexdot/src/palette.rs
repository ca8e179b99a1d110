//! Named color palettes with nearest-color matching.
//!
//! A [`Palette`] is an ordered list of named reference colors that source
//! pixels are snapped to. Validation happens once at construction; after
//! that the palette is immutable and shared by reference through the whole
//! pipeline.

use std::str::FromStr;

use thiserror::Error;

use crate::color::{ParseColorError, Rgb};

/// Upper bound on palette size. [`IndexGrid`](crate::IndexGrid) cells store
/// `u8` palette indices, so a palette may hold at most 256 entries.
pub const MAX_ENTRIES: usize = 256;

/// One named reference color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Display name, e.g. "Sky Blue". Non-empty, unique within a palette
    /// (case-insensitively).
    pub name: String,
    /// The reference color pixels are snapped to.
    pub color: Rgb,
}

impl PaletteEntry {
    /// Create a palette entry.
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No entries provided.
    #[error("palette cannot be empty")]
    Empty,

    /// An entry has an empty name.
    #[error("palette entry at index {index} has an empty name")]
    EmptyName {
        /// Index of the offending entry.
        index: usize,
    },

    /// Two entries share a name (case-insensitively).
    #[error("duplicate palette name {name:?} at index {index}")]
    DuplicateName {
        /// The duplicated name as it appears at the later position.
        name: String,
        /// Index of the later duplicate.
        index: usize,
    },

    /// More entries than an `u8` cell index can address.
    #[error("palette has {count} entries (at most 256 supported)")]
    TooManyEntries {
        /// Number of entries provided.
        count: usize,
    },

    /// A hex color token failed to parse.
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}

/// An ordered, validated list of named reference colors.
///
/// # Example
///
/// ```
/// use hexdot::{Palette, PaletteEntry, Rgb};
///
/// let palette = Palette::new(vec![
///     PaletteEntry::new("Scarlet Red", Rgb::new(222, 56, 49)),
///     PaletteEntry::new("Sky Blue", Rgb::new(86, 180, 233)),
/// ])
/// .unwrap();
///
/// let (idx, entry) = palette.find_nearest(Rgb::new(200, 40, 40));
/// assert_eq!(idx, 0);
/// assert_eq!(entry.name, "Scarlet Red");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Create a palette from entries, validating the palette invariants:
    /// non-empty, at most [`MAX_ENTRIES`] entries, non-empty names, and
    /// case-insensitively unique names.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::Empty);
        }
        if entries.len() > MAX_ENTRIES {
            return Err(PaletteError::TooManyEntries {
                count: entries.len(),
            });
        }
        let mut seen: Vec<String> = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.name.is_empty() {
                return Err(PaletteError::EmptyName { index });
            }
            let lower = entry.name.to_lowercase();
            if seen.contains(&lower) {
                return Err(PaletteError::DuplicateName {
                    name: entry.name.clone(),
                    index,
                });
            }
            seen.push(lower);
        }
        Ok(Self { entries })
    }

    /// Create a palette from `(name, hex)` pairs.
    ///
    /// Hex tokens must be exactly 6 hex digits with an optional leading `#`.
    ///
    /// # Example
    ///
    /// ```
    /// use hexdot::Palette;
    ///
    /// let palette =
    ///     Palette::from_hex(&[("Charcoal", "#222222"), ("Lemon Yellow", "F7D94C")]).unwrap();
    /// assert_eq!(palette.len(), 2);
    /// ```
    pub fn from_hex(pairs: &[(&str, &str)]) -> Result<Self, PaletteError> {
        let entries = pairs
            .iter()
            .map(|&(name, hex)| Ok(PaletteEntry::new(name, Rgb::from_str(hex)?)))
            .collect::<Result<Vec<_>, ParseColorError>>()?;
        Palette::new(entries)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in palette order.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// The entry at the given index.
    #[inline]
    pub fn entry(&self, idx: usize) -> &PaletteEntry {
        &self.entries[idx]
    }

    /// Look up an entry by name, case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Option<&PaletteEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Find the entry whose color minimizes squared Euclidean RGB distance
    /// to `color`.
    ///
    /// Ties break to the first entry achieving the minimum, in palette
    /// order, so matching is deterministic and stable.
    pub fn find_nearest(&self, color: Rgb) -> (usize, &PaletteEntry) {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, entry) in self.entries.iter().enumerate() {
            let dist = color.distance_squared(entry.color);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, &self.entries[best_idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_color_palette() -> Palette {
        Palette::new(vec![
            PaletteEntry::new("Black", Rgb::new(0, 0, 0)),
            PaletteEntry::new("White", Rgb::new(255, 255, 255)),
        ])
        .unwrap()
    }

    #[test]
    fn test_basic_construction() {
        let palette = two_color_palette();
        assert_eq!(palette.len(), 2);
        assert!(!palette.is_empty());
        assert_eq!(palette.entry(1).name, "White");
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(Palette::new(vec![]), Err(PaletteError::Empty));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Palette::new(vec![PaletteEntry::new("", Rgb::new(0, 0, 0))]);
        assert_eq!(result, Err(PaletteError::EmptyName { index: 0 }));
    }

    #[test]
    fn test_duplicate_name_rejected_case_insensitively() {
        let result = Palette::new(vec![
            PaletteEntry::new("Sky Blue", Rgb::new(86, 180, 233)),
            PaletteEntry::new("SKY BLUE", Rgb::new(0, 0, 255)),
        ]);
        assert_eq!(
            result,
            Err(PaletteError::DuplicateName {
                name: "SKY BLUE".to_string(),
                index: 1,
            })
        );
    }

    #[test]
    fn test_too_many_entries_rejected() {
        let entries: Vec<PaletteEntry> = (0..=MAX_ENTRIES)
            .map(|i| {
                PaletteEntry::new(
                    format!("c{i}"),
                    Rgb::new((i % 256) as u8, (i / 256) as u8, 0),
                )
            })
            .collect();
        let result = Palette::new(entries);
        assert_eq!(
            result,
            Err(PaletteError::TooManyEntries {
                count: MAX_ENTRIES + 1,
            })
        );
    }

    #[test]
    fn test_from_hex() {
        let palette = Palette::from_hex(&[("A", "#FF0000"), ("B", "0000ff")]).unwrap();
        assert_eq!(palette.entry(0).color, Rgb::new(255, 0, 0));
        assert_eq!(palette.entry(1).color, Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_from_hex_invalid_token() {
        let result = Palette::from_hex(&[("A", "#XYZXYZ")]);
        assert!(matches!(result, Err(PaletteError::ParseColor(_))));
    }

    #[test]
    fn test_find_by_name_case_insensitive() {
        let palette = two_color_palette();
        assert!(palette.find_by_name("white").is_some());
        assert!(palette.find_by_name("WHITE").is_some());
        assert!(palette.find_by_name("Gray").is_none());
    }

    #[test]
    fn test_find_nearest_exact_match() {
        let palette = two_color_palette();
        let (idx, entry) = palette.find_nearest(Rgb::new(255, 255, 255));
        assert_eq!(idx, 1);
        assert_eq!(entry.color, Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_find_nearest_tie_breaks_to_first() {
        // Equidistant from both entries: first in palette order wins.
        let palette = Palette::new(vec![
            PaletteEntry::new("Low", Rgb::new(100, 0, 0)),
            PaletteEntry::new("High", Rgb::new(200, 0, 0)),
        ])
        .unwrap();
        let (idx, _) = palette.find_nearest(Rgb::new(150, 0, 0));
        assert_eq!(idx, 0, "Tie should break to the first palette entry");
    }

    #[test]
    fn test_find_nearest_single_entry() {
        let palette =
            Palette::new(vec![PaletteEntry::new("Only", Rgb::new(10, 20, 30))]).unwrap();
        for probe in [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)] {
            let (idx, _) = palette.find_nearest(probe);
            assert_eq!(idx, 0);
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(PaletteError::Empty.to_string(), "palette cannot be empty");
        assert_eq!(
            PaletteError::DuplicateName {
                name: "Red".to_string(),
                index: 3,
            }
            .to_string(),
            "duplicate palette name \"Red\" at index 3"
        );
    }
}
