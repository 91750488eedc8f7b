//! Hue-sweep palette with a reserved background entry.
//!
//! Entry 0 is always black. Entries `1..=size` sweep hue linearly over
//! `[0, 1)` at [`SWEEP_SATURATION`] and [`SWEEP_VALUE`], so a palette index
//! doubles as a density rank: higher index, later hue.

use super::error::PaletteError;
use crate::color::{Hsv, Rgb};

/// Number of sweep entries in a full 8-bit palette (plus one background).
pub const DEFAULT_PALETTE_SIZE: usize = 255;

/// Saturation shared by every sweep entry.
pub const SWEEP_SATURATION: f64 = 0.9;

/// Value (brightness) shared by every sweep entry.
pub const SWEEP_VALUE: f64 = 0.9;

/// An ordered, immutable list of colors.
///
/// Built once per render and handed around by reference. Index 0 is the
/// background.
///
/// # Example
///
/// ```
/// use hue_palette::{Palette, Rgb};
///
/// let palette = Palette::generate(4).unwrap();
///
/// assert_eq!(palette.len(), 5);
/// assert_eq!(palette.color(0), Rgb::BLACK);
/// assert_eq!(palette.color(1), Rgb::new(229, 22, 22));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Generate a palette with `size` sweep entries after the background.
    ///
    /// For `i` in `0..size` the entry at `i + 1` is
    /// `Hsv(i / size, 0.9, 0.9)` truncated to 8 bits.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidSize`] when `size` is zero or larger
    /// than [`DEFAULT_PALETTE_SIZE`] (the result must fit 8-bit indices).
    pub fn generate(size: usize) -> Result<Self, PaletteError> {
        if size == 0 || size > DEFAULT_PALETTE_SIZE {
            return Err(PaletteError::InvalidSize { size });
        }

        Ok(Self::sweep(size))
    }

    fn sweep(size: usize) -> Self {
        let mut colors = Vec::with_capacity(size + 1);
        colors.push(Rgb::BLACK);
        colors.extend((0..size).map(|i| {
            let hue = i as f64 / size as f64;
            Hsv::new(hue, SWEEP_SATURATION, SWEEP_VALUE).to_rgb()
        }));
        Self { colors }
    }

    /// Number of entries, background included.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; construction rejects empty sweeps.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index]
    }

    /// All entries in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Highest valid index.
    #[inline]
    pub fn max_index(&self) -> u8 {
        (self.colors.len() - 1) as u8
    }

    /// Flattened `[R, G, B, R, G, B, ...]` bytes, the layout of a PNG PLTE chunk.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_bytes()).collect()
    }
}

impl Default for Palette {
    /// The full 256-entry palette.
    fn default() -> Self {
        Self::sweep(DEFAULT_PALETTE_SIZE)
    }
}
