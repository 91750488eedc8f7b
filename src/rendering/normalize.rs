//! Count → color normalization.
//!
//! Both strategies normalize against the grid maximum `M` and keep empty
//! cells at the background. A grid with `M == 0` renders as background
//! everywhere.

use hue_palette::{Hsv, Palette, Rgb, SWEEP_SATURATION, SWEEP_VALUE};

use crate::models::NormalizationStrategy;
use crate::rendering::grid::DensityGrid;

/// Palette index for `count` against grid maximum `max`.
///
/// `floor(top * count / max) + 1`, where `top` is one less than the
/// highest palette index (254 for the full 256-entry palette). Empty
/// cells map to 0.
#[inline]
pub fn linear_index(count: u32, max: u32, max_index: u8) -> u8 {
    if count == 0 || max == 0 {
        return 0;
    }
    let top = max_index.saturating_sub(1) as u64;
    let scaled = top * count.min(max) as u64 / max as u64;
    scaled as u8 + 1
}

/// Hue in degrees for `count`: `min(360, 360 * ln(1 + c) / ln(1 + M))`.
#[inline]
pub fn log_hue_degrees(count: u32, max: u32) -> f64 {
    let ratio = (count as f64).ln_1p() / (max as f64).ln_1p();
    (360.0 * ratio).min(360.0)
}

/// RGB color for `count` on the logarithmic hue scale, black when empty.
#[inline]
pub fn log_hue_color(count: u32, max: u32) -> Rgb {
    if count == 0 || max == 0 {
        return Rgb::BLACK;
    }
    Hsv::from_degrees(log_hue_degrees(count, max), SWEEP_SATURATION, SWEEP_VALUE).to_rgb()
}

/// Shared color computation for one grid.
///
/// Owns nothing but the grid maximum; the palette is borrowed.
#[derive(Debug, Clone, Copy)]
pub struct Colorizer<'a> {
    strategy: NormalizationStrategy,
    palette: &'a Palette,
    max: u32,
}

impl<'a> Colorizer<'a> {
    pub fn new(strategy: NormalizationStrategy, palette: &'a Palette, grid: &DensityGrid) -> Self {
        Self {
            strategy,
            palette,
            max: grid.max(),
        }
    }

    pub fn strategy(&self) -> NormalizationStrategy {
        self.strategy
    }

    pub fn palette(&self) -> &'a Palette {
        self.palette
    }

    /// Grid maximum the colors are normalized against.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// True when colors are palette entries and can be written as indices.
    pub fn is_indexed(&self) -> bool {
        self.strategy == NormalizationStrategy::LinearToPalette
    }

    /// Linear palette index for `count`.
    #[inline]
    pub fn index(&self, count: u32) -> u8 {
        linear_index(count, self.max, self.palette.max_index())
    }

    /// Final color for `count` under the configured strategy.
    #[inline]
    pub fn color(&self, count: u32) -> Rgb {
        match self.strategy {
            NormalizationStrategy::LinearToPalette => self.palette.color(self.index(count) as usize),
            NormalizationStrategy::LogarithmicHue => log_hue_color(count, self.max),
        }
    }

    /// Lazy, single-pass sequence of palette-index rows, top to bottom.
    pub fn indexed_rows<'g>(&self, grid: &'g DensityGrid) -> IndexedRows<'g, 'a> {
        IndexedRows {
            grid,
            colorizer: *self,
            next_row: 0,
        }
    }

    /// Full `height × width × 3` RGB buffer.
    pub fn rgb_buffer(&self, grid: &DensityGrid) -> Vec<u8> {
        let mut buf = Vec::with_capacity(grid.len() * 3);
        for i in 0..grid.len() {
            buf.extend_from_slice(&self.color(grid.count_at(i)).to_bytes());
        }
        buf
    }
}

/// Row producer for streamed output; each item is one row of indices.
pub struct IndexedRows<'g, 'a> {
    grid: &'g DensityGrid,
    colorizer: Colorizer<'a>,
    next_row: u32,
}

impl Iterator for IndexedRows<'_, '_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row >= self.grid.height() {
            return None;
        }
        let row = self
            .grid
            .row(self.next_row as usize)
            .map(|c| self.colorizer.index(c))
            .collect();
        self.next_row += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.grid.height() - self.next_row) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for IndexedRows<'_, '_> {}
