//! Density grid: per-cell point counts with a saturation cap.
//!
//! Cells are stored row-major. When the cap fits in a byte the grid uses
//! 8-bit counters, which is what makes 100k×100k canvases feasible at all;
//! larger caps fall back to 32-bit counters.

use crate::error::{ConfigError, HeatmapError};
use crate::models::{BoundingBox, ProjectedPoint};

/// Counter storage, narrowest width that holds `max_count`.
#[derive(Debug, Clone, PartialEq)]
enum Cells {
    Narrow(Vec<u8>),
    Wide(Vec<u32>),
}

/// A `width × height` grid of saturating counters.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    width: u32,
    height: u32,
    max_count: u32,
    cells: Cells,
}

impl DensityGrid {
    /// Create an empty grid.
    pub fn new(width: u32, height: u32, max_count: u32) -> Self {
        let len = width as usize * height as usize;
        let cells = if max_count <= u8::MAX as u32 {
            Cells::Narrow(vec![0; len])
        } else {
            Cells::Wide(vec![0; len])
        };
        Self {
            width,
            height,
            max_count,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Saturation cap.
    #[inline]
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Bits per counter (8 or 32).
    pub fn counter_bits(&self) -> u32 {
        match self.cells {
            Cells::Narrow(_) => 8,
            Cells::Wide(_) => 32,
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        match &self.cells {
            Cells::Narrow(v) => v.len(),
            Cells::Wide(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add one point to a cell, clamping at `max_count`.
    pub fn increment(&mut self, col: usize, row: usize) {
        let idx = row * self.width as usize + col;
        match &mut self.cells {
            Cells::Narrow(v) => {
                // max_count <= 255 here, so the add cannot overflow
                if (v[idx] as u32) < self.max_count {
                    v[idx] += 1;
                }
            }
            Cells::Wide(v) => {
                v[idx] = v[idx].saturating_add(1).min(self.max_count);
            }
        }
    }

    /// Count at row-major `index`.
    #[inline]
    pub fn count_at(&self, index: usize) -> u32 {
        match &self.cells {
            Cells::Narrow(v) => v[index] as u32,
            Cells::Wide(v) => v[index],
        }
    }

    /// Count at `(col, row)`.
    #[inline]
    pub fn count(&self, col: usize, row: usize) -> u32 {
        self.count_at(row * self.width as usize + col)
    }

    /// Counts of one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = u32> + '_ {
        let start = row * self.width as usize;
        (start..start + self.width as usize).map(move |i| self.count_at(i))
    }

    /// Highest count in the grid (0 for an empty grid).
    pub fn max(&self) -> u32 {
        match &self.cells {
            Cells::Narrow(v) => v.iter().copied().max().unwrap_or(0) as u32,
            Cells::Wide(v) => v.iter().copied().max().unwrap_or(0),
        }
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        match &self.cells {
            Cells::Narrow(v) => v.iter().map(|&c| c as u64).sum(),
            Cells::Wide(v) => v.iter().map(|&c| c as u64).sum(),
        }
    }

    /// Number of cells holding at least one point.
    pub fn occupied(&self) -> usize {
        match &self.cells {
            Cells::Narrow(v) => v.iter().filter(|&&c| c > 0).count(),
            Cells::Wide(v) => v.iter().filter(|&&c| c > 0).count(),
        }
    }

    /// Number of cells that hit the cap.
    pub fn saturated(&self) -> usize {
        (0..self.len())
            .filter(|&i| self.count_at(i) == self.max_count)
            .count()
    }
}

/// Bin projected points into a `width × height` grid.
///
/// The bounding box is computed (and checked for zero extent) before the
/// grid is allocated.
pub fn build_grid(
    points: &[ProjectedPoint],
    width: u32,
    height: u32,
    max_count: u32,
) -> Result<(DensityGrid, BoundingBox), HeatmapError> {
    if width < 2 || height < 2 {
        return Err(ConfigError::InvalidDimensions { width, height }.into());
    }
    if max_count == 0 {
        return Err(ConfigError::InvalidMaxCount(max_count).into());
    }

    let bbox = BoundingBox::from_points(points)?;
    tracing::debug!(
        min_x = bbox.min_x(),
        max_x = bbox.max_x(),
        min_y = bbox.min_y(),
        max_y = bbox.max_y(),
        "Computed bounding box"
    );

    let mut grid = DensityGrid::new(width, height, max_count);
    tracing::debug!(
        cells = grid.len(),
        counter_bits = grid.counter_bits(),
        "Allocated density grid"
    );

    for &p in points {
        let (col, row) = bbox.cell(p, width, height);
        grid.increment(col, row);
    }

    Ok((grid, bbox))
}
