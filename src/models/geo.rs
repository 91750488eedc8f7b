use std::fmt;

use crate::error::HeatmapError;

/// A latitude/longitude sample in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// A point on the Mercator plane, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Planar axis, used to report which extent collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Extent of all projected points of a run.
///
/// Construction guarantees `max_x > min_x` and `max_y > min_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl BoundingBox {
    /// Compute the bounding box of `points`.
    ///
    /// Fails with [`HeatmapError::EmptyInput`] for no points and
    /// [`HeatmapError::DegenerateInput`] when either extent is zero.
    pub fn from_points(points: &[ProjectedPoint]) -> Result<Self, HeatmapError> {
        let first = points.first().ok_or(HeatmapError::EmptyInput)?;

        let init = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        let bbox = points.iter().skip(1).fold(init, |b, p| Self {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        });

        // `!(a > b)` rather than `a <= b` so NaN extents are rejected too
        if !(bbox.max_x > bbox.min_x) {
            return Err(HeatmapError::DegenerateInput {
                axis: Axis::X,
                value: bbox.min_x,
            });
        }
        if !(bbox.max_y > bbox.min_y) {
            return Err(HeatmapError::DegenerateInput {
                axis: Axis::Y,
                value: bbox.min_y,
            });
        }

        Ok(bbox)
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Horizontal extent in meters (always positive).
    pub fn span_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent in meters (always positive).
    pub fn span_y(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Map a point inside the box to a `(column, row)` cell of a
    /// `width × height` canvas.
    ///
    /// Row 0 is the northern edge. Points on `max_x` land in the last
    /// column and points on `min_y` in the last row.
    pub fn cell(&self, p: ProjectedPoint, width: u32, height: u32) -> (usize, usize) {
        let last_col = (width - 1) as usize;
        let last_row = (height - 1) as usize;

        let fx = (p.x - self.min_x) / self.span_x() * last_col as f64;
        let fy = (self.max_y - p.y) / self.span_y() * last_row as f64;

        // float -> usize casts saturate at 0, the min() guards the far edge
        let col = (fx.floor() as usize).min(last_col);
        let row = (fy.floor() as usize).min(last_row);
        (col, row)
    }
}
