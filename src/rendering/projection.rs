//! Spherical (web) Mercator projection.
//!
//!   x = R·λ
//!   y = R·ln(tan(π/4 + φ/2))
//!
//! with λ, φ in radians and R the WGS84 semi-major axis. The poles map to
//! ±infinity; point sources reject them before they get here.

use std::f64::consts::FRAC_PI_4;

use crate::models::{GeoPoint, ProjectedPoint};

/// WGS84 semi-major axis in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Project one geographic point onto the Mercator plane.
#[inline]
pub fn project(point: GeoPoint) -> ProjectedPoint {
    let x = EARTH_RADIUS * point.lon.to_radians();
    let y = EARTH_RADIUS * (FRAC_PI_4 + point.lat.to_radians() / 2.0).tan().ln();
    ProjectedPoint::new(x, y)
}

/// Project a batch of points, preserving order.
pub fn project_all(points: &[GeoPoint]) -> Vec<ProjectedPoint> {
    points.iter().copied().map(project).collect()
}
