//! Geoheat - location density heatmaps
//!
//! Projects latitude/longitude points with spherical Mercator, bins them
//! into a saturating density grid and writes the result as a PNG colored
//! along a hue sweep.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

pub use error::HeatmapError;
pub use models::{GeoPoint, RenderConfig};
pub use services::{HeatmapPipeline, PointSource, RenderSummary, TimelineSource};
