pub mod config;
pub mod geo;

pub use config::{NormalizationStrategy, OutputMode, RenderConfig};
pub use geo::{Axis, BoundingBox, GeoPoint, ProjectedPoint};
