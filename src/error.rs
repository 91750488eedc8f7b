use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Axis, NormalizationStrategy, OutputMode};

/// Fatal error from a heatmap run.
///
/// Every variant aborts the run; nothing is retried and no degraded image
/// is written.
#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error("No points to plot")]
    EmptyInput,

    #[error("Degenerate input: every point has {axis} = {value}, bounding box has zero extent")]
    DegenerateInput { axis: Axis, value: f64 },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Palette error: {0}")]
    Palette(#[from] hue_palette::PaletteError),

    #[error("Point source error: {0}")]
    Source(#[from] SourceError),

    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported dimensions: {width}x{height} (both must be at least 2)")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid max_count: {0} (must be at least 1)")]
    InvalidMaxCount(u32),

    #[error("Invalid max_degree_delta: {0} (must be a non-negative number)")]
    InvalidDistance(f64),

    #[error("{strategy} colors cannot be written in {mode} mode")]
    UnsupportedCombination {
        strategy: NormalizationStrategy,
        mode: OutputMode,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// A single coordinate that failed to parse or validate.
///
/// Point sources recover from this locally by skipping the point.
#[derive(Debug, Error, PartialEq)]
pub enum MalformedPointError {
    #[error("unparseable coordinate pair: {0:?}")]
    Unparseable(String),

    #[error("latitude {0} outside the projectable range (-90, 90)")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("{0} colors have no palette index, use in-memory-rgb output")]
    NotIndexed(NormalizationStrategy),

    #[error("Failed to persist {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
