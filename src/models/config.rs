use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// How cell counts become colors.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationStrategy {
    /// `floor(254 * c / M) + 1` into the hue palette
    #[default]
    LinearToPalette,
    /// Hue proportional to `ln(1 + c) / ln(1 + M)`, direct RGB
    LogarithmicHue,
}

impl fmt::Display for NormalizationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationStrategy::LinearToPalette => f.write_str("linear-to-palette"),
            NormalizationStrategy::LogarithmicHue => f.write_str("logarithmic-hue"),
        }
    }
}

/// How the raster reaches disk.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Row-by-row 8-bit indexed PNG, bounded memory
    #[default]
    StreamedIndexed,
    /// Full 24-bit RGB buffer, one write
    InMemoryRgb,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::StreamedIndexed => f.write_str("streamed-indexed"),
            OutputMode::InMemoryRgb => f.write_str("in-memory-rgb"),
        }
    }
}

/// Render configuration, loadable from YAML.
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Saturation cap for per-cell counts
    pub max_count: u32,

    pub normalization_strategy: NormalizationStrategy,

    pub output_mode: OutputMode,

    pub output_path: PathBuf,

    /// Keep only points within this many degrees of the first point
    /// (`null` disables the filter)
    pub max_degree_delta: Option<f64>,
}

pub const DEFAULT_SIZE: u32 = 4096;
pub const DEFAULT_MAX_COUNT: u32 = 250;
pub const DEFAULT_MAX_DEGREE_DELTA: f64 = 9.0;

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            max_count: DEFAULT_MAX_COUNT,
            normalization_strategy: NormalizationStrategy::default(),
            output_mode: OutputMode::default(),
            output_path: PathBuf::from("heatmap.png"),
            max_degree_delta: Some(DEFAULT_MAX_DEGREE_DELTA),
        }
    }
}

impl RenderConfig {
    /// Load and validate configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            width = config.width,
            height = config.height,
            strategy = %config.normalization_strategy,
            mode = %config.output_mode,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check dimensions, cap, filter distance and the strategy/mode pairing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 2 || self.height < 2 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_count == 0 {
            return Err(ConfigError::InvalidMaxCount(self.max_count));
        }
        if let Some(delta) = self.max_degree_delta {
            if !(delta >= 0.0) {
                return Err(ConfigError::InvalidDistance(delta));
            }
        }
        // log-hue colors are not palette entries, so there is no index to stream
        if self.normalization_strategy == NormalizationStrategy::LogarithmicHue
            && self.output_mode == OutputMode::StreamedIndexed
        {
            return Err(ConfigError::UnsupportedCombination {
                strategy: self.normalization_strategy,
                mode: self.output_mode,
            });
        }
        Ok(())
    }
}
