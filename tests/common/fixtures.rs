//! Test fixtures and constants.

use std::path::{Path, PathBuf};

use geoheat::models::{NormalizationStrategy, OutputMode, RenderConfig};
use geoheat::GeoPoint;

/// Points from the reference 4×4 example: two at the origin, one at (1, 1).
pub fn reference_points() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(1.0, 1.0),
    ]
}

/// A small cluster around Zurich with one far-away outlier in Sydney.
pub mod timeline {
    /// Path points, a visit, an activity and a memory segment.
    pub const ZURICH: &str = r#"{
  "semanticSegments": [
    {
      "startTime": "2024-03-01T08:00:00.000+01:00",
      "endTime": "2024-03-01T10:00:00.000+01:00",
      "timelinePath": [
        {"point": "47.3769°, 8.5417°", "time": "2024-03-01T08:00:00.000+01:00"},
        {"point": "47.3780°, 8.5400°", "time": "2024-03-01T08:02:00.000+01:00"},
        {"point": "47.3900°, 8.5150°", "time": "2024-03-01T08:05:00.000+01:00"}
      ]
    },
    {
      "startTime": "2024-03-01T10:00:00.000+01:00",
      "visit": {
        "hierarchyLevel": 0,
        "probability": 0.91,
        "topCandidate": {
          "placeId": "ChIJGaK-SZcLkEcRA9wf5_GNbuY",
          "placeLocation": {"latLng": "47.3667°, 8.5500°"}
        }
      }
    },
    {
      "startTime": "2024-03-01T12:00:00.000+01:00",
      "activity": {
        "start": {"latLng": "47.3667°, 8.5500°"},
        "end": {"latLng": "47.0502°, 8.3093°"},
        "distanceMeters": 42000.0
      }
    },
    {
      "startTime": "2024-03-02T09:00:00.000+11:00",
      "timelinePath": [
        {"point": "-33.8688°, 151.2093°", "time": "2024-03-02T09:00:00.000+11:00"}
      ]
    },
    {
      "startTime": "2024-03-03T00:00:00.000+01:00",
      "timelineMemory": {"trip": {"distanceFromOriginKms": 16000}}
    }
  ]
}"#;

    /// One good path point surrounded by broken ones.
    pub const MALFORMED: &str = r#"{
  "semanticSegments": [
    {
      "timelinePath": [
        {"point": "not a coordinate"},
        {"point": "47.3769°, 8.5417°"},
        {"point": "90.0°, 8.0°"},
        {"point": "47.0°, 200.0°"}
      ]
    }
  ]
}"#;

    pub const NO_SEGMENTS: &str = r#"{"rawSignals": [], "userLocationProfile": {}}"#;
}

/// Write `content` to `name` inside `dir`, returning the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    path
}

/// A config rendering to `output` at `width × height`.
pub fn config(output: PathBuf, width: u32, height: u32) -> RenderConfig {
    RenderConfig {
        width,
        height,
        output_path: output,
        max_degree_delta: None,
        ..RenderConfig::default()
    }
}

/// Same as [`config`] but writing direct RGB with the given strategy.
pub fn rgb_config(
    output: PathBuf,
    width: u32,
    height: u32,
    strategy: NormalizationStrategy,
) -> RenderConfig {
    RenderConfig {
        normalization_strategy: strategy,
        output_mode: OutputMode::InMemoryRgb,
        ..config(output, width, height)
    }
}
