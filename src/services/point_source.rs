use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{MalformedPointError, SourceError};
use crate::models::GeoPoint;

/// Anything that yields validated geographic points.
///
/// The rendering core never parses coordinates itself; whatever reaches it
/// through this trait is assumed finite and off the poles.
pub trait PointSource {
    fn points(&self) -> Result<Vec<GeoPoint>, SourceError>;
}

impl PointSource for [GeoPoint] {
    fn points(&self) -> Result<Vec<GeoPoint>, SourceError> {
        Ok(self.to_vec())
    }
}

impl PointSource for Vec<GeoPoint> {
    fn points(&self) -> Result<Vec<GeoPoint>, SourceError> {
        Ok(self.clone())
    }
}

/// Parse a `"47.3769°, 8.5417°"` coordinate pair and check it is projectable.
pub fn parse_lat_lng(raw: &str) -> Result<GeoPoint, MalformedPointError> {
    let cleaned = raw.replace('°', "");
    let parts: Vec<&str> = cleaned.split(", ").collect();
    let [lat, lon] = parts.as_slice() else {
        return Err(MalformedPointError::Unparseable(raw.to_string()));
    };

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| MalformedPointError::Unparseable(raw.to_string()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| MalformedPointError::Unparseable(raw.to_string()))?;

    validate(GeoPoint::new(lat, lon))
}

/// Reject points the Mercator projection cannot place.
pub fn validate(p: GeoPoint) -> Result<GeoPoint, MalformedPointError> {
    if !(p.lat.abs() < 90.0) {
        return Err(MalformedPointError::LatitudeOutOfRange(p.lat));
    }
    if !(p.lon.abs() <= 180.0) {
        return Err(MalformedPointError::LongitudeOutOfRange(p.lon));
    }
    Ok(p)
}

/// Keeps points within a box of `max_degree_delta` around the first point seen.
#[derive(Debug, Clone)]
pub struct ProximityFilter {
    max_degree_delta: f64,
    reference: Option<GeoPoint>,
}

impl ProximityFilter {
    pub fn new(max_degree_delta: f64) -> Self {
        Self {
            max_degree_delta,
            reference: None,
        }
    }

    /// The first accepted point, once there is one.
    pub fn reference(&self) -> Option<GeoPoint> {
        self.reference
    }

    /// Returns true when `p` should be kept. The first call always accepts.
    pub fn accept(&mut self, p: GeoPoint) -> bool {
        let reference = *self.reference.get_or_insert(p);
        (p.lat - reference.lat).abs() <= self.max_degree_delta
            && (p.lon - reference.lon).abs() <= self.max_degree_delta
    }
}

/// Counters from one pass over a timeline document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceStats {
    /// Coordinates encountered, valid or not. An activity always adds both
    /// endpoints, even when it is skipped, so `total == kept + skipped + filtered`.
    pub total: usize,
    /// Points handed to the renderer
    pub kept: usize,
    /// Malformed coordinates that were skipped
    pub skipped: usize,
    /// Valid points dropped by the proximity filter
    pub filtered: usize,
    /// Key sets of segments that carried no location
    pub unhandled_types: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Timeline {
    semantic_segments: Option<Vec<Segment>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Segment {
    timeline_path: Option<Vec<PathPoint>>,
    visit: Option<Visit>,
    activity: Option<Activity>,
    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PathPoint {
    point: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Visit {
    top_candidate: Option<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    place_location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Activity {
    start: Option<LatLng>,
    end: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatLng {
    lat_lng: Option<String>,
}

impl Segment {
    /// Sorted, comma-joined names of every key the segment carries.
    fn type_name(&self) -> String {
        let mut keys: Vec<&str> = self.other.keys().map(String::as_str).collect();
        if self.timeline_path.is_some() {
            keys.push("timelinePath");
        }
        if self.visit.is_some() {
            keys.push("visit");
        }
        if self.activity.is_some() {
            keys.push("activity");
        }
        keys.sort_unstable();
        keys.join(",")
    }

    fn visit_location(&self) -> Option<&LatLng> {
        self.visit
            .as_ref()?
            .top_candidate
            .as_ref()?
            .place_location
            .as_ref()
    }
}

/// Location-history JSON document (`semanticSegments` timeline export).
///
/// Path points, visit locations and activity start/end pairs are read in
/// document order. Malformed coordinates are skipped with a warning.
#[derive(Debug, Clone)]
pub struct TimelineSource {
    path: PathBuf,
    max_degree_delta: Option<f64>,
}

impl TimelineSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_degree_delta: None,
        }
    }

    /// Only keep points within `delta` degrees of the first point (`None` keeps all).
    pub fn with_max_degree_delta(mut self, delta: Option<f64>) -> Self {
        self.max_degree_delta = delta;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document, returning points and pass statistics.
    pub fn load(&self) -> Result<(Vec<GeoPoint>, SourceStats), SourceError> {
        tracing::info!(path = %self.path.display(), "Loading and filtering locations");
        let content = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        self.parse_str(&content)
    }

    /// Parse a document already in memory.
    pub fn parse_str(&self, json: &str) -> Result<(Vec<GeoPoint>, SourceStats), SourceError> {
        let timeline: Timeline = serde_json::from_str(json)?;
        let segments = timeline
            .semantic_segments
            .ok_or(SourceError::MissingField("semanticSegments"))?;

        let mut collector = Collector::new(self.max_degree_delta);

        for segment in &segments {
            if let Some(path) = &segment.timeline_path {
                for p in path {
                    collector.push(p.point.as_deref(), "timeline point");
                }
            } else if let Some(location) = segment.visit_location() {
                collector.push(location.lat_lng.as_deref(), "visit");
            } else if let Some(activity) = &segment.activity {
                collector.push_activity(activity);
            } else {
                collector.stats.unhandled_types.insert(segment.type_name());
            }
        }

        let Collector { points, stats, .. } = collector;
        tracing::info!(total = stats.total, "Total locations loaded from file");
        tracing::info!(
            kept = stats.kept,
            skipped = stats.skipped,
            filtered = stats.filtered,
            max_degree_delta = ?self.max_degree_delta,
            "Loaded locations"
        );
        if !stats.unhandled_types.is_empty() {
            tracing::warn!(types = ?stats.unhandled_types, "Unhandled location types");
        }

        Ok((points, stats))
    }
}

impl PointSource for TimelineSource {
    fn points(&self) -> Result<Vec<GeoPoint>, SourceError> {
        self.load().map(|(points, _)| points)
    }
}

struct Collector {
    points: Vec<GeoPoint>,
    stats: SourceStats,
    filter: Option<ProximityFilter>,
}

impl Collector {
    fn new(max_degree_delta: Option<f64>) -> Self {
        Self {
            points: Vec::new(),
            stats: SourceStats::default(),
            filter: max_degree_delta.map(ProximityFilter::new),
        }
    }

    fn push(&mut self, raw: Option<&str>, kind: &'static str) {
        self.stats.total += 1;
        match parse_optional(raw) {
            Ok(p) => self.keep_if_near(p),
            Err(e) => {
                tracing::warn!(kind, error = %e, "Skipping invalid location");
                self.stats.skipped += 1;
            }
        }
    }

    /// An activity contributes both endpoints or, if either is bad, neither.
    fn push_activity(&mut self, activity: &Activity) {
        self.stats.total += 2;
        let start = parse_optional(activity.start.as_ref().and_then(|l| l.lat_lng.as_deref()));
        let end = parse_optional(activity.end.as_ref().and_then(|l| l.lat_lng.as_deref()));
        match (start, end) {
            (Ok(start), Ok(end)) => {
                self.keep_if_near(start);
                self.keep_if_near(end);
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(kind = "activity", error = %e, "Skipping invalid location");
                self.stats.skipped += 2;
            }
        }
    }

    fn keep_if_near(&mut self, p: GeoPoint) {
        let keep = self.filter.as_mut().map_or(true, |f| f.accept(p));
        if keep {
            self.points.push(p);
            self.stats.kept += 1;
        } else {
            self.stats.filtered += 1;
        }
    }
}

fn parse_optional(raw: Option<&str>) -> Result<GeoPoint, MalformedPointError> {
    match raw {
        Some(s) => parse_lat_lng(s),
        None => Err(MalformedPointError::Unparseable(String::new())),
    }
}
