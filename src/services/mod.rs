pub mod pipeline;
pub mod point_source;

pub use pipeline::{HeatmapPipeline, RenderSummary};
pub use point_source::{
    parse_lat_lng, PointSource, ProximityFilter, SourceStats, TimelineSource,
};
