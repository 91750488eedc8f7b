use std::path::PathBuf;

use hue_palette::{Palette, DEFAULT_PALETTE_SIZE};

use crate::error::HeatmapError;
use crate::models::{BoundingBox, GeoPoint, RenderConfig};
use crate::rendering::{build_grid, project_all, Canvas, Colorizer, RasterWriter, RowProgress};
use crate::services::PointSource;

/// What one render produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub output_path: PathBuf,
    /// Points binned into the grid
    pub points: usize,
    pub occupied_cells: usize,
    /// Grid maximum the colors were normalized against
    pub max_density: u32,
    /// Cells that reached the count cap
    pub saturated_cells: usize,
    pub bounding_box: BoundingBox,
}

/// Pipeline that orchestrates project → bin → normalize → write
pub struct HeatmapPipeline {
    config: RenderConfig,
    palette: Palette,
}

impl HeatmapPipeline {
    /// Validate `config` and generate the full hue-sweep palette.
    pub fn new(config: RenderConfig) -> Result<Self, HeatmapError> {
        config.validate()?;
        let palette = Palette::generate(DEFAULT_PALETTE_SIZE)?;
        Ok(Self { config, palette })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render every point `source` yields.
    pub fn run(&self, source: &dyn PointSource) -> Result<RenderSummary, HeatmapError> {
        self.run_with_progress(source, None)
    }

    pub fn run_with_progress(
        &self,
        source: &dyn PointSource,
        progress: Option<&mut dyn FnMut(RowProgress)>,
    ) -> Result<RenderSummary, HeatmapError> {
        let points = source.points()?;
        self.render_points(&points, progress)
    }

    /// Render already-validated points to the configured output path.
    ///
    /// Fails before touching the filesystem when there is nothing to plot
    /// or the points have no extent on one axis.
    pub fn render_points(
        &self,
        points: &[GeoPoint],
        progress: Option<&mut dyn FnMut(RowProgress)>,
    ) -> Result<RenderSummary, HeatmapError> {
        if points.is_empty() {
            return Err(HeatmapError::EmptyInput);
        }

        let span = tracing::info_span!(
            "render",
            width = self.config.width,
            height = self.config.height,
            strategy = %self.config.normalization_strategy,
            mode = %self.config.output_mode,
        );
        let _enter = span.enter();

        tracing::info!(points = points.len(), "Projecting points");
        let projected = project_all(points);

        let (grid, bounding_box) = build_grid(
            &projected,
            self.config.width,
            self.config.height,
            self.config.max_count,
        )?;

        let colorizer = Colorizer::new(self.config.normalization_strategy, &self.palette, &grid);
        tracing::info!(
            max_density = colorizer.max(),
            occupied = grid.occupied(),
            "Binned points"
        );

        let canvas = Canvas::new(&grid, colorizer);
        let writer = RasterWriter::new(self.config.output_mode);
        writer.write_with_progress(&canvas, &self.config.output_path, progress)?;

        let summary = RenderSummary {
            output_path: self.config.output_path.clone(),
            points: points.len(),
            occupied_cells: grid.occupied(),
            max_density: colorizer.max(),
            saturated_cells: grid.saturated(),
            bounding_box,
        };
        tracing::info!(path = %summary.output_path.display(), "Heatmap written");
        Ok(summary)
    }
}
