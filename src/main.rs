use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoheat::models::{NormalizationStrategy, OutputMode, RenderConfig};
use geoheat::rendering::raster::write_palette_swatch;
use geoheat::rendering::RowProgress;
use geoheat::services::{HeatmapPipeline, TimelineSource};

#[derive(Parser)]
#[command(name = "geoheat")]
#[command(about = "Render location history as a Mercator density heatmap")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a timeline JSON export to a PNG heatmap
    Render {
        /// Timeline JSON file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML config file; command-line flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Square canvas size (sets width and height)
        #[arg(long, conflicts_with_all = ["width", "height"])]
        size: Option<u32>,

        /// Saturation cap for per-cell counts
        #[arg(long)]
        max_count: Option<u32>,

        /// How counts become colors
        #[arg(long, value_enum)]
        strategy: Option<NormalizationStrategy>,

        /// How the raster is written
        #[arg(long, value_enum)]
        mode: Option<OutputMode>,

        /// Keep only points within this many degrees of the first point
        #[arg(long)]
        distance: Option<f64>,

        /// Keep every point regardless of distance
        #[arg(long, conflicts_with = "distance")]
        no_filter: bool,
    },
    /// Write the color palette as a swatch PNG
    Palette {
        /// Output PNG file path
        #[arg(short, long, default_value = "palette.png")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoheat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Render {
            input,
            output,
            config,
            width,
            height,
            size,
            max_count,
            strategy,
            mode,
            distance,
            no_filter,
        } => {
            let mut config = match config {
                Some(path) => RenderConfig::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => RenderConfig::default(),
            };

            if let Some(size) = size {
                config.width = size;
                config.height = size;
            }
            if let Some(width) = width {
                config.width = width;
            }
            if let Some(height) = height {
                config.height = height;
            }
            if let Some(max_count) = max_count {
                config.max_count = max_count;
            }
            if let Some(strategy) = strategy {
                config.normalization_strategy = strategy;
            }
            if let Some(mode) = mode {
                config.output_mode = mode;
            }
            if let Some(output) = output {
                config.output_path = output;
            }
            if no_filter {
                config.max_degree_delta = None;
            } else if distance.is_some() {
                config.max_degree_delta = distance;
            }

            run_render(input, config)
        }
        Commands::Palette { output } => {
            let palette = hue_palette::Palette::default();
            write_palette_swatch(&palette, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Palette written to {}", output.display());
            Ok(())
        }
    }
}

fn run_render(input: PathBuf, config: RenderConfig) -> anyhow::Result<()> {
    let source = TimelineSource::new(&input).with_max_degree_delta(config.max_degree_delta);
    let pipeline = HeatmapPipeline::new(config).context("Invalid render configuration")?;

    let mut next_decile = 1u32;
    let mut report = |p: RowProgress| {
        let decile = (p.fraction() * 10.0).floor() as u32;
        if decile >= next_decile {
            tracing::info!(
                rows = p.rows_written,
                total = p.total_rows,
                "Writing image {}%",
                decile * 10
            );
            next_decile = decile + 1;
        }
    };

    let summary = pipeline
        .run_with_progress(&source, Some(&mut report))
        .with_context(|| format!("Failed to render {}", input.display()))?;

    println!(
        "Heatmap written to {} ({} points, {} cells, max density {})",
        summary.output_path.display(),
        summary.points,
        summary.occupied_cells,
        summary.max_density
    );
    Ok(())
}
