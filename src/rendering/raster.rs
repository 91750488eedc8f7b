//! PNG output for colorized density grids.
//!
//! Two layouts, picked by [`OutputMode`]:
//! - Streamed indexed → color type 3, 8-bit, PLTE from the palette, rows
//!   pushed through a PNG stream writer one at a time
//! - In-memory RGB → color type 2, 8-bit, whole buffer encoded in one call
//!
//! Files are encoded into a temporary file next to the destination and
//! renamed into place only after the encoder finished.

use std::io::{BufWriter, Write};
use std::path::Path;

use hue_palette::Palette;

use crate::error::RasterError;
use crate::models::OutputMode;
use crate::rendering::grid::DensityGrid;
use crate::rendering::normalize::Colorizer;

/// Rows written so far, reported after every streamed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowProgress {
    pub rows_written: u32,
    pub total_rows: u32,
}

impl RowProgress {
    /// Completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total_rows == 0 {
            1.0
        } else {
            self.rows_written as f64 / self.total_rows as f64
        }
    }
}

/// A density grid paired with the colorizer that turns it into pixels.
#[derive(Debug, Clone, Copy)]
pub struct Canvas<'a> {
    pub grid: &'a DensityGrid,
    pub colorizer: Colorizer<'a>,
}

impl<'a> Canvas<'a> {
    pub fn new(grid: &'a DensityGrid, colorizer: Colorizer<'a>) -> Self {
        Self { grid, colorizer }
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }
}

/// Writes canvases to PNG in the configured [`OutputMode`].
#[derive(Debug, Clone, Copy)]
pub struct RasterWriter {
    mode: OutputMode,
}

impl RasterWriter {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Write `canvas` to `path`.
    pub fn write(&self, canvas: &Canvas<'_>, path: &Path) -> Result<(), RasterError> {
        self.write_with_progress(canvas, path, None)
    }

    /// Write `canvas` to `path`, reporting streamed rows to `progress`.
    ///
    /// Nothing appears at `path` unless encoding succeeds.
    pub fn write_with_progress(
        &self,
        canvas: &Canvas<'_>,
        path: &Path,
        progress: Option<&mut dyn FnMut(RowProgress)>,
    ) -> Result<(), RasterError> {
        persist_atomically(path, |out| self.encode(canvas, out, progress))?;
        tracing::debug!(path = %path.display(), mode = %self.mode, "Wrote raster");
        Ok(())
    }

    /// Encode `canvas` as PNG into `out`.
    pub fn encode<W: Write>(
        &self,
        canvas: &Canvas<'_>,
        out: W,
        progress: Option<&mut dyn FnMut(RowProgress)>,
    ) -> Result<(), RasterError> {
        match self.mode {
            OutputMode::StreamedIndexed => {
                if !canvas.colorizer.is_indexed() {
                    return Err(RasterError::NotIndexed(canvas.colorizer.strategy()));
                }
                encode_indexed(
                    out,
                    canvas.width(),
                    canvas.height(),
                    canvas.colorizer.palette(),
                    canvas.colorizer.indexed_rows(canvas.grid),
                    progress,
                )
            }
            OutputMode::InMemoryRgb => {
                let buf = canvas.colorizer.rgb_buffer(canvas.grid);
                encode_rgb(out, canvas.width(), canvas.height(), &buf)
            }
        }
    }
}

/// Stream rows of palette indices into an 8-bit indexed PNG.
///
/// Only one row is held in memory at a time.
pub fn encode_indexed<W, I>(
    out: W,
    width: u32,
    height: u32,
    palette: &Palette,
    rows: I,
    mut progress: Option<&mut dyn FnMut(RowProgress)>,
) -> Result<(), RasterError>
where
    W: Write,
    I: IntoIterator<Item = Vec<u8>>,
{
    let plte = palette.to_rgb_bytes();

    let mut encoder = png::Encoder::new(out, width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(plte);

    let mut writer = encoder.write_header()?;
    {
        let mut stream = writer.stream_writer()?;
        let mut rows_written = 0u32;
        for row in rows.into_iter().take(height as usize) {
            stream.write_all(&row)?;
            rows_written += 1;
            if let Some(report) = progress.as_deref_mut() {
                report(RowProgress {
                    rows_written,
                    total_rows: height,
                });
            }
        }
        stream.finish()?;
    }
    writer.finish()?;
    Ok(())
}

/// Encode a full `height × width × 3` buffer as an 8-bit RGB PNG.
pub fn encode_rgb<W: Write>(out: W, width: u32, height: u32, rgb: &[u8]) -> Result<(), RasterError> {
    let mut encoder = png::Encoder::new(out, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgb)?;
    writer.finish()?;
    Ok(())
}

/// Write a `256 × 16` swatch showing every palette entry left to right.
pub fn write_palette_swatch(palette: &Palette, path: &Path) -> Result<(), RasterError> {
    const SWATCH_HEIGHT: u32 = 16;
    let width = palette.len() as u32;
    let row: Vec<u8> = (0..=palette.max_index()).collect();
    persist_atomically(path, |out| {
        encode_indexed(
            out,
            width,
            SWATCH_HEIGHT,
            palette,
            std::iter::repeat(row.clone()),
            None,
        )
    })
}

/// Run `encode` against a temporary file beside `path`, then rename it over `path`.
fn persist_atomically<F>(path: &Path, encode: F) -> Result<(), RasterError>
where
    F: FnOnce(&mut BufWriter<&mut std::fs::File>) -> Result<(), RasterError>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".geoheat-")
        .suffix(".png.tmp")
        .tempfile_in(dir)?;

    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        encode(&mut out)?;
        out.flush()?;
    }

    tmp.persist(path).map_err(|e| RasterError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NormalizationStrategy;
    use std::io::Cursor;

    fn sample_grid() -> DensityGrid {
        let mut grid = DensityGrid::new(4, 3, 250);
        grid.increment(0, 0);
        grid.increment(3, 2);
        grid.increment(3, 2);
        grid
    }

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>, Option<Vec<u8>>) {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::IDENTITY);
        let mut reader = decoder.read_info().unwrap();
        let plte = reader.info().palette.as_ref().map(|p| p.to_vec());
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf, plte)
    }

    #[test]
    fn test_streamed_indexed_png() {
        let palette = Palette::default();
        let grid = sample_grid();
        let colorizer = Colorizer::new(NormalizationStrategy::LinearToPalette, &palette, &grid);
        let canvas = Canvas::new(&grid, colorizer);

        let mut bytes = Vec::new();
        RasterWriter::new(OutputMode::StreamedIndexed)
            .encode(&canvas, &mut bytes, None)
            .unwrap();

        let (info, pixels, plte) = decode(&bytes);
        assert_eq!(info.width, 4);
        assert_eq!(info.height, 3);
        assert_eq!(info.color_type, png::ColorType::Indexed);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        assert_eq!(plte.unwrap(), palette.to_rgb_bytes());
        assert_eq!(pixels, vec![128, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn test_in_memory_rgb_png() {
        let palette = Palette::default();
        let grid = sample_grid();
        let colorizer = Colorizer::new(NormalizationStrategy::LogarithmicHue, &palette, &grid);
        let canvas = Canvas::new(&grid, colorizer);

        let mut bytes = Vec::new();
        RasterWriter::new(OutputMode::InMemoryRgb)
            .encode(&canvas, &mut bytes, None)
            .unwrap();

        let (info, pixels, _) = decode(&bytes);
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(pixels.len(), 4 * 3 * 3);
        assert_eq!(pixels, colorizer.rgb_buffer(&grid));
        // densest cell is a full turn, back to red
        assert_eq!(&pixels[pixels.len() - 3..], &[229, 22, 22]);
    }

    #[test]
    fn test_streamed_reports_every_row() {
        let palette = Palette::default();
        let grid = sample_grid();
        let colorizer = Colorizer::new(NormalizationStrategy::LinearToPalette, &palette, &grid);
        let canvas = Canvas::new(&grid, colorizer);

        let mut seen = Vec::new();
        let mut report = |p: RowProgress| seen.push(p);
        RasterWriter::new(OutputMode::StreamedIndexed)
            .encode(&canvas, Vec::new(), Some(&mut report))
            .unwrap();

        assert_eq!(seen.len(), 3);
        assert_eq!(
            seen.last(),
            Some(&RowProgress {
                rows_written: 3,
                total_rows: 3
            })
        );
        assert_eq!(seen[0].fraction(), 1.0 / 3.0);
    }

    #[test]
    fn test_streamed_rejects_log_hue() {
        let palette = Palette::default();
        let grid = sample_grid();
        let colorizer = Colorizer::new(NormalizationStrategy::LogarithmicHue, &palette, &grid);
        let canvas = Canvas::new(&grid, colorizer);

        let result = RasterWriter::new(OutputMode::StreamedIndexed).encode(&canvas, Vec::new(), None);
        assert!(matches!(result, Err(RasterError::NotIndexed(_))));
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let palette = Palette::default();
        let grid = sample_grid();
        let colorizer = Colorizer::new(NormalizationStrategy::LinearToPalette, &palette, &grid);

        RasterWriter::new(OutputMode::StreamedIndexed)
            .write(&Canvas::new(&grid, colorizer), &path)
            .unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.png")]);
    }

    #[test]
    fn test_failed_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let palette = Palette::default();
        let grid = sample_grid();
        let colorizer = Colorizer::new(NormalizationStrategy::LogarithmicHue, &palette, &grid);

        let result = RasterWriter::new(OutputMode::StreamedIndexed)
            .write(&Canvas::new(&grid, colorizer), &path);

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_palette_swatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palette.png");
        let palette = Palette::default();

        write_palette_swatch(&palette, &path).unwrap();

        let (info, pixels, _) = decode(&std::fs::read(&path).unwrap());
        assert_eq!(info.width, 256);
        assert_eq!(info.height, 16);
        assert_eq!(pixels[0], 0);
        assert_eq!(pixels[255], 255);
        assert_eq!(pixels[256], 0);
    }

    #[test]
    fn test_row_progress_fraction_of_empty() {
        let p = RowProgress {
            rows_written: 0,
            total_rows: 0,
        };
        assert_eq!(p.fraction(), 1.0);
    }
}
