//! PNG decoding and assertion helpers for tests.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use pretty_assertions::assert_eq;

/// A decoded PNG with its raw (untransformed) pixel bytes.
#[derive(Debug)]
pub struct DecodedPng {
    pub width: u32,
    pub height: u32,
    pub color_type: png::ColorType,
    pub palette: Option<Vec<u8>>,
    pub pixels: Vec<u8>,
}

impl DecodedPng {
    /// RGB triple at `(col, row)` of an RGB image.
    pub fn rgb_at(&self, col: u32, row: u32) -> [u8; 3] {
        let i = ((row * self.width + col) * 3) as usize;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Palette index at `(col, row)` of an indexed image.
    pub fn index_at(&self, col: u32, row: u32) -> u8 {
        self.pixels[(row * self.width + col) as usize]
    }
}

/// Decode a PNG file without expanding palettes.
pub fn decode_png(path: &Path) -> DecodedPng {
    let file = File::open(path).unwrap_or_else(|e| panic!("open {}: {e}", path.display()));
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().expect("PNG header should decode");
    let mut pixels = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut pixels).expect("PNG data should decode");
    pixels.truncate(frame.buffer_size());

    let info = reader.info();
    DecodedPng {
        width: frame.width,
        height: frame.height,
        color_type: frame.color_type,
        palette: info.palette.as_ref().map(|p| p.to_vec()),
        pixels,
    }
}

/// Assert the file is an 8-bit indexed PNG of the given size and return it.
pub fn assert_indexed_png(path: &Path, width: u32, height: u32) -> DecodedPng {
    let png = decode_png(path);
    assert_eq!(png.color_type, png::ColorType::Indexed);
    assert_eq!((png.width, png.height), (width, height));
    assert_eq!(png.pixels.len(), (width * height) as usize);
    let palette = png.palette.as_ref().expect("indexed PNG should carry a palette");
    assert_eq!(palette.len(), 256 * 3, "palette should have 256 entries");
    png
}

/// Assert the file is an 8-bit RGB PNG of the given size and return it.
pub fn assert_rgb_png(path: &Path, width: u32, height: u32) -> DecodedPng {
    let png = decode_png(path);
    assert_eq!(png.color_type, png::ColorType::Rgb);
    assert_eq!((png.width, png.height), (width, height));
    assert_eq!(png.pixels.len(), (width * height * 3) as usize);
    png
}

/// Assert a directory holds exactly the named files (no leftover temp files).
pub fn assert_dir_contains(dir: &Path, expected: &[&str]) {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read_dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(names, expected);
}
