//! hue-palette: hue-sweep color palettes for density rendering
//!
//! This crate provides the small amount of color science a heatmap needs:
//! an 8-bit [`Rgb`] triple, an [`Hsv`] color with a truncating conversion
//! to [`Rgb`], and a [`Palette`] that sweeps hue at fixed saturation and
//! value behind a reserved black background entry.
//!
//! # Quick Start
//!
//! ```
//! use hue_palette::{Palette, Rgb};
//!
//! let palette = Palette::generate(255).unwrap();
//!
//! assert_eq!(palette.len(), 256);
//! assert_eq!(palette.color(0), Rgb::BLACK);
//! ```
//!
//! # Truncation
//!
//! Channels are scaled to 8 bits with `floor(c * 255)`, not rounding. A
//! value of 0.9 therefore becomes 229, not 230. Palettes generated here are
//! byte-for-byte stable across runs and platforms, which keeps rendered
//! images reproducible.

pub mod color;
pub mod palette;

pub use color::{Hsv, Rgb};
pub use palette::{Palette, PaletteError, DEFAULT_PALETTE_SIZE, SWEEP_SATURATION, SWEEP_VALUE};
