//! Palette types and utilities
//!
//! This module provides the hue-sweep [`Palette`] and its error type.

mod error;
mod palette;

pub use error::PaletteError;
pub use palette::{Palette, DEFAULT_PALETTE_SIZE, SWEEP_SATURATION, SWEEP_VALUE};
