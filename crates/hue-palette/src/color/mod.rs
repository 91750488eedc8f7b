//! Color types and conversion utilities
//!
//! - [`Rgb`]: 8-bit output color, what ends up in the raster.
//! - [`Hsv`]: hue/saturation/value in `0.0..=1.0`, used to build sweeps.
//!
//! # Example
//!
//! ```
//! use hue_palette::{Hsv, Rgb};
//!
//! let red = Hsv::new(0.0, 1.0, 1.0).to_rgb();
//! assert_eq!(red, Rgb::new(255, 0, 0));
//! ```

mod hsv;
mod rgb;

pub use hsv::Hsv;
pub use rgb::Rgb;
