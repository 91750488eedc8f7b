//! HSV color type
//!
//! Hue is stored as a fraction of a full turn (`0.0..=1.0`), matching the
//! usual hexcone formulation. A hue of exactly 1.0 wraps to red, the same
//! color as 0.0.

use super::rgb::Rgb;

/// A color in HSV (hexcone) space.
///
/// All three components are in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue as a fraction of a full turn
    pub h: f64,
    /// Saturation
    pub s: f64,
    /// Value
    pub v: f64,
}

impl Hsv {
    #[inline]
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Create an HSV color from a hue in degrees.
    ///
    /// # Example
    /// ```
    /// use hue_palette::Hsv;
    /// let cyan = Hsv::from_degrees(180.0, 1.0, 1.0);
    /// assert_eq!(cyan.h, 0.5);
    /// ```
    #[inline]
    pub fn from_degrees(degrees: f64, s: f64, v: f64) -> Self {
        Self::new(degrees / 360.0, s, v)
    }

    /// Hue in degrees (`0.0..=360.0`).
    #[inline]
    pub fn degrees(&self) -> f64 {
        self.h * 360.0
    }

    /// Convert to floating point RGB channels in `0.0..=1.0`.
    pub fn to_rgb_f64(self) -> (f64, f64, f64) {
        let Self { h, s, v } = self;
        if s == 0.0 {
            return (v, v, v);
        }

        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    }

    /// Convert to 8-bit RGB, truncating each channel (`floor(c * 255)`).
    ///
    /// # Example
    /// ```
    /// use hue_palette::{Hsv, Rgb};
    /// let red = Hsv::new(0.0, 0.9, 0.9).to_rgb();
    /// assert_eq!(red, Rgb::new(229, 22, 22));
    /// ```
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = self.to_rgb_f64();
        Rgb::new(truncate_channel(r), truncate_channel(g), truncate_channel(b))
    }
}

impl From<Rgb> for Hsv {
    /// Recover HSV from an 8-bit color.
    ///
    /// Greys (and black) come back with hue 0.0.
    fn from(c: Rgb) -> Self {
        let r = c.r as f64 / 255.0;
        let g = c.g as f64 / 255.0;
        let b = c.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let v = max;
        if max == min {
            return Self::new(0.0, 0.0, v);
        }

        let delta = max - min;
        let s = delta / max;
        let rc = (max - r) / delta;
        let gc = (max - g) / delta;
        let bc = (max - b) / delta;

        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Self::new((h / 6.0).rem_euclid(1.0), s, v)
    }
}

#[inline]
fn truncate_channel(c: f64) -> u8 {
    // `as` saturates, so tiny negative rounding noise lands on 0
    (c * 255.0) as u8
}
