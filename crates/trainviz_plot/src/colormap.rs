//! Colormaps, value scales and the bar palette.

use ndarray::{ArrayBase, Data, Dimension};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Continuous colormaps used by the heat-mapped panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    /// White (low) to black (high).
    Binary,
    /// Black (low) to white (high).
    Gray,
    /// Dark blue through white to dark red; centered scales read as signed weights.
    Seismic,
    /// White to dark blue.
    Blues,
    /// Perceptually uniform purple, teal, yellow.
    Viridis,
}

const BINARY: &[(f64, [u8; 3])] = &[(0.0, [255, 255, 255]), (1.0, [0, 0, 0])];

const GRAY: &[(f64, [u8; 3])] = &[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])];

const SEISMIC: &[(f64, [u8; 3])] = &[
    (0.0, [0, 0, 77]),
    (0.25, [0, 0, 255]),
    (0.5, [255, 255, 255]),
    (0.75, [255, 0, 0]),
    (1.0, [128, 0, 0]),
];

const BLUES: &[(f64, [u8; 3])] = &[
    (0.0, [247, 251, 255]),
    (0.125, [222, 235, 247]),
    (0.25, [198, 219, 239]),
    (0.375, [158, 202, 225]),
    (0.5, [107, 174, 214]),
    (0.625, [66, 146, 198]),
    (0.75, [33, 113, 181]),
    (0.875, [8, 81, 156]),
    (1.0, [8, 48, 107]),
];

const VIRIDIS: &[(f64, [u8; 3])] = &[
    (0.0, [68, 1, 84]),
    (0.25, [59, 82, 139]),
    (0.5, [33, 145, 140]),
    (0.75, [94, 201, 98]),
    (1.0, [253, 231, 37]),
];

impl Colormap {
    fn stops(self) -> &'static [(f64, [u8; 3])] {
        match self {
            Colormap::Binary => BINARY,
            Colormap::Gray => GRAY,
            Colormap::Seismic => SEISMIC,
            Colormap::Blues => BLUES,
            Colormap::Viridis => VIRIDIS,
        }
    }

    /// Color at position `t` in `[0, 1]`. Out-of-range values are clamped,
    /// NaN maps to the low end.
    pub fn color(self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let stops = self.stops();

        let upper = stops
            .iter()
            .position(|&(pos, _)| pos >= t)
            .unwrap_or(stops.len() - 1);
        if upper == 0 {
            let [r, g, b] = stops[0].1;
            return RGBColor(r, g, b);
        }

        let (p0, c0) = stops[upper - 1];
        let (p1, c1) = stops[upper];
        let f = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
        RGBColor(lerp(c0[0], c1[0]), lerp(c0[1], c1[1]), lerp(c0[2], c1[2]))
    }
}

/// Linear mapping from data values to colormap positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    /// Value drawn with the low end of the colormap.
    pub min: f32,
    /// Value drawn with the high end of the colormap.
    pub max: f32,
}

impl ColorScale {
    /// Create a scale over `[min, max]`.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Scale spanning the global minimum and maximum of `array`.
    pub fn from_array<S, D>(array: &ArrayBase<S, D>) -> Result<Self>
    where
        S: Data<Elem = f32>,
        D: Dimension,
    {
        let (min, max) = trainviz_core::min_max(array)?;
        Ok(Self { min, max })
    }

    /// Position of `value` in `[0, 1]`. A degenerate scale maps everything to 0.
    pub fn normalize(&self, value: f32) -> f64 {
        let span = self.max as f64 - self.min as f64;
        if span <= 0.0 || !span.is_finite() {
            return 0.0;
        }
        ((value as f64 - self.min as f64) / span).clamp(0.0, 1.0)
    }
}

/// Bar colors, repeated every ten classes: blue, red, green, magenta, cyan,
/// yellow, black, then blue, red, green again.
pub const BAR_PALETTE: [RGBColor; 10] = [
    RGBColor(0, 0, 255),
    RGBColor(255, 0, 0),
    RGBColor(0, 128, 0),
    RGBColor(191, 0, 191),
    RGBColor(0, 191, 191),
    RGBColor(191, 191, 0),
    RGBColor(0, 0, 0),
    RGBColor(0, 0, 255),
    RGBColor(255, 0, 0),
    RGBColor(0, 128, 0),
];

/// Palette color for class `index`.
pub fn bar_color(index: usize) -> RGBColor {
    BAR_PALETTE[index % BAR_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn rgb(c: RGBColor) -> (u8, u8, u8) {
        (c.0, c.1, c.2)
    }

    #[test]
    fn test_binary_endpoints() {
        assert_eq!(rgb(Colormap::Binary.color(0.0)), (255, 255, 255));
        assert_eq!(rgb(Colormap::Binary.color(1.0)), (0, 0, 0));
        assert_eq!(rgb(Colormap::Gray.color(0.0)), (0, 0, 0));
    }

    #[test]
    fn test_seismic_center_is_white() {
        assert_eq!(rgb(Colormap::Seismic.color(0.5)), (255, 255, 255));
        assert_eq!(rgb(Colormap::Seismic.color(0.25)), (0, 0, 255));
    }

    #[test]
    fn test_clamping() {
        assert_eq!(rgb(Colormap::Blues.color(-3.0)), rgb(Colormap::Blues.color(0.0)));
        assert_eq!(rgb(Colormap::Blues.color(7.0)), rgb(Colormap::Blues.color(1.0)));
        assert_eq!(rgb(Colormap::Viridis.color(f64::NAN)), (68, 1, 84));
    }

    #[test]
    fn test_interpolation_midpoint() {
        assert_eq!(rgb(Colormap::Binary.color(0.5)), (128, 128, 128));
    }

    #[test]
    fn test_color_scale() {
        let scale = ColorScale::from_array(&arr2(&[[-1.0f32, 0.0], [1.0, 3.0]])).unwrap();
        assert_eq!(scale, ColorScale::new(-1.0, 3.0));
        assert_eq!(scale.normalize(-1.0), 0.0);
        assert_eq!(scale.normalize(1.0), 0.5);
        assert_eq!(scale.normalize(3.0), 1.0);
    }

    #[test]
    fn test_degenerate_scale() {
        let scale = ColorScale::new(2.0, 2.0);
        assert_eq!(scale.normalize(2.0), 0.0);
    }

    #[test]
    fn test_palette_repeats() {
        assert_eq!(rgb(bar_color(0)), rgb(bar_color(7)));
        assert_eq!(rgb(bar_color(3)), rgb(bar_color(13)));
        assert_eq!(rgb(bar_color(6)), (0, 0, 0));
    }
}
