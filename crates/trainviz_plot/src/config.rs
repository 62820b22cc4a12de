//! Rendering configuration.

use plotters::style::{IntoFont, TextStyle};
use serde::{Deserialize, Serialize};

/// Drawing backend used to produce the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Raster output: RGB frames in memory, PNG/JPEG/BMP files on disk.
    #[default]
    Bitmap,
    /// Vector output: SVG documents.
    Svg,
}

/// Configuration shared by every plotter.
///
/// Passed explicitly to each call; nothing is configured globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Drawing backend.
    pub backend: Backend,
    /// Font family for titles, captions and tick labels.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Draw a thin frame around every image panel.
    pub frame: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            backend: Backend::Bitmap,
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            frame: true,
        }
    }
}

impl PlotConfig {
    /// Set the canvas size.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the drawing backend.
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Enable or disable panel frames.
    #[must_use]
    pub fn with_frame(mut self, frame: bool) -> Self {
        self.frame = frame;
        self
    }

    /// Canvas size as a `(width, height)` tuple.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Text style for captions and labels.
    pub fn text_style(&self) -> TextStyle<'_> {
        TextStyle::from((self.font_family.as_str(), self.font_size).into_font())
    }

    /// Height reserved for a single line of text.
    pub(crate) fn line_height(&self) -> u32 {
        (self.font_size * 1.6).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlotConfig::default();
        assert_eq!(config.size(), (640, 480));
        assert_eq!(config.backend, Backend::Bitmap);
        assert!(config.frame);
    }

    #[test]
    fn test_builder() {
        let config = PlotConfig::default()
            .with_size(100, 50)
            .with_backend(Backend::Svg)
            .with_frame(false);
        assert_eq!(config.size(), (100, 50));
        assert_eq!(config.backend, Backend::Svg);
        assert!(!config.frame);
    }

    #[test]
    fn test_partial_json() {
        let config: PlotConfig = serde_json::from_str(r#"{"backend": "svg", "width": 800}"#).unwrap();
        assert_eq!(config.backend, Backend::Svg);
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 480);
        assert_eq!(config.font_family, "sans-serif");
    }
}
