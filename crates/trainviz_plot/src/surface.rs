//! Render targets.
//!
//! Every plotter takes an explicit [`Surface`] instead of drawing into a
//! process-wide "current figure". `Surface::Display` renders into memory and
//! hands the result back to the caller, which is free to show it in a window,
//! stream it, or drop it. `Surface::File` writes the figure to disk.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use trainviz_core::CoreError;

use crate::config::{Backend, PlotConfig};
use crate::error::{render_err, Result};

/// Anything that can draw itself onto a drawing area.
pub trait Draw {
    /// Draw onto `root`, which covers the whole canvas.
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, config: &PlotConfig) -> Result<()>;
}

/// Where a figure goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    /// Render into memory and return the pixels (or SVG document).
    Display,
    /// Write to a file. The bitmap backend picks the format from the extension.
    File(PathBuf),
}

impl Surface {
    /// File surface at `path`.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Surface::File(path.as_ref().to_path_buf())
    }
}

/// An RGB8 raster, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 3` bytes.
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Color at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 3) as usize;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }
}

/// Result of rendering a figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Raster drawn in memory.
    Frame(Frame),
    /// SVG document drawn in memory.
    Svg(String),
    /// File written to disk.
    File(PathBuf),
}

impl Rendered {
    /// The raster, if any.
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            Rendered::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    /// The written file, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Rendered::File(path) => Some(path),
            _ => None,
        }
    }
}

/// Render `figure` with `config` onto `surface`.
pub fn render<F: Draw>(figure: &F, config: &PlotConfig, surface: &Surface) -> Result<Rendered> {
    let (width, height) = config.size();
    if width == 0 || height == 0 {
        return Err(CoreError::EmptyInput(format!("canvas of {width}x{height} pixels")).into());
    }
    tracing::debug!("Rendering {}x{} figure ({:?}) to {:?}", width, height, config.backend, surface);

    match (surface, config.backend) {
        (Surface::Display, Backend::Bitmap) => {
            let mut pixels = vec![0u8; width as usize * height as usize * 3];
            {
                let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
                figure.draw(&root, config)?;
                root.present().map_err(render_err)?;
            }
            Ok(Rendered::Frame(Frame {
                width,
                height,
                pixels,
            }))
        }
        (Surface::Display, Backend::Svg) => {
            let mut document = String::new();
            {
                let root = SVGBackend::with_string(&mut document, (width, height)).into_drawing_area();
                figure.draw(&root, config)?;
                root.present().map_err(render_err)?;
            }
            Ok(Rendered::Svg(document))
        }
        (Surface::File(path), Backend::Bitmap) => {
            let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
            figure.draw(&root, config)?;
            root.present().map_err(render_err)?;
            tracing::info!("Figure saved to: {}", path.display());
            Ok(Rendered::File(path.clone()))
        }
        (Surface::File(path), Backend::Svg) => {
            let root = SVGBackend::new(path, (width, height)).into_drawing_area();
            figure.draw(&root, config)?;
            root.present().map_err(render_err)?;
            tracing::info!("Figure saved to: {}", path.display());
            Ok(Rendered::File(path.clone()))
        }
    }
}
