//! Panel figures: a grid of images, bar charts and blank cells.
//!
//! Plotters build a [`Figure`] first and render it afterwards, so the layout
//! and the content of every panel can be inspected without a drawing backend.

use ndarray::Array2;
use plotters::coord::Shift;
use plotters::prelude::*;
use trainviz_core::check_index;

use crate::colormap::{bar_color, ColorScale, Colormap};
use crate::config::PlotConfig;
use crate::error::{render_err, Result};
use crate::layout::GridLayout;
use crate::surface::Draw;

/// How an image fills its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    /// Square pixels, centered in the panel.
    Equal,
    /// Stretched to the whole panel.
    Stretch,
}

/// What a panel shows.
#[derive(Debug, Clone)]
pub enum PanelContent {
    /// Empty cell. Only the frame is drawn.
    Blank,
    /// Heat-mapped 2D array.
    Image {
        /// Pixel values, row 0 at the top.
        pixels: Array2<f32>,
        /// Value range mapped onto the colormap.
        scale: ColorScale,
        /// Colormap.
        colormap: Colormap,
        /// Fit inside the panel.
        aspect: Aspect,
    },
    /// One bar per class, colored with the bar palette.
    Bars {
        /// Bar heights.
        values: Vec<f32>,
        /// Label the x axis with class indices.
        class_ticks: bool,
    },
}

/// A single cell of a [`Figure`].
#[derive(Debug, Clone)]
pub struct Panel {
    /// Panel content.
    pub content: PanelContent,
    /// Text above the panel.
    pub title: Option<String>,
    /// Text below the panel.
    pub caption: Option<String>,
}

impl Panel {
    /// An empty panel.
    pub fn blank() -> Self {
        Self {
            content: PanelContent::Blank,
            title: None,
            caption: None,
        }
    }

    /// An image panel with square pixels.
    pub fn image(pixels: Array2<f32>, scale: ColorScale, colormap: Colormap) -> Self {
        Self {
            content: PanelContent::Image {
                pixels,
                scale,
                colormap,
                aspect: Aspect::Equal,
            },
            title: None,
            caption: None,
        }
    }

    /// A bar chart panel with class index ticks.
    pub fn bars(values: Vec<f32>) -> Self {
        Self {
            content: PanelContent::Bars {
                values,
                class_ticks: true,
            },
            title: None,
            caption: None,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Change how an image fills the panel. No effect on other content.
    #[must_use]
    pub fn with_aspect(mut self, new_aspect: Aspect) -> Self {
        if let PanelContent::Image { aspect, .. } = &mut self.content {
            *aspect = new_aspect;
        }
        self
    }

    /// True for [`PanelContent::Blank`].
    pub fn is_blank(&self) -> bool {
        matches!(self.content, PanelContent::Blank)
    }

    /// The image, if this is an image panel.
    pub fn pixels(&self) -> Option<&Array2<f32>> {
        match &self.content {
            PanelContent::Image { pixels, .. } => Some(pixels),
            _ => None,
        }
    }
}

/// Space between panels as a fraction of the panel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Between columns.
    pub horizontal: f32,
    /// Between rows.
    pub vertical: f32,
}

impl Spacing {
    /// Panels touch each other and the canvas edges.
    pub const NONE: Self = Self::uniform(0.0);

    /// Same spacing in both directions.
    pub const fn uniform(fraction: f32) -> Self {
        Self {
            horizontal: fraction,
            vertical: fraction,
        }
    }

    /// No gap at all.
    pub fn is_none(&self) -> bool {
        self.horizontal <= 0.0 && self.vertical <= 0.0
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::uniform(0.2)
    }
}

/// A grid of panels.
#[derive(Debug, Clone)]
pub struct Figure {
    layout: GridLayout,
    spacing: Spacing,
    panels: Vec<Panel>,
}

impl Figure {
    /// A figure whose cells are all blank.
    pub fn new(layout: GridLayout, spacing: Spacing) -> Self {
        Self {
            layout,
            spacing,
            panels: (0..layout.cells()).map(|_| Panel::blank()).collect(),
        }
    }

    /// Replace the panel at row-major `index`.
    pub fn set(&mut self, index: usize, panel: Panel) -> Result<()> {
        check_index(index, self.panels.len())?;
        self.panels[index] = panel;
        Ok(())
    }

    /// Grid layout.
    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Panel spacing.
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// All panels, row-major.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Panel at `(row, col)`.
    pub fn panel(&self, row: usize, col: usize) -> Option<&Panel> {
        if row >= self.layout.rows() || col >= self.layout.cols() {
            return None;
        }
        self.panels.get(row * self.layout.cols() + col)
    }

    /// Number of non-blank panels.
    pub fn filled(&self) -> usize {
        self.panels.iter().filter(|p| !p.is_blank()).count()
    }

    /// Captions of all panels that have one, in order.
    pub fn captions(&self) -> Vec<&str> {
        self.panels.iter().filter_map(|p| p.caption.as_deref()).collect()
    }

    /// Titles of all panels that have one, in order.
    pub fn titles(&self) -> Vec<&str> {
        self.panels.iter().filter_map(|p| p.title.as_deref()).collect()
    }
}

impl Draw for Figure {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, config: &PlotConfig) -> Result<()> {
        root.fill(&WHITE).map_err(render_err)?;

        let body = if self.spacing.is_none() {
            root.margin(0, 0, 0, 0)
        } else {
            let (w, h) = root.dim_in_pixel();
            let (mx, my) = ((w / 25) as i32, (h / 25) as i32);
            root.margin(my, my, mx, mx)
        };

        let cells = body.split_evenly((self.layout.rows(), self.layout.cols()));
        for (cell, panel) in cells.iter().zip(&self.panels) {
            // Packed grids leave trailing cells empty, frame included.
            if panel.is_blank() && self.spacing.is_none() {
                continue;
            }
            let (cw, ch) = cell.dim_in_pixel();
            let pad_x = half_gap(cw, self.spacing.horizontal);
            let pad_y = half_gap(ch, self.spacing.vertical);
            draw_panel(&cell.margin(pad_y, pad_y, pad_x, pad_x), panel, config)?;
        }
        Ok(())
    }
}

/// Half of the gap between two neighbouring panels of a cell of `size` pixels.
fn half_gap(size: u32, fraction: f32) -> i32 {
    if fraction <= 0.0 {
        return 0;
    }
    (size as f32 * fraction / (2.0 * (1.0 + fraction))) as i32
}

/// Pixel rectangle `(x0, y0, x1, y1)` covered by an image of `rows x cols`
/// inside a `width x height` area.
pub(crate) fn image_extent(
    width: u32,
    height: u32,
    rows: usize,
    cols: usize,
    aspect: Aspect,
) -> (i32, i32, i32, i32) {
    match aspect {
        Aspect::Stretch => (0, 0, width as i32, height as i32),
        Aspect::Equal => {
            let cell = (width as f64 / cols as f64).min(height as f64 / rows as f64);
            let iw = (cell * cols as f64).round() as i32;
            let ih = (cell * rows as f64).round() as i32;
            let x0 = (width as i32 - iw) / 2;
            let y0 = (height as i32 - ih) / 2;
            (x0, y0, x0 + iw, y0 + ih)
        }
    }
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    config: &PlotConfig,
) -> Result<()> {
    let area = match &panel.title {
        Some(title) => area.titled(title, config.text_style()).map_err(render_err)?,
        None => area.margin(0, 0, 0, 0),
    };

    let body = match &panel.caption {
        Some(caption) => {
            let (_, h) = area.dim_in_pixel();
            let label_h = config.line_height().min(h / 2);
            let (upper, lower) = area.split_vertically((h - label_h) as i32);
            lower.titled(caption, config.text_style()).map_err(render_err)?;
            upper
        }
        None => area,
    };

    match &panel.content {
        PanelContent::Blank => {
            if config.frame {
                let (w, h) = body.dim_in_pixel();
                draw_frame(&body, (0, 0, w as i32, h as i32))?;
            }
            Ok(())
        }
        PanelContent::Image {
            pixels,
            scale,
            colormap,
            aspect,
        } => draw_image(&body, pixels, *scale, *colormap, *aspect, config.frame),
        PanelContent::Bars {
            values,
            class_ticks,
        } => draw_bars(&body, values, *class_ticks, config),
    }
}

fn draw_frame<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    (x0, y0, x1, y1): (i32, i32, i32, i32),
) -> Result<()> {
    area.draw(&Rectangle::new([(x0, y0), (x1 - 1, y1 - 1)], BLACK.stroke_width(1)))
        .map_err(render_err)
}

fn draw_image<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    pixels: &Array2<f32>,
    scale: ColorScale,
    colormap: Colormap,
    aspect: Aspect,
    frame: bool,
) -> Result<()> {
    let (rows, cols) = pixels.dim();
    if rows == 0 || cols == 0 {
        return Ok(());
    }
    let (w, h) = area.dim_in_pixel();
    let extent = image_extent(w, h, rows, cols, aspect);
    let (x0, y0, x1, y1) = extent;
    let step_x = (x1 - x0) as f64 / cols as f64;
    let step_y = (y1 - y0) as f64 / rows as f64;

    // Nearest-neighbour: one rectangle per source pixel.
    for ((r, c), &value) in pixels.indexed_iter() {
        let px0 = x0 + (c as f64 * step_x).round() as i32;
        let px1 = x0 + ((c + 1) as f64 * step_x).round() as i32;
        let py0 = y0 + (r as f64 * step_y).round() as i32;
        let py1 = y0 + ((r + 1) as f64 * step_y).round() as i32;
        let color = colormap.color(scale.normalize(value));
        area.draw(&Rectangle::new([(px0, py0), (px1, py1)], color.filled()))
            .map_err(render_err)?;
    }

    if frame {
        draw_frame(area, extent)?;
    }
    Ok(())
}

fn draw_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    values: &[f32],
    class_ticks: bool,
    config: &PlotConfig,
) -> Result<()> {
    let n = values.len().max(1);
    let lo = values.iter().copied().fold(0.0f32, f32::min);
    let hi = values.iter().copied().fold(0.0f32, f32::max);
    let hi = if hi - lo <= f32::EPSILON { lo + 1.0 } else { hi };

    let label_area = if class_ticks { config.line_height() as i32 } else { 0 };
    let mut chart = ChartBuilder::on(area)
        .margin(4)
        .x_label_area_size(label_area)
        .build_cartesian_2d(-0.5f32..(n as f32 - 0.5), lo..hi)
        .map_err(render_err)?;

    let class_label = |x: &f32| {
        let r = x.round();
        if (x - r).abs() < 1e-3 && r >= 0.0 {
            format!("{}", r as i64)
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .y_labels(0)
        .x_labels(if class_ticks { n } else { 0 })
        .x_label_formatter(&class_label)
        .label_style(config.text_style())
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, &v)| {
            let x = i as f32;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, v)], bar_color(i).filled())
        }))
        .map_err(render_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_new_figure_is_blank() {
        let fig = Figure::new(GridLayout::fixed(2, 3), Spacing::default());
        assert_eq!(fig.panels().len(), 6);
        assert_eq!(fig.filled(), 0);
    }

    #[test]
    fn test_set_and_lookup() {
        let mut fig = Figure::new(GridLayout::fixed(2, 2), Spacing::NONE);
        let img = Array2::<f32>::zeros((2, 2));
        fig.set(3, Panel::image(img, ColorScale::new(0.0, 1.0), Colormap::Gray).with_caption("x"))
            .unwrap();

        assert_eq!(fig.filled(), 1);
        assert!(fig.panel(1, 1).unwrap().pixels().is_some());
        assert!(fig.panel(0, 1).unwrap().is_blank());
        assert!(fig.panel(2, 0).is_none());
        assert_eq!(fig.captions(), vec!["x"]);
    }

    #[test]
    fn test_packed_blank_cells_stay_empty() {
        use crate::surface::{render, Surface};

        let mut fig = Figure::new(GridLayout::fixed(2, 2), Spacing::NONE);
        let img = Array2::from_shape_fn((2, 2), |(r, c)| (r * 2 + c) as f32);
        fig.set(0, Panel::image(img, ColorScale::new(0.0, 3.0), Colormap::Gray)).unwrap();

        let config = PlotConfig::default().with_size(40, 40);
        assert!(config.frame);
        let rendered = render(&fig, &config, &Surface::Display).unwrap();
        let frame = rendered.frame().unwrap();

        assert_ne!(frame.pixel(5, 5), Some([255, 255, 255]));
        for (x, y) in [(22, 1), (39, 0), (39, 19), (30, 10), (1, 38), (39, 39), (25, 25)] {
            assert_eq!(frame.pixel(x, y), Some([255, 255, 255]), "pixel ({x}, {y})");
        }
    }

    #[test]
    fn test_set_out_of_range() {
        let mut fig = Figure::new(GridLayout::fixed(1, 2), Spacing::NONE);
        assert!(fig.set(2, Panel::blank()).is_err());
    }

    #[test]
    fn test_with_aspect_only_touches_images() {
        let bars = Panel::bars(vec![1.0]).with_aspect(Aspect::Stretch);
        assert!(matches!(bars.content, PanelContent::Bars { .. }));

        let img = Panel::image(Array2::zeros((1, 1)), ColorScale::new(0.0, 1.0), Colormap::Binary)
            .with_aspect(Aspect::Stretch);
        assert!(matches!(
            img.content,
            PanelContent::Image {
                aspect: Aspect::Stretch,
                ..
            }
        ));
    }

    #[test]
    fn test_image_extent_equal() {
        // 2 rows x 4 cols into 100x100: 25px pixels, 100x50 centered vertically
        assert_eq!(image_extent(100, 100, 2, 4, Aspect::Equal), (0, 25, 100, 75));
        assert_eq!(image_extent(100, 100, 2, 4, Aspect::Stretch), (0, 0, 100, 100));
    }

    #[test]
    fn test_half_gap() {
        assert_eq!(half_gap(100, 0.0), 0);
        assert_eq!(half_gap(150, 0.5), 25);
    }
}
