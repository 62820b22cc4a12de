//! Confusion matrix heat map.

use ndarray::Array2;
use plotters::coord::Shift;
use plotters::prelude::*;
use trainviz_analysis::{confusion_matrix, ConfusionMatrix};

use crate::colormap::{ColorScale, Colormap};
use crate::config::PlotConfig;
use crate::error::{render_err, Result};
use crate::surface::{render, Draw, Rendered, Surface};

/// Number of color strips in the colorbar.
const COLORBAR_STEPS: usize = 64;

/// A confusion matrix ready to be drawn.
#[derive(Debug, Clone)]
pub struct ConfusionPlot {
    /// Counts, row = true class, column = predicted class.
    pub matrix: ConfusionMatrix,
    /// Number of tick labels on each axis (`0..num_classes`).
    pub num_classes: usize,
    /// Colormap for the cells.
    pub colormap: Colormap,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Draw a colorbar on the right.
    pub colorbar: bool,
}

impl ConfusionPlot {
    /// Count `labels` against `predictions`.
    ///
    /// `num_classes` only controls the axis ticks; the matrix covers the
    /// classes actually present.
    pub fn new(labels: &[usize], predictions: &[usize], num_classes: usize) -> Result<Self> {
        let matrix = confusion_matrix(labels, predictions)?;
        tracing::debug!(
            "Confusion matrix over {} classes, accuracy {:.4}",
            matrix.n_classes(),
            matrix.accuracy()
        );
        Ok(Self {
            matrix,
            num_classes,
            colormap: Colormap::Blues,
            x_label: "Predicted".to_string(),
            y_label: "True".to_string(),
            colorbar: true,
        })
    }

    /// Side length of the plotted square, in cells.
    pub fn extent(&self) -> usize {
        self.matrix.n_classes().max(self.num_classes).max(1)
    }

    /// Axis tick labels.
    pub fn tick_labels(&self) -> Vec<String> {
        (0..self.num_classes).map(|i| i.to_string()).collect()
    }

    fn counts(&self) -> Array2<f32> {
        self.matrix.to_array()
    }

    fn scale(&self) -> ColorScale {
        ColorScale::new(0.0, self.matrix.max_count() as f32)
    }
}

impl Draw for ConfusionPlot {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, config: &PlotConfig) -> Result<()> {
        root.fill(&WHITE).map_err(render_err)?;

        let (width, _) = root.dim_in_pixel();
        let (main, side) = if self.colorbar {
            let bar_width = (width / 6).max(1);
            let (main, side) = root.split_horizontally((width - bar_width) as i32);
            (main, Some(side))
        } else {
            (root.margin(0, 0, 0, 0), None)
        };

        let extent = self.extent() as f32;
        let label_area = (config.line_height() * 2) as i32;
        let mut chart = ChartBuilder::on(&main)
            .margin(10)
            .x_label_area_size(label_area)
            .y_label_area_size(label_area)
            .build_cartesian_2d(-0.5f32..extent - 0.5, -0.5f32..extent - 0.5)
            .map_err(render_err)?;

        // Row 0 is drawn at the top, so y ticks count downwards.
        let num_classes = self.num_classes;
        let x_tick = move |x: &f32| tick_label(*x, num_classes);
        let y_tick = move |y: &f32| tick_label(extent - 1.0 - *y, num_classes);

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(self.num_classes)
            .y_labels(self.num_classes)
            .x_label_formatter(&x_tick)
            .y_label_formatter(&y_tick)
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .label_style(config.text_style())
            .axis_desc_style(config.text_style())
            .draw()
            .map_err(render_err)?;

        let scale = self.scale();
        let colormap = self.colormap;
        chart
            .draw_series(self.counts().indexed_iter().map(|((r, c), &count)| {
                let x = c as f32;
                let y = extent - 1.0 - r as f32;
                Rectangle::new(
                    [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                    colormap.color(scale.normalize(count)).filled(),
                )
            }))
            .map_err(render_err)?;

        if let Some(side) = side {
            draw_colorbar(&side, scale, colormap, config)?;
        }
        Ok(())
    }
}

fn tick_label(position: f32, num_classes: usize) -> String {
    let r = position.round();
    if (position - r).abs() < 1e-3 && r >= 0.0 && (r as usize) < num_classes {
        format!("{}", r as usize)
    } else {
        String::new()
    }
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: ColorScale,
    colormap: Colormap,
    config: &PlotConfig,
) -> Result<()> {
    let lo = scale.min;
    let hi = if scale.max > scale.min { scale.max } else { scale.min + 1.0 };

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .margin_left(4)
        .x_label_area_size((config.line_height() * 2) as i32)
        .y_label_area_size((config.line_height() * 2) as i32)
        .build_cartesian_2d(0f32..1f32, lo..hi)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(5)
        .label_style(config.text_style())
        .draw()
        .map_err(render_err)?;

    let step = (hi - lo) / COLORBAR_STEPS as f32;
    chart
        .draw_series((0..COLORBAR_STEPS).map(|i| {
            let y0 = lo + step * i as f32;
            let t = (i as f64 + 0.5) / COLORBAR_STEPS as f64;
            Rectangle::new([(0.0, y0), (1.0, y0 + step)], colormap.color(t).filled())
        }))
        .map_err(render_err)?;
    Ok(())
}

/// Compute the confusion matrix of `labels` vs `predictions` and draw it as
/// a heat map with ticks `0..num_classes`.
///
/// The horizontal axis is labeled "Predicted" and the vertical axis "True".
pub fn plot_confusion_matrix(
    labels: &[usize],
    predictions: &[usize],
    num_classes: usize,
    config: &PlotConfig,
    surface: &Surface,
) -> Result<Rendered> {
    let plot = ConfusionPlot::new(labels, predictions, num_classes)?;
    render(&plot, config, surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_model() {
        let plot = ConfusionPlot::new(&[0, 1, 2, 1], &[0, 2, 2, 1], 3).unwrap();
        assert_eq!(plot.matrix.matrix[1][2], 1);
        assert_eq!(plot.x_label, "Predicted");
        assert_eq!(plot.y_label, "True");
        assert_eq!(plot.tick_labels(), vec!["0", "1", "2"]);
        assert_eq!(plot.extent(), 3);
        assert_eq!(plot.scale(), ColorScale::new(0.0, 1.0));
    }

    #[test]
    fn test_ticks_independent_of_matrix() {
        // only classes 0 and 1 occur, ticks still run to 4
        let plot = ConfusionPlot::new(&[0, 1], &[1, 1], 5).unwrap();
        assert_eq!(plot.matrix.n_classes(), 2);
        assert_eq!(plot.tick_labels().len(), 5);
        assert_eq!(plot.extent(), 5);
    }

    #[test]
    fn test_tick_label() {
        assert_eq!(tick_label(2.0, 3), "2");
        assert_eq!(tick_label(2.5, 3), "");
        assert_eq!(tick_label(3.0, 3), "");
        assert_eq!(tick_label(-1.0, 3), "");
    }

    #[test]
    fn test_row_zero_drawn_at_top() {
        // counts [[3, 0], [0, 1]]
        let mut plot = ConfusionPlot::new(&[0, 0, 0, 1], &[0, 0, 0, 1], 2).unwrap();
        plot.colorbar = false;
        let config = PlotConfig::default().with_size(400, 400);
        let rendered = render(&plot, &config, &Surface::Display).unwrap();
        let frame = rendered.frame().unwrap();

        // plot area spans x 50..390, y 10..350 (margin 10, label areas 40)
        let color = |t: f64| {
            let c = plot.colormap.color(t);
            Some([c.0, c.1, c.2])
        };
        assert_eq!(frame.pixel(135, 95), color(1.0));
        assert_eq!(frame.pixel(305, 95), color(0.0));
        assert_eq!(frame.pixel(135, 265), color(0.0));
        assert_eq!(frame.pixel(305, 265), color(1.0 / 3.0));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(ConfusionPlot::new(&[0, 1], &[0], 2).is_err());
    }
}
