//! Weight and activation grids.
//!
//! All four visualizers share one color scale per call, taken from the
//! global minimum and maximum of the tensor, so panels are comparable with
//! each other. Cells past the last filter stay blank.

use ndarray::{s, ArrayView2, ArrayView4, Axis};
use trainviz_core::{check_index, reshape_image, ImageShape};

use crate::colormap::{ColorScale, Colormap};
use crate::config::PlotConfig;
use crate::error::Result;
use crate::figure::{Figure, Panel, Spacing};
use crate::layout::GridLayout;
use crate::surface::{render, Rendered, Surface};

/// Units shown by the dense-weight grid; the rest are ignored.
pub const MAX_DENSE_UNITS: usize = 10;

/// Grid used for dense weights: 3 rows of 4, enough for [`MAX_DENSE_UNITS`].
pub const DENSE_GRID: GridLayout = GridLayout::fixed(3, 4);

/// Grid used for autoencoder weights.
pub const AUTOENCODER_GRID: GridLayout = GridLayout::fixed(10, 10);

/// Build the dense-weight figure.
///
/// `weights` has shape `(flattened_input, units)`. Column `i` is reshaped to
/// `image_shape` and captioned `"Weights: i"`, for the first
/// [`MAX_DENSE_UNITS`] units.
pub fn dense_weights_figure(weights: ArrayView2<'_, f32>, image_shape: ImageShape) -> Result<Figure> {
    let scale = ColorScale::from_array(&weights)?;
    let units = weights.ncols().min(MAX_DENSE_UNITS);

    let mut figure = Figure::new(DENSE_GRID, Spacing::uniform(0.3));
    for i in 0..units {
        let image = reshape_image(weights.column(i), image_shape)?;
        figure.set(
            i,
            Panel::image(image, scale, Colormap::Seismic).with_caption(format!("Weights: {i}")),
        )?;
    }

    tracing::debug!("Dense weights: {} of {} units on a {} grid", units, weights.ncols(), DENSE_GRID);
    Ok(figure)
}

/// Plot the weights of a dense layer as images.
pub fn plot_dense_weights(
    weights: ArrayView2<'_, f32>,
    image_shape: ImageShape,
    config: &PlotConfig,
    surface: &Surface,
) -> Result<Rendered> {
    render(&dense_weights_figure(weights, image_shape)?, config, surface)
}

/// Build the convolution-kernel figure.
///
/// `weights` has shape `(height, width, in_channels, out_filters)`; panel `i`
/// is `weights[:, :, input_channel, i]`.
pub fn conv_weights_figure(weights: ArrayView4<'_, f32>, input_channel: usize) -> Result<Figure> {
    let (_, _, in_channels, filters) = weights.dim();
    check_index(input_channel, in_channels)?;
    let scale = ColorScale::from_array(&weights)?;
    let layout = GridLayout::square(filters)?;

    let mut figure = Figure::new(layout, Spacing::default());
    for i in 0..filters {
        let kernel = weights.slice(s![.., .., input_channel, i]).to_owned();
        figure.set(i, Panel::image(kernel, scale, Colormap::Seismic))?;
    }

    tracing::debug!("Conv weights: {} filters of channel {} on a {} grid", filters, input_channel, layout);
    Ok(figure)
}

/// Plot one input channel of every filter of a convolutional layer.
pub fn plot_conv_weights(
    weights: ArrayView4<'_, f32>,
    input_channel: usize,
    config: &PlotConfig,
    surface: &Surface,
) -> Result<Rendered> {
    render(&conv_weights_figure(weights, input_channel)?, config, surface)
}

/// Build the layer-output figure.
///
/// `layer_output` has shape `(batch, height, width, filters)`; panel `i` is
/// `layer_output[sample, :, :, i]`.
pub fn conv_layer_figure(layer_output: ArrayView4<'_, f32>, sample: usize) -> Result<Figure> {
    let (batch, _, _, filters) = layer_output.dim();
    check_index(sample, batch)?;
    let scale = ColorScale::from_array(&layer_output)?;
    let activations = layer_output.index_axis(Axis(0), sample);
    let layout = GridLayout::square(filters)?;

    let mut figure = Figure::new(layout, Spacing::default());
    for i in 0..filters {
        let map = activations.index_axis(Axis(2), i).to_owned();
        figure.set(i, Panel::image(map, scale, Colormap::Binary))?;
    }
    Ok(figure)
}

/// Plot the activations of a convolutional layer for one sample.
pub fn plot_conv_layer(
    layer_output: ArrayView4<'_, f32>,
    sample: usize,
    config: &PlotConfig,
    surface: &Surface,
) -> Result<Rendered> {
    render(&conv_layer_figure(layer_output, sample)?, config, surface)
}

/// Build the autoencoder-weight figure.
///
/// `weights` has shape `(input, hidden)`. Hidden unit `i` (column `i`, i.e.
/// row `i` of the transpose) is reshaped to `image_shape`. Units fill a
/// fixed 10x10 grid with no spacing; units past 100 are not shown.
pub fn autoencoder_weights_figure(weights: ArrayView2<'_, f32>, image_shape: ImageShape) -> Result<Figure> {
    let transposed = weights.t();
    let scale = ColorScale::from_array(&transposed)?;
    let units = transposed.nrows().min(AUTOENCODER_GRID.cells());

    let mut figure = Figure::new(AUTOENCODER_GRID, Spacing::NONE);
    for i in 0..units {
        let image = reshape_image(transposed.row(i), image_shape)?;
        figure.set(i, Panel::image(image, scale, Colormap::Binary))?;
    }

    tracing::debug!("Autoencoder weights: {} of {} hidden units", units, transposed.nrows());
    Ok(figure)
}

/// Plot the encoder weights of an autoencoder, one image per hidden unit.
pub fn plot_autoencoder_weights(
    weights: ArrayView2<'_, f32>,
    image_shape: ImageShape,
    config: &PlotConfig,
    surface: &Surface,
) -> Result<Rendered> {
    render(&autoencoder_weights_figure(weights, image_shape)?, config, surface)
}
