//! Side-by-side view of an autoencoder's input, corruption and output.

use ndarray::ArrayView1;
use trainviz_core::{reshape_image, ImageShape};

use crate::colormap::{ColorScale, Colormap};
use crate::config::PlotConfig;
use crate::error::Result;
use crate::figure::{Figure, Panel, Spacing};
use crate::layout::GridLayout;
use crate::surface::{render, Rendered, Surface};

/// Panel titles, left to right.
pub const COMPARE_TITLES: [&str; 3] = ["Real image", "Corrupted image", "Reconstructed image"];

/// Build the 1x3 comparison figure. Each flattened image is reshaped to
/// `image_shape` and scaled on its own.
pub fn compare_figure(
    real: ArrayView1<'_, f32>,
    corrupted: ArrayView1<'_, f32>,
    reconstructed: ArrayView1<'_, f32>,
    image_shape: ImageShape,
) -> Result<Figure> {
    let mut figure = Figure::new(GridLayout::fixed(1, 3), Spacing::default());
    for (i, (flat, title)) in [real.view(), corrupted.view(), reconstructed.view()]
        .into_iter()
        .zip(COMPARE_TITLES)
        .enumerate()
    {
        let image = reshape_image(flat, image_shape)?;
        let scale = ColorScale::from_array(&image)?;
        figure.set(i, Panel::image(image, scale, Colormap::Binary).with_title(title))?;
    }
    Ok(figure)
}

/// Plot the real, corrupted and reconstructed image next to each other.
pub fn compare_images(
    real: ArrayView1<'_, f32>,
    corrupted: ArrayView1<'_, f32>,
    reconstructed: ArrayView1<'_, f32>,
    image_shape: ImageShape,
    config: &PlotConfig,
    surface: &Surface,
) -> Result<Rendered> {
    let figure = compare_figure(real, corrupted, reconstructed, image_shape)?;
    render(&figure, config, surface)
}
