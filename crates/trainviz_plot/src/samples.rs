//! Sample images next to their class probabilities and logits.

use ndarray::{Array2, ArrayBase, ArrayView, ArrayView2, Axis, Data, Dimension, Ix2, RemoveAxis};
use trainviz_core::{CoreError, ImageShape};

use crate::colormap::{ColorScale, Colormap};
use crate::config::PlotConfig;
use crate::error::Result;
use crate::figure::{Aspect, Figure, Panel, Spacing};
use crate::layout::GridLayout;
use crate::surface::{render, Rendered, Surface};

/// Build the prediction figure: one row per sample with the image, a bar
/// chart of the probabilities and a bar chart of the logits.
///
/// `images` is indexed by sample along axis 0. With `image_shape` set every
/// sample is reshaped to it; otherwise each sample must already be 2D.
///
/// # Errors
///
/// Fails when the per-sample arrays do not share the same number of samples,
/// when the batch is empty, or when a sample cannot be turned into a 2D image.
pub fn predictions_figure<S, D>(
    images: &ArrayBase<S, D>,
    probabilities: ArrayView2<'_, f32>,
    logits: ArrayView2<'_, f32>,
    cls_true: &[usize],
    cls_pred: &[usize],
    image_shape: Option<ImageShape>,
) -> Result<Figure>
where
    S: Data<Elem = f32>,
    D: RemoveAxis,
{
    if images.ndim() == 0 {
        return Err(CoreError::DimensionError {
            expected: 2,
            got: 0,
        }
        .into());
    }
    let n = images.len_of(Axis(0));
    if n == 0 {
        return Err(CoreError::EmptyInput("no samples to plot".to_string()).into());
    }
    for (name, len) in [
        ("probability rows", probabilities.nrows()),
        ("logit rows", logits.nrows()),
        ("true classes", cls_true.len()),
        ("predicted classes", cls_pred.len()),
    ] {
        if len != n {
            return Err(CoreError::ShapeMismatch(format!("{n} images vs {len} {name}")).into());
        }
    }

    let mut figure = Figure::new(GridLayout::fixed(n, 3), Spacing::uniform(0.5));
    for i in 0..n {
        let pixels = sample_image(images.index_axis(Axis(0), i), image_shape)?;
        let scale = ColorScale::from_array(&pixels)?;
        let caption = format!("True: {}, Pred: {}", cls_true[i], cls_pred[i]);
        figure.set(
            3 * i,
            Panel::image(pixels, scale, Colormap::Binary)
                .with_aspect(Aspect::Stretch)
                .with_caption(caption),
        )?;
        figure.set(3 * i + 1, Panel::bars(probabilities.row(i).to_vec()))?;
        figure.set(3 * i + 2, Panel::bars(logits.row(i).to_vec()))?;
    }

    tracing::debug!("Prediction figure with {} samples, {} classes", n, probabilities.ncols());
    Ok(figure)
}

/// Plot sample images with their predicted probabilities and logits.
///
/// See [`predictions_figure`] for the layout.
#[allow(clippy::too_many_arguments)]
pub fn plot_predictions<S, D>(
    images: &ArrayBase<S, D>,
    probabilities: ArrayView2<'_, f32>,
    logits: ArrayView2<'_, f32>,
    cls_true: &[usize],
    cls_pred: &[usize],
    image_shape: Option<ImageShape>,
    config: &PlotConfig,
    surface: &Surface,
) -> Result<Rendered>
where
    S: Data<Elem = f32>,
    D: RemoveAxis,
{
    let figure = predictions_figure(images, probabilities, logits, cls_true, cls_pred, image_shape)?;
    render(&figure, config, surface)
}

fn sample_image<D: Dimension>(sample: ArrayView<'_, f32, D>, shape: Option<ImageShape>) -> Result<Array2<f32>> {
    match shape {
        Some(shape) => {
            let flat: Vec<f32> = sample.iter().copied().collect();
            let flat = ndarray::Array1::from(flat);
            Ok(trainviz_core::reshape_image(flat.view(), shape)?)
        }
        None => {
            let ndim = sample.ndim();
            let image = sample
                .into_dimensionality::<Ix2>()
                .map_err(|_| CoreError::DimensionError {
                    expected: 2,
                    got: ndim,
                })?;
            Ok(image.to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::PanelContent;
    use ndarray::{Array2, Array3};

    fn inputs(n: usize) -> (Array2<f32>, Array2<f32>, Array2<f32>) {
        let images = Array2::from_shape_fn((n, 16), |(i, j)| (i * 16 + j) as f32);
        let probs = Array2::from_elem((n, 10), 0.1);
        let logits = Array2::from_shape_fn((n, 10), |(_, j)| j as f32 - 5.0);
        (images, probs, logits)
    }

    #[test]
    fn test_one_row_per_sample() {
        let (images, probs, logits) = inputs(3);
        let fig = predictions_figure(
            &images,
            probs.view(),
            logits.view(),
            &[1, 2, 3],
            &[1, 0, 3],
            Some(ImageShape::new(4, 4)),
        )
        .unwrap();

        assert_eq!(fig.layout(), GridLayout::fixed(3, 3));
        assert_eq!(fig.filled(), 9);
        assert_eq!(
            fig.captions(),
            vec!["True: 1, Pred: 1", "True: 2, Pred: 0", "True: 3, Pred: 3"]
        );

        let img = fig.panel(1, 0).unwrap().pixels().unwrap();
        assert_eq!(img.dim(), (4, 4));
        assert_eq!(img[[0, 1]], 17.0);

        match &fig.panel(2, 2).unwrap().content {
            PanelContent::Bars { values, .. } => assert_eq!(values[0], -5.0),
            other => panic!("expected bars, got {other:?}"),
        }
    }

    #[test]
    fn test_unflattened_images() {
        let images = Array3::<f32>::zeros((2, 5, 3));
        let probs = Array2::<f32>::zeros((2, 4));
        let fig = predictions_figure(&images, probs.view(), probs.view(), &[0, 1], &[0, 1], None).unwrap();
        assert_eq!(fig.panel(0, 0).unwrap().pixels().unwrap().dim(), (5, 3));
    }

    #[test]
    fn test_flat_images_need_a_shape() {
        let (images, probs, logits) = inputs(2);
        let err = predictions_figure(&images, probs.view(), logits.view(), &[0, 1], &[0, 1], None);
        assert!(err.is_err());
    }

    #[test]
    fn test_misaligned_inputs() {
        let (images, probs, logits) = inputs(2);
        let shape = Some(ImageShape::new(4, 4));
        assert!(predictions_figure(&images, probs.view(), logits.view(), &[0], &[0, 1], shape).is_err());
        assert!(predictions_figure(
            &images,
            probs.slice(ndarray::s![..1, ..]),
            logits.view(),
            &[0, 1],
            &[0, 1],
            shape
        )
        .is_err());
    }

    #[test]
    fn test_wrong_image_shape() {
        let (images, probs, logits) = inputs(1);
        let err = predictions_figure(
            &images,
            probs.view(),
            logits.view(),
            &[0],
            &[0],
            Some(ImageShape::new(3, 3)),
        );
        assert!(err.is_err());
    }
}
