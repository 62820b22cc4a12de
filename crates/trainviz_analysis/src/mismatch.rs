//! Wrong prediction lookup.

use ndarray::{Array, ArrayBase, Axis, Data, RemoveAxis};
use serde::{Deserialize, Serialize};
use trainviz_core::{CoreError, Result};

/// Samples on which the model disagrees with the ground truth.
///
/// All three vectors are aligned: entry `k` describes sample `indices[k]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatches {
    /// Sample indices, ascending.
    pub indices: Vec<usize>,
    /// What the model predicted for each mismatched sample.
    pub predicted: Vec<usize>,
    /// The true label of each mismatched sample.
    pub actual: Vec<usize>,
}

impl Mismatches {
    /// Number of wrong predictions.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when every prediction was correct.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Fraction of `total` samples that were mispredicted.
    pub fn error_rate(&self, total: usize) -> f32 {
        if total == 0 {
            0.0
        } else {
            self.len() as f32 / total as f32
        }
    }

    /// Iterate `(index, predicted, actual)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.indices
            .iter()
            .zip(&self.predicted)
            .zip(&self.actual)
            .map(|((&i, &p), &a)| (i, p, a))
    }
}

/// Wrong predictions together with the images they were made on.
#[derive(Debug, Clone)]
pub struct ImageMismatches<A, D: ndarray::Dimension> {
    /// Indices and labels of the wrong predictions.
    pub mismatches: Mismatches,
    /// `images[indices[k]]` stacked along axis 0.
    pub images: Array<A, D>,
}

/// Find the samples where `predictions` disagrees with `labels`.
///
/// # Errors
///
/// Returns [`CoreError::ShapeMismatch`] when the two vectors differ in length.
///
/// # Example
///
/// ```rust
/// use trainviz_analysis::find_wrong_predictions;
///
/// let wrong = find_wrong_predictions(&[0, 1, 2, 1], &[0, 2, 2, 1]).unwrap();
/// assert_eq!(wrong.indices, vec![1]);
/// assert_eq!(wrong.predicted, vec![2]);
/// assert_eq!(wrong.actual, vec![1]);
/// ```
pub fn find_wrong_predictions(labels: &[usize], predictions: &[usize]) -> Result<Mismatches> {
    if labels.len() != predictions.len() {
        return Err(CoreError::ShapeMismatch(format!(
            "{} labels vs {} predictions",
            labels.len(),
            predictions.len()
        )));
    }

    let mut wrong = Mismatches::default();
    for (i, (&label, &pred)) in labels.iter().zip(predictions).enumerate() {
        if label != pred {
            wrong.indices.push(i);
            wrong.predicted.push(pred);
            wrong.actual.push(label);
        }
    }

    tracing::debug!("{} of {} predictions are wrong", wrong.len(), labels.len());
    Ok(wrong)
}

/// Like [`find_wrong_predictions`], also slicing the matching images out of
/// `images` (axis 0 indexes samples).
///
/// # Errors
///
/// Returns [`CoreError::ShapeMismatch`] when labels, predictions and images
/// do not have the same number of samples.
pub fn find_wrong_predictions_with_images<S, A, D>(
    labels: &[usize],
    predictions: &[usize],
    images: &ArrayBase<S, D>,
) -> Result<ImageMismatches<A, D>>
where
    S: Data<Elem = A>,
    A: Clone,
    D: RemoveAxis,
{
    if images.ndim() == 0 {
        return Err(CoreError::DimensionError {
            expected: 1,
            got: 0,
        });
    }
    let n_images = images.len_of(Axis(0));
    if n_images != labels.len() {
        return Err(CoreError::ShapeMismatch(format!(
            "{} labels vs {} images",
            labels.len(),
            n_images
        )));
    }

    let mismatches = find_wrong_predictions(labels, predictions)?;

    let images = if mismatches.is_empty() {
        let mut dim = images.raw_dim();
        dim[0] = 0;
        Array::from_shape_vec(dim, Vec::new()).map_err(|e| CoreError::InvalidShape {
            expected: "empty image batch".to_string(),
            got: e.to_string(),
        })?
    } else {
        images.select(Axis(0), &mismatches.indices)
    };

    Ok(ImageMismatches { mismatches, images })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array3};

    #[test]
    fn test_find_wrong_predictions() {
        let wrong = find_wrong_predictions(&[0, 1, 2, 1], &[0, 2, 2, 1]).unwrap();

        assert_eq!(wrong.indices, vec![1]);
        assert_eq!(wrong.predicted, vec![2]);
        assert_eq!(wrong.actual, vec![1]);
    }

    #[test]
    fn test_ascending_order() {
        let labels = vec![3, 3, 0, 1, 1, 2, 0];
        let preds = vec![0, 3, 1, 1, 2, 0, 0];
        let wrong = find_wrong_predictions(&labels, &preds).unwrap();

        assert_eq!(wrong.indices, vec![0, 2, 4, 5]);
        for (i, p, a) in wrong.iter() {
            assert_eq!(preds[i], p);
            assert_eq!(labels[i], a);
            assert_ne!(p, a);
        }
    }

    #[test]
    fn test_all_correct() {
        let wrong = find_wrong_predictions(&[4, 2, 0], &[4, 2, 0]).unwrap();
        assert!(wrong.is_empty());
        assert!(wrong.predicted.is_empty());
        assert!(wrong.actual.is_empty());
        assert_eq!(wrong.error_rate(3), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let err = find_wrong_predictions(&[0, 1], &[0]).unwrap_err();
        assert!(matches!(err, CoreError::ShapeMismatch(_)));
    }

    #[test]
    fn test_with_images() {
        let images = arr2(&[[0.0f32, 0.1], [1.0, 1.1], [2.0, 2.1], [3.0, 3.1]]);
        let found = find_wrong_predictions_with_images(&[0, 1, 2, 1], &[1, 1, 0, 1], &images).unwrap();

        assert_eq!(found.mismatches.indices, vec![0, 2]);
        assert_eq!(found.images.nrows(), 2);
        assert_eq!(found.images.row(0), images.row(0));
        assert_eq!(found.images.row(1), images.row(2));
    }

    #[test]
    fn test_with_images_all_correct() {
        let images = Array3::<f32>::zeros((3, 2, 2));
        let found = find_wrong_predictions_with_images(&[0, 1, 2], &[0, 1, 2], &images).unwrap();

        assert!(found.mismatches.is_empty());
        assert_eq!(found.images.shape(), &[0, 2, 2]);
    }

    #[test]
    fn test_with_images_length_mismatch() {
        let images = Array3::<f32>::zeros((2, 2, 2));
        let err = find_wrong_predictions_with_images(&[0, 1, 2], &[0, 1, 2], &images).unwrap_err();
        assert!(matches!(err, CoreError::ShapeMismatch(_)));
    }

    #[test]
    fn test_error_rate() {
        let wrong = find_wrong_predictions(&[0, 1, 2, 3], &[1, 1, 2, 0]).unwrap();
        assert!((wrong.error_rate(4) - 0.5).abs() < 1e-6);
    }
}
