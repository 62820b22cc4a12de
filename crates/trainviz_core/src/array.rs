//! Small array helpers shared by the analysis and plotting crates.

use ndarray::{Array2, ArrayBase, ArrayView1, Data, Dimension};

use crate::error::{CoreError, Result};
use crate::shape::ImageShape;

/// Global minimum and maximum of an array.
///
/// NaNs are skipped.
///
/// # Errors
///
/// Returns [`CoreError::EmptyInput`] when the array has no elements.
pub fn min_max<S, D>(array: &ArrayBase<S, D>) -> Result<(f32, f32)>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    if array.is_empty() {
        return Err(CoreError::EmptyInput("cannot take min/max of an empty array".to_string()));
    }
    let (min, max) = array
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    Ok((min, max))
}

/// `ceil(sqrt(n))`, computed exactly on integers.
#[must_use]
pub fn ceil_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root < n {
        root += 1;
    }
    while root > 0 && (root - 1) * (root - 1) >= n {
        root -= 1;
    }
    root
}

/// Reshape a flat vector row-major into a 2D image.
///
/// Works on non-contiguous views (e.g. a column of a weight matrix).
///
/// # Errors
///
/// Returns [`CoreError::InvalidShape`] when the length differs from `shape.numel()`.
pub fn reshape_image(flat: ArrayView1<'_, f32>, shape: ImageShape) -> Result<Array2<f32>> {
    if flat.len() != shape.numel() {
        return Err(CoreError::InvalidShape {
            expected: format!("{} values for a {} image", shape.numel(), shape),
            got: format!("{} values", flat.len()),
        });
    }
    let data: Vec<f32> = flat.iter().copied().collect();
    Array2::from_shape_vec(shape.as_tuple(), data).map_err(|e| CoreError::InvalidShape {
        expected: shape.to_string(),
        got: e.to_string(),
    })
}

/// Ensure `index < length`.
pub fn check_index(index: usize, length: usize) -> Result<()> {
    if index < length {
        Ok(())
    } else {
        Err(CoreError::IndexOutOfBounds { index, length })
    }
}
