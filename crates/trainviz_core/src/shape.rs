//! Image shape metadata.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Height and width of a single 2D image.
///
/// Flattened images of length `height * width` are reshaped row-major into
/// this shape before rendering.
///
/// # Example
///
/// ```rust
/// use trainviz_core::ImageShape;
///
/// let shape = ImageShape::new(28, 28);
/// assert_eq!(shape.numel(), 784);
/// assert_eq!(shape, ImageShape::MNIST);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageShape {
    height: usize,
    width: usize,
}

impl ImageShape {
    /// 28x28 grayscale digits, the shape most of these helpers were first used with.
    pub const MNIST: Self = Self::new(28, 28);

    /// Create a new shape.
    #[must_use]
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Create an ImageShape from a slice of dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice doesn't contain exactly 2 elements.
    ///
    /// ```rust
    /// use trainviz_core::ImageShape;
    ///
    /// let shape = ImageShape::from_dims(&[32, 32]).unwrap();
    /// assert_eq!(shape.height(), 32);
    /// assert!(ImageShape::from_dims(&[32, 32, 3]).is_err());
    /// ```
    pub fn from_dims(dims: &[usize]) -> Result<Self> {
        if dims.len() != 2 {
            return Err(CoreError::DimensionError {
                expected: 2,
                got: dims.len(),
            });
        }
        Ok(Self::new(dims[0], dims[1]))
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of pixels.
    #[must_use]
    pub const fn numel(&self) -> usize {
        self.height * self.width
    }

    /// Check if either dimension is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Convert to a tuple.
    #[must_use]
    pub const fn as_tuple(&self) -> (usize, usize) {
        (self.height, self.width)
    }
}

impl Default for ImageShape {
    fn default() -> Self {
        Self::MNIST
    }
}

impl std::fmt::Display for ImageShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

impl std::str::FromStr for ImageShape {
    type Err = CoreError;

    /// Parse `"HxW"`, e.g. `"28x28"`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidShape {
            expected: "HEIGHTxWIDTH".to_string(),
            got: s.to_string(),
        };
        let (h, w) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(height, width))
    }
}

impl From<(usize, usize)> for ImageShape {
    fn from((height, width): (usize, usize)) -> Self {
        Self::new(height, width)
    }
}

impl From<[usize; 2]> for ImageShape {
    fn from([height, width]: [usize; 2]) -> Self {
        Self::new(height, width)
    }
}
