//! Grid layouts for panel figures.

use serde::{Deserialize, Serialize};
use trainviz_core::{ceil_sqrt, CoreError, Result};

/// A `rows x cols` arrangement of panels, filled row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    rows: usize,
    cols: usize,
}

impl GridLayout {
    /// A grid with an explicit size.
    #[must_use]
    pub const fn fixed(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Square grid just large enough for `count` panels:
    /// `rows = cols = ceil(sqrt(count))`.
    ///
    /// ```rust
    /// use trainviz_plot::GridLayout;
    ///
    /// assert_eq!(GridLayout::square(16).unwrap(), GridLayout::fixed(4, 4));
    /// assert_eq!(GridLayout::square(10).unwrap(), GridLayout::fixed(4, 4));
    /// ```
    pub fn square(count: usize) -> Result<Self> {
        let side = Self::side(count)?;
        Ok(Self::fixed(side, side))
    }

    /// `ceil(sqrt(count))` rows and only as many columns as needed:
    /// `cols = ceil(count / rows)`.
    ///
    /// ```rust
    /// use trainviz_plot::GridLayout;
    ///
    /// assert_eq!(GridLayout::packed(9).unwrap(), GridLayout::fixed(3, 3));
    /// assert_eq!(GridLayout::packed(10).unwrap(), GridLayout::fixed(4, 3));
    /// ```
    pub fn packed(count: usize) -> Result<Self> {
        let rows = Self::side(count)?;
        let cols = count.div_ceil(rows);
        Ok(Self::fixed(rows, cols))
    }

    fn side(count: usize) -> Result<usize> {
        if count == 0 {
            return Err(CoreError::EmptyInput("no panels to lay out".to_string()));
        }
        Ok(ceil_sqrt(count))
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub const fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether `count` panels fit.
    pub const fn covers(&self, count: usize) -> bool {
        self.cells() >= count
    }

    /// `(row, col)` of the panel at `index`.
    pub const fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
}

impl std::fmt::Display for GridLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        assert_eq!(GridLayout::square(1).unwrap(), GridLayout::fixed(1, 1));
        assert_eq!(GridLayout::square(5).unwrap(), GridLayout::fixed(3, 3));
        assert_eq!(GridLayout::square(16).unwrap(), GridLayout::fixed(4, 4));
        assert_eq!(GridLayout::square(17).unwrap(), GridLayout::fixed(5, 5));
    }

    #[test]
    fn test_packed() {
        assert_eq!(GridLayout::packed(2).unwrap(), GridLayout::fixed(2, 1));
        assert_eq!(GridLayout::packed(9).unwrap(), GridLayout::fixed(3, 3));
        assert_eq!(GridLayout::packed(12).unwrap(), GridLayout::fixed(4, 3));
    }

    #[test]
    fn test_grid_always_covers() {
        for n in 1..200 {
            let square = GridLayout::square(n).unwrap();
            let packed = GridLayout::packed(n).unwrap();
            assert!(square.covers(n), "square grid too small for {n}");
            assert!(packed.covers(n), "packed grid too small for {n}");
            assert_eq!(square.rows(), ceil_sqrt(n));
            assert_eq!(packed.rows(), ceil_sqrt(n));
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(GridLayout::square(0), Err(CoreError::EmptyInput(_))));
        assert!(matches!(GridLayout::packed(0), Err(CoreError::EmptyInput(_))));
    }

    #[test]
    fn test_position() {
        let grid = GridLayout::fixed(3, 4);
        assert_eq!(grid.position(0), (0, 0));
        assert_eq!(grid.position(5), (1, 1));
        assert_eq!(grid.position(11), (2, 3));
        assert_eq!(grid.to_string(), "3x4");
    }
}
