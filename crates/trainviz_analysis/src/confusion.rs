//! Confusion matrix computation.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use trainviz_core::{CoreError, Result};

/// Confusion matrix for classification evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// The matrix values (row = true, col = pred).
    pub matrix: Vec<Vec<usize>>,
    /// Class value of each row/column, ascending.
    pub classes: Vec<usize>,
}

impl ConfusionMatrix {
    /// Create an all-zero matrix over the given classes.
    pub fn new(mut classes: Vec<usize>) -> Self {
        classes.sort_unstable();
        classes.dedup();
        let n = classes.len();
        Self {
            matrix: vec![vec![0; n]; n],
            classes,
        }
    }

    /// Number of rows (and columns).
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Add a prediction. Classes outside the matrix are ignored.
    pub fn add(&mut self, true_class: usize, pred_class: usize) {
        if let (Ok(t), Ok(p)) = (
            self.classes.binary_search(&true_class),
            self.classes.binary_search(&pred_class),
        ) {
            self.matrix[t][p] += 1;
        }
    }

    /// Total number of counted samples.
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Largest single cell count.
    pub fn max_count(&self) -> usize {
        self.matrix.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Get accuracy.
    pub fn accuracy(&self) -> f32 {
        let correct: usize = (0..self.n_classes()).map(|i| self.matrix[i][i]).sum();
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            correct as f32 / total as f32
        }
    }

    /// Counts as a float array, ready to be heat-mapped.
    pub fn to_array(&self) -> Array2<f32> {
        let n = self.n_classes();
        Array2::from_shape_fn((n, n), |(i, j)| self.matrix[i][j] as f32)
    }

    /// Get a text representation.
    pub fn to_string_table(&self) -> String {
        let mut s = String::new();

        // Header
        s.push_str("       ");
        for class in &self.classes {
            s.push_str(&format!("{:>8}", class));
        }
        s.push('\n');

        // Rows
        for (class, row) in self.classes.iter().zip(&self.matrix) {
            s.push_str(&format!("{:>6} ", class));
            for count in row {
                s.push_str(&format!("{:>8}", count));
            }
            s.push('\n');
        }

        s
    }
}

/// Compute a confusion matrix from true labels and predictions.
///
/// Rows and columns cover the sorted set of classes that appear in either
/// vector, so a class that never occurs gets no row.
///
/// # Errors
///
/// Returns [`CoreError::ShapeMismatch`] when the vectors differ in length.
pub fn confusion_matrix(labels: &[usize], predictions: &[usize]) -> Result<ConfusionMatrix> {
    if labels.len() != predictions.len() {
        return Err(CoreError::ShapeMismatch(format!(
            "{} labels vs {} predictions",
            labels.len(),
            predictions.len()
        )));
    }

    let classes: Vec<usize> = labels.iter().chain(predictions).copied().collect();
    let mut cm = ConfusionMatrix::new(classes);
    for (&target, &pred) in labels.iter().zip(predictions) {
        cm.add(target, pred);
    }
    Ok(cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusion_matrix() {
        let targets = vec![0, 1, 1, 1, 2, 0];
        let preds = vec![0, 0, 1, 1, 2, 2];

        let cm = confusion_matrix(&targets, &preds).unwrap();

        assert_eq!(cm.matrix[0][0], 1); // TP for class 0
        assert_eq!(cm.matrix[1][0], 1); // was 1, pred 0
        assert_eq!(cm.matrix[1][1], 2); // TP for class 1
        assert_eq!(cm.matrix[0][2], 1);
        assert_eq!(cm.total(), 6);
        assert_eq!(cm.max_count(), 2);
    }

    #[test]
    fn test_accuracy() {
        let cm = confusion_matrix(&[0, 1, 2], &[0, 1, 2]).unwrap();
        assert!((cm.accuracy() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_classes_are_observed_union() {
        let cm = confusion_matrix(&[5, 2, 5], &[2, 2, 9]).unwrap();

        assert_eq!(cm.classes, vec![2, 5, 9]);
        assert_eq!(cm.matrix[1][0], 1); // 5 -> 2
        assert_eq!(cm.matrix[1][2], 1); // 5 -> 9
        assert_eq!(cm.matrix[0][0], 1);
    }

    #[test]
    fn test_to_array() {
        let cm = confusion_matrix(&[0, 0, 1], &[0, 1, 1]).unwrap();
        let a = cm.to_array();
        assert_eq!(a.dim(), (2, 2));
        assert_eq!(a[[0, 1]], 1.0);
        assert_eq!(a[[1, 0]], 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(confusion_matrix(&[0, 1], &[0]).is_err());
    }

    #[test]
    fn test_string_table() {
        let cm = confusion_matrix(&[0, 1], &[0, 0]).unwrap();
        let table = cm.to_string_table();
        assert_eq!(table.lines().count(), 3);
    }
}
