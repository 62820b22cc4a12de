//! Reading `.npy` inputs.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use ndarray::{Array, Array1, Dimension};
use ndarray_npy::ReadNpyExt;

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Read a float array of dimension `D`, accepting `f32` or `f64` files.
pub fn read_floats<D: Dimension>(path: &Path) -> Result<Array<f32, D>> {
    match Array::<f32, D>::read_npy(open(path)?) {
        Ok(arr) => Ok(arr),
        Err(e) => {
            // Try reading as f64 and converting
            let arr = Array::<f64, D>::read_npy(open(path)?)
                .with_context(|| format!("Failed to read float array from {}: {}", path.display(), e))?;
            Ok(arr.mapv(|x| x as f32))
        }
    }
}

/// Read a 1D vector of class labels stored as `i64`, `i32` or `u8`.
pub fn read_labels(path: &Path) -> Result<Vec<usize>> {
    let values: Vec<i64> = if let Ok(arr) = Array1::<i64>::read_npy(open(path)?) {
        arr.to_vec()
    } else if let Ok(arr) = Array1::<i32>::read_npy(open(path)?) {
        arr.iter().map(|&v| i64::from(v)).collect()
    } else {
        Array1::<u8>::read_npy(open(path)?)
            .with_context(|| format!("Failed to read integer labels from {}", path.display()))?
            .iter()
            .map(|&v| i64::from(v))
            .collect()
    };

    values
        .into_iter()
        .map(|v| usize::try_from(v).with_context(|| format!("Negative class label {} in {}", v, path.display())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2, Ix2};
    use ndarray_npy::WriteNpyExt;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("trainviz_cli_{}_{}.npy", name, std::process::id()))
    }

    fn write<T: WriteNpyExt>(arr: &T, path: &Path) {
        let file = File::create(path).unwrap();
        arr.write_npy(file).unwrap();
    }

    #[test]
    fn test_read_f64_floats() {
        let path = temp_path("floats");
        let data: Array2<f64> = array![[0.5, 1.0], [2.0, -1.0]];
        write(&data, &path);

        let arr = read_floats::<Ix2>(&path).unwrap();
        assert_eq!(arr, array![[0.5f32, 1.0], [2.0, -1.0]]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_read_labels() {
        let path = temp_path("labels");
        write(&array![3i64, 0, 7], &path);
        assert_eq!(read_labels(&path).unwrap(), vec![3, 0, 7]);

        write(&array![1i32, -2], &path);
        assert!(read_labels(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        assert!(read_labels(Path::new("/nonexistent/labels.npy")).is_err());
    }
}
