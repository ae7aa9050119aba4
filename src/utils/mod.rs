use anyhow::bail;
use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Axis selector for per-row or per-column operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ROW,
    COLUMN,
}

pub fn to_dmatrix(array: ArrayView2<f64>) -> DMatrix<f64> {
    let (rows, cols) = array.dim();
    DMatrix::from_fn(rows, cols, |i, j| array[[i, j]])
}

pub fn to_array2(matrix: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn(matrix.shape(), |(i, j)| matrix[(i, j)])
}

fn rng_from(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// Matrix of uniform samples in `[0, 1)`. Passing a seed makes the output reproducible.
pub fn random_matrix(rows: usize, cols: usize, seed: Option<u64>) -> Array2<f64> {
    let mut rng = rng_from(seed);
    Array2::from_shape_simple_fn((rows, cols), || rng.random::<f64>())
}

pub fn random_vector(len: usize, seed: Option<u64>) -> Array1<f64> {
    let mut rng = rng_from(seed);
    Array1::from_shape_simple_fn(len, || rng.random::<f64>())
}

/// Largest absolute elementwise difference between two equally shaped matrices.
pub fn max_abs_diff(a: ArrayView2<f64>, b: ArrayView2<f64>) -> anyhow::Result<f64> {
    if a.dim() != b.dim() {
        bail!(
            "Shape mismatch: {:?} cannot be compared with {:?}",
            a.dim(),
            b.dim()
        );
    }
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_matrix_conversion() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let m = to_dmatrix(a.view());
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m[(0, 2)], 3.0);

        let back = to_array2(&m);
        assert_eq!(back, a);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = random_matrix(10, 4, Some(42));
        let b = random_matrix(10, 4, Some(42));
        assert_eq!(a, b);
        assert_eq!(a.dim(), (10, 4));
        assert!(a.iter().all(|&v| (0.0..1.0).contains(&v)));

        let v = random_vector(5, Some(7));
        assert_eq!(v.len(), 5);
        assert_eq!(v, random_vector(5, Some(7)));
    }

    #[test]
    fn test_max_abs_diff() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[1.0, 2.5], [2.0, 4.0]];
        assert_eq!(max_abs_diff(a.view(), b.view()).unwrap(), 1.0);

        let c = array![[1.0, 2.0]];
        assert!(max_abs_diff(a.view(), c.view()).is_err());
    }
}
