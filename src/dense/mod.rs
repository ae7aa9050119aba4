use anyhow::{anyhow, bail};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use num_traits::Float;

use crate::utils::{to_array2, to_dmatrix, Direction};

pub trait Normalize<T: Float> {
    /// Scales every row (or column) so that it sums to `target`, given its current sum.
    fn normalize(&mut self, sums: &[T], target: T, direction: &Direction) -> anyhow::Result<()>;

    /// Scales every row (or column) to unit Euclidean length. Zero lanes are left untouched.
    fn normalize_l2(&mut self, direction: &Direction);
}

impl<T: Float> Normalize<T> for Array2<T> {
    fn normalize(&mut self, sums: &[T], target: T, direction: &Direction) -> anyhow::Result<()> {
        match direction {
            Direction::ROW => {
                if sums.len() != self.nrows() {
                    bail!(
                        "Length of sums ({}) does not match number of rows ({})",
                        sums.len(),
                        self.nrows()
                    );
                }

                for (i, row) in self.rows_mut().into_iter().enumerate() {
                    let scale = target / sums[i];
                    for val in row {
                        *val = *val * scale;
                    }
                }
            }
            Direction::COLUMN => {
                if sums.len() != self.ncols() {
                    bail!(
                        "Length of sums ({}) does not match number of columns ({})",
                        sums.len(),
                        self.ncols()
                    );
                }

                for (j, col) in self.columns_mut().into_iter().enumerate() {
                    let scale = target / sums[j];
                    for val in col {
                        *val = *val * scale;
                    }
                }
            }
        }
        Ok(())
    }

    fn normalize_l2(&mut self, direction: &Direction) {
        let lanes = match direction {
            Direction::ROW => self.rows_mut(),
            Direction::COLUMN => self.columns_mut(),
        };

        for (idx, mut lane) in lanes.into_iter().enumerate() {
            let norm = lane.iter().fold(T::zero(), |acc, &v| acc + v * v).sqrt();
            if norm <= T::epsilon() {
                log::warn!("Skipping normalization of zero-length {:?} {}", direction, idx);
                continue;
            }
            lane.mapv_inplace(|v| v / norm);
        }
    }
}

/// Inverse of a square, non-singular matrix.
pub fn inverse(a: ArrayView2<f64>) -> anyhow::Result<Array2<f64>> {
    if !a.is_square() {
        bail!("Cannot invert a non-square matrix of shape {:?}", a.dim());
    }
    let inv = to_dmatrix(a)
        .try_inverse()
        .ok_or_else(|| anyhow!("Matrix is singular and cannot be inverted"))?;
    Ok(to_array2(&inv))
}

/// Solves `A x = b` by applying the inverse of `A` to `b`. `b` may hold several right-hand sides.
pub fn solve_with_inverse(a: ArrayView2<f64>, b: ArrayView2<f64>) -> anyhow::Result<Array2<f64>> {
    if a.ncols() != b.nrows() {
        bail!(
            "Dimension mismatch: matrix has {} columns but right-hand side has {} rows",
            a.ncols(),
            b.nrows()
        );
    }
    let inv = inverse(a)?;
    let x = inv.dot(&b);
    log::debug!("Solved linear system, solution:\n{}", x);
    Ok(x)
}

/// Maps coordinates expressed in `basis` (one basis vector per column) to standard coordinates.
pub fn to_standard(basis: ArrayView2<f64>, coords: ArrayView1<f64>) -> anyhow::Result<Array1<f64>> {
    if basis.ncols() != coords.len() {
        bail!(
            "Dimension mismatch: basis has {} vectors but coordinates have {} entries",
            basis.ncols(),
            coords.len()
        );
    }
    Ok(basis.dot(&coords))
}

/// Expresses the standard-coordinate vector `x` in terms of `basis`.
pub fn to_basis(basis: ArrayView2<f64>, x: ArrayView1<f64>) -> anyhow::Result<Array1<f64>> {
    if basis.nrows() != x.len() {
        bail!(
            "Dimension mismatch: basis vectors have {} entries but vector has {}",
            basis.nrows(),
            x.len()
        );
    }
    let inv = inverse(basis)?;
    Ok(inv.dot(&x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    #[test]
    fn test_normalize() {
        let mut arr = array![[1.0, 2.0], [3.0, 4.0]];
        let row_sums = vec![3.0, 7.0];
        let target = 1.0;

        arr.normalize(&row_sums, target, &Direction::ROW).unwrap();

        assert_relative_eq!(arr.row(0).sum(), target);
        assert_relative_eq!(arr.row(1).sum(), target);
        assert_relative_eq!(arr[[0, 0]], 1.0 / 3.0);
        assert_relative_eq!(arr[[1, 1]], 4.0 / 7.0);

        let mut arr = array![[1.0, 2.0], [3.0, 4.0]];
        let col_sums = vec![4.0, 6.0];

        arr.normalize(&col_sums, target, &Direction::COLUMN).unwrap();

        assert_relative_eq!(arr.column(0).sum(), target);
        assert_relative_eq!(arr.column(1).sum(), target);
        assert_relative_eq!(arr[[1, 0]], 3.0 / 4.0);
        assert_relative_eq!(arr[[0, 1]], 2.0 / 6.0);
    }

    #[test]
    fn test_normalize_errors() {
        let mut arr = Array2::<f64>::zeros((2, 2));

        assert!(arr.normalize(&[1.0], 1.0, &Direction::ROW).is_err());
        assert!(arr.normalize(&[1.0], 1.0, &Direction::COLUMN).is_err());
    }

    #[test]
    fn test_normalize_l2_columns() {
        let mut arr = array![[3.0, 0.0, 1.0], [4.0, 0.0, 1.0]];
        arr.normalize_l2(&Direction::COLUMN);

        assert_relative_eq!(arr[[0, 0]], 0.6);
        assert_relative_eq!(arr[[1, 0]], 0.8);
        // zero column stays zero
        assert_eq!(arr[[0, 1]], 0.0);
        assert_relative_eq!(arr[[0, 2]], 1.0 / 2.0_f64.sqrt());

        let mut rows = array![[3.0, 4.0], [0.0, 2.0]];
        rows.normalize_l2(&Direction::ROW);
        assert_relative_eq!(rows[[0, 1]], 0.8);
        assert_relative_eq!(rows[[1, 1]], 1.0);
    }

    #[test]
    fn test_solve_linear_system() {
        let a = array![[3.0, 8.0, -5.0], [3.0, -6.0, -7.0], [3.0, 4.0, 2.0]];
        let b = array![[-1.0], [-1.0], [3.0]];

        let x = solve_with_inverse(a.view(), b.view()).unwrap();
        assert_relative_eq!(x[[0, 0]], 119.0 / 159.0, epsilon = 1e-12);
        assert_relative_eq!(x[[1, 0]], -4.0 / 53.0, epsilon = 1e-12);
        assert_relative_eq!(x[[2, 0]], 28.0 / 53.0, epsilon = 1e-12);

        let reconstructed = a.dot(&x);
        for (r, e) in reconstructed.iter().zip(b.iter()) {
            assert!((r - e).abs() < 1e-9);
        }
    }

    #[test]
    fn test_inverse_errors() {
        let singular = array![[1.0, 2.0], [2.0, 4.0]];
        assert!(inverse(singular.view()).is_err());

        let rect = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert!(inverse(rect.view()).is_err());

        let a = array![[2.0, 0.0], [0.0, 4.0]];
        let b = array![[1.0], [2.0], [3.0]];
        assert!(solve_with_inverse(a.view(), b.view()).is_err());
    }

    #[test]
    fn test_basis_to_standard() {
        let basis = array![[0.0, -4.0, 6.0], [-1.0, 0.0, 6.0], [-1.0, 0.0, 3.0]];
        let coords = array![-2.0, 6.0, 1.0];

        let x = to_standard(basis.view(), coords.view()).unwrap();
        assert_eq!(x, array![-18.0, 8.0, 5.0]);

        let back = to_basis(basis.view(), x.view()).unwrap();
        for (b, c) in back.iter().zip(coords.iter()) {
            assert_relative_eq!(*b, *c, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_basis_shape_mismatch() {
        let basis = array![[1.0, 0.0], [0.0, 1.0]];
        let coords = array![1.0, 2.0, 3.0];
        assert!(to_standard(basis.view(), coords.view()).is_err());
        assert!(to_basis(basis.view(), coords.view()).is_err());
    }
}
