use anyhow::{anyhow, bail};
use nalgebra::{Complex, DMatrix};
use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::utils::{to_array2, to_dmatrix};

fn schur(a: ArrayView2<f64>) -> anyhow::Result<nalgebra::Schur<f64, nalgebra::Dyn>> {
    if !a.is_square() {
        bail!("Eigendecomposition requires a square matrix, got {:?}", a.dim());
    }
    nalgebra::Schur::try_new(to_dmatrix(a), f64::EPSILON, 0)
        .ok_or_else(|| anyhow!("Schur decomposition failed to converge"))
}

/// All eigenvalues of a square matrix, including complex conjugate pairs.
pub fn complex_eigenvalues(a: ArrayView2<f64>) -> anyhow::Result<Vec<Complex<f64>>> {
    Ok(schur(a)?.complex_eigenvalues().iter().cloned().collect())
}

/// Real eigenpairs of a general square matrix.
///
/// Eigenvectors are stored as unit-length columns, each one signed so that its
/// largest-magnitude component is positive.
pub struct Eigen {
    eigenvalues: Array1<f64>,
    eigenvectors: Array2<f64>,
}

impl Eigen {
    pub fn compute(a: ArrayView2<f64>) -> anyhow::Result<Self> {
        let values = schur(a)?.eigenvalues().ok_or_else(|| {
            log::warn!("Matrix {:?} has complex eigenvalues", a.dim());
            anyhow!("Matrix has complex eigenvalues")
        })?;

        let n = a.nrows();
        let original = to_dmatrix(a);
        let mut eigenvectors = Array2::<f64>::zeros((n, n));

        for (k, &lambda) in values.iter().enumerate() {
            let shifted = &original - DMatrix::identity(n, n) * lambda;
            let v = smallest_right_singular_vector(shifted)?;
            eigenvectors.column_mut(k).assign(&v);
        }

        let eigenvalues = Array1::from_iter(values.iter().cloned());
        log::debug!("Eigenvalues: {}", eigenvalues);

        Ok(Eigen {
            eigenvalues,
            eigenvectors,
        })
    }

    pub fn eigenvalues(&self) -> &Array1<f64> {
        &self.eigenvalues
    }

    /// Eigenvectors as columns, aligned with [`Eigen::eigenvalues`].
    pub fn eigenvectors(&self) -> &Array2<f64> {
        &self.eigenvectors
    }
}

/// Unit vector spanning the (numerical) null space of a singular matrix.
fn smallest_right_singular_vector(m: DMatrix<f64>) -> anyhow::Result<Array1<f64>> {
    let svd = m
        .try_svd(false, true, f64::EPSILON, 0)
        .ok_or_else(|| anyhow!("SVD failed to converge"))?;
    let v_t = svd.v_t.ok_or_else(|| anyhow!("SVD did not produce V^T"))?;

    let (idx, _) = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .ok_or_else(|| anyhow!("Empty matrix has no eigenvectors"))?;

    let mut v = Array1::from_iter(v_t.row(idx).iter().cloned());
    let norm = v.dot(&v).sqrt();
    v /= norm;

    let dominant = v.iter().fold(0.0_f64, |acc, &x| if x.abs() > acc.abs() { x } else { acc });
    if dominant < 0.0 {
        v.mapv_inplace(|x| -x);
    }
    Ok(v)
}

/// Eigenpairs of a symmetric matrix, sorted by descending eigenvalue.
pub struct SymmetricEigen {
    eigenvalues: Array1<f64>,
    eigenvectors: Array2<f64>,
}

impl SymmetricEigen {
    pub fn compute(a: ArrayView2<f64>) -> anyhow::Result<Self> {
        if !a.is_square() {
            bail!("Eigendecomposition requires a square matrix, got {:?}", a.dim());
        }

        let eig = nalgebra::SymmetricEigen::try_new(to_dmatrix(a), f64::EPSILON, 0)
            .ok_or_else(|| anyhow!("Symmetric eigendecomposition failed to converge"))?;

        let mut order: Vec<usize> = (0..eig.eigenvalues.len()).collect();
        order.sort_by(|&i, &j| eig.eigenvalues[j].total_cmp(&eig.eigenvalues[i]));

        let eigenvalues = Array1::from_iter(order.iter().map(|&i| eig.eigenvalues[i]));
        let eigenvectors = to_array2(&eig.eigenvectors).select(Axis(1), &order);

        Ok(SymmetricEigen {
            eigenvalues,
            eigenvectors,
        })
    }

    pub fn eigenvalues(&self) -> &Array1<f64> {
        &self.eigenvalues
    }

    pub fn eigenvectors(&self) -> &Array2<f64> {
        &self.eigenvectors
    }
}
