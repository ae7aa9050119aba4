//! # Gram Matrix Projection
//!
//! Relates the eigenvectors of `XᵀX` to the singular vectors of `X`. Projecting `X` onto
//! the eigenvectors of its Gram matrix and normalizing each column yields the left
//! singular vectors of `X`, up to the sign of each column.

use anyhow::bail;
use ndarray::{Array1, Array2, ArrayView2};

use crate::decomposition::{SymmetricEigen, SVD};
use crate::dense::Normalize;
use crate::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSign {
    Same,
    Flipped,
    Different,
}

/// Compares two matrices column by column, allowing each column to differ by a sign flip.
pub fn sign_alignment(
    a: ArrayView2<f64>,
    b: ArrayView2<f64>,
    tolerance: f64,
) -> anyhow::Result<Vec<ColumnSign>> {
    if a.dim() != b.dim() {
        bail!(
            "Shape mismatch: {:?} cannot be aligned with {:?}",
            a.dim(),
            b.dim()
        );
    }

    let signs = a
        .columns()
        .into_iter()
        .zip(b.columns())
        .map(|(ca, cb)| {
            let same = ca.iter().zip(cb.iter()).all(|(x, y)| (x - y).abs() <= tolerance);
            let flipped = ca.iter().zip(cb.iter()).all(|(x, y)| (x + y).abs() <= tolerance);
            match (same, flipped) {
                (true, _) => ColumnSign::Same,
                (false, true) => ColumnSign::Flipped,
                _ => ColumnSign::Different,
            }
        })
        .collect();
    Ok(signs)
}

pub struct GramProjection {
    eigenvalues: Array1<f64>,
    eigenvectors: Array2<f64>,
    projected: Array2<f64>,
    projected_normalized: Array2<f64>,
    svd: SVD,
}

impl GramProjection {
    pub fn compute(x: ArrayView2<f64>) -> anyhow::Result<Self> {
        let gram = x.t().dot(&x);
        let eig = SymmetricEigen::compute(gram.view())?;

        let projected = x.dot(eig.eigenvectors());
        let mut projected_normalized = projected.clone();
        projected_normalized.normalize_l2(&Direction::COLUMN);

        let mut svd = SVD::new();
        svd.compute(x)?;

        Ok(GramProjection {
            eigenvalues: eig.eigenvalues().clone(),
            eigenvectors: eig.eigenvectors().clone(),
            projected,
            projected_normalized,
            svd,
        })
    }

    /// Eigenvalues of `XᵀX`, descending.
    pub fn eigenvalues(&self) -> &Array1<f64> {
        &self.eigenvalues
    }

    pub fn eigenvectors(&self) -> &Array2<f64> {
        &self.eigenvectors
    }

    /// `X` projected onto the eigenvectors of `XᵀX`.
    pub fn projected(&self) -> &Array2<f64> {
        &self.projected
    }

    pub fn projected_normalized(&self) -> &Array2<f64> {
        &self.projected_normalized
    }

    pub fn svd(&self) -> &SVD {
        &self.svd
    }

    /// Per-column relation between the normalized projection and the left singular vectors.
    pub fn alignment(&self, tolerance: f64) -> anyhow::Result<Vec<ColumnSign>> {
        let Some(u) = self.svd.u() else {
            bail!("SVD has not been computed");
        };
        let k = u.ncols().min(self.projected_normalized.ncols());
        sign_alignment(
            self.projected_normalized.slice(ndarray::s![.., ..k]),
            u.slice(ndarray::s![.., ..k]),
            tolerance,
        )
    }
}
