use ndarray::{Array2, ArrayView2};

use crate::utils::{to_array2, to_dmatrix};

/// Householder QR factorization `A = Q R`.
///
/// For an `m x n` input, `Q` is `m x min(m, n)` with orthonormal columns and `R` is
/// `min(m, n) x n` upper triangular.
pub struct QR {
    q: Array2<f64>,
    r: Array2<f64>,
}

impl QR {
    pub fn compute(a: ArrayView2<f64>) -> Self {
        let qr = to_dmatrix(a).qr();
        let q = to_array2(&qr.q());
        let r = to_array2(&qr.r());
        log::debug!("QR factorization of {:?} matrix", a.dim());
        QR { q, r }
    }

    pub fn q(&self) -> &Array2<f64> {
        &self.q
    }

    pub fn r(&self) -> &Array2<f64> {
        &self.r
    }

    pub fn reconstruct(&self) -> Array2<f64> {
        self.q.dot(&self.r)
    }
}
