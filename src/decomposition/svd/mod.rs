use anyhow::anyhow;
use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::utils::{to_array2, to_dmatrix};

/// Thin singular value decomposition `X = U diag(s) Vt`, singular values in descending order.
pub struct SVD {
    u: Option<Array2<f64>>,
    s: Option<Array1<f64>>,
    vt: Option<Array2<f64>>,
}

impl SVD {
    pub fn new() -> Self {
        SVD {
            u: None,
            s: None,
            vt: None,
        }
    }

    pub fn compute(&mut self, x: ArrayView2<f64>) -> anyhow::Result<()> {
        let matrix = to_dmatrix(x);

        let svd = matrix
            .try_svd(true, true, f64::EPSILON, 0)
            .ok_or_else(|| anyhow!("SVD failed to converge"))?;

        let u = svd.u.as_ref().ok_or_else(|| anyhow!("SVD did not produce U"))?;
        let vt = svd
            .v_t
            .as_ref()
            .ok_or_else(|| anyhow!("SVD did not produce V^T"))?;

        let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
        order.sort_by(|&a, &b| svd.singular_values[b].total_cmp(&svd.singular_values[a]));

        let s = Array1::from_iter(order.iter().map(|&i| svd.singular_values[i]));
        let u = to_array2(u).select(Axis(1), &order);
        let vt = to_array2(vt).select(Axis(0), &order);

        log::debug!("Singular values: {}", s);

        self.u = Some(u);
        self.s = Some(s);
        self.vt = Some(vt);

        Ok(())
    }

    pub fn u(&self) -> Option<&Array2<f64>> {
        self.u.as_ref()
    }

    pub fn s(&self) -> Option<&Array1<f64>> {
        self.s.as_ref()
    }

    pub fn vt(&self) -> Option<&Array2<f64>> {
        self.vt.as_ref()
    }

    // Reconstruct the original matrix
    pub fn reconstruct(&self) -> Option<Array2<f64>> {
        match (self.u(), self.s(), self.vt()) {
            (Some(u), Some(s), Some(vt)) => {
                let s_diag = Array2::from_diag(s);
                Some(u.dot(&s_diag).dot(vt))
            }
            _ => None,
        }
    }
}

impl Default for SVD {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;
    use crate::utils::{max_abs_diff, random_matrix};

    #[test]
    fn test_simple_svd() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let mut svd = SVD::new();
        svd.compute(a.view()).unwrap();
        let s = svd.s().unwrap();
        let vt = svd.vt().unwrap();
        let u = svd.u().unwrap();

        assert_eq!(u.shape(), &[2, 2]);
        assert_eq!(s.len(), 2);
        assert_eq!(vt.shape(), &[2, 2]);

        assert_abs_diff_eq!(s[0], 5.4649857, epsilon = 1e-6);
        assert_abs_diff_eq!(s[1], 0.3659662, epsilon = 1e-6);

        let reconstructed = svd.reconstruct().unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert_abs_diff_eq!(reconstructed[[i, j]], a[[i, j]], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_thin_svd_shapes_and_order() {
        let x = random_matrix(7, 4, Some(5));
        let mut svd = SVD::default();
        svd.compute(x.view()).unwrap();

        assert_eq!(svd.u().unwrap().dim(), (7, 4));
        assert_eq!(svd.vt().unwrap().dim(), (4, 4));

        let s = svd.s().unwrap();
        assert!(s.windows(2).into_iter().all(|w| w[0] >= w[1]));
        assert!(s.iter().all(|&v| v >= 0.0));

        let reconstructed = svd.reconstruct().unwrap();
        assert!(max_abs_diff(reconstructed.view(), x.view()).unwrap() < 1e-9);
    }

    #[test]
    fn test_reconstruct_before_compute() {
        assert!(SVD::new().reconstruct().is_none());
    }
}
