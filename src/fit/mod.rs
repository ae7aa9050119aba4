//! # Curve Fitting
//!
//! Least-squares solvers and the linear and polynomial regressions built on top of them.
//! Polynomial coefficients are stored highest power first.

use anyhow::{anyhow, bail};
use nalgebra::DVector;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::utils::to_dmatrix;

/// Result of a least-squares solve `min ||A x - b||`.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub solution: Array1<f64>,
    pub residual_sum_of_squares: f64,
    pub rank: usize,
    pub singular_values: Array1<f64>,
}

/// Minimum-norm least-squares solution of `A x = b`.
///
/// Singular values at or below `rcond * max(s)` are treated as zero. With `rcond = None`
/// the cutoff defaults to machine epsilon times the largest dimension of `A`.
pub fn least_squares(
    a: ArrayView2<f64>,
    b: ArrayView1<f64>,
    rcond: Option<f64>,
) -> anyhow::Result<LeastSquares> {
    let (m, n) = a.dim();
    if m != b.len() {
        bail!(
            "Dimension mismatch: design matrix has {} rows but targets have {} entries",
            m,
            b.len()
        );
    }
    if m == 0 || n == 0 {
        bail!("Cannot solve a least-squares problem with an empty design matrix");
    }

    let matrix = to_dmatrix(a);
    let rhs = DVector::from_iterator(m, b.iter().cloned());

    let svd = matrix
        .clone()
        .try_svd(true, true, f64::EPSILON, 0)
        .ok_or_else(|| anyhow!("SVD failed to converge"))?;

    let rcond = rcond.unwrap_or(f64::EPSILON * m.max(n) as f64);
    let max_sv = svd.singular_values.max();
    let cutoff = rcond * max_sv;
    let rank = svd.singular_values.iter().filter(|&&s| s > cutoff).count();

    let x = svd.solve(&rhs, cutoff).map_err(anyhow::Error::msg)?;
    let residual = &matrix * &x - &rhs;

    let mut singular_values: Vec<f64> = svd.singular_values.iter().cloned().collect();
    singular_values.sort_by(|a, b| b.total_cmp(a));

    if rank < n {
        log::warn!("Design matrix is rank deficient ({} < {})", rank, n);
    }

    Ok(LeastSquares {
        solution: Array1::from_iter(x.iter().cloned()),
        residual_sum_of_squares: residual.norm_squared(),
        rank,
        singular_values: Array1::from(singular_values),
    })
}

fn check_samples(x: &ArrayView1<f64>, y: &ArrayView1<f64>, needed: usize) -> anyhow::Result<()> {
    if x.len() != y.len() {
        bail!(
            "Sample count mismatch: {} x-values but {} y-values",
            x.len(),
            y.len()
        );
    }
    if x.len() < needed {
        bail!("At least {} samples are required, got {}", needed, x.len());
    }
    Ok(())
}

/// Straight line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn fit(x: ArrayView1<f64>, y: ArrayView1<f64>) -> anyhow::Result<Self> {
        check_samples(&x, &y, 2)?;

        // design matrix [x, 1]
        let mut design = Array2::<f64>::ones((x.len(), 2));
        design.column_mut(0).assign(&x);

        let lstsq = least_squares(design.view(), y, None)?;
        let fit = LinearFit {
            slope: lstsq.solution[0],
            intercept: lstsq.solution[1],
        };
        log::debug!("Linear fit: {:?}", fit);
        Ok(fit)
    }

    pub fn evaluate(&self, x: ArrayView1<f64>) -> Array1<f64> {
        x.mapv(|v| self.slope * v + self.intercept)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Array1<f64>,
}

impl Polynomial {
    /// Wraps coefficients given highest power first.
    pub fn new(coefficients: Array1<f64>) -> Self {
        Polynomial { coefficients }
    }

    /// Least-squares polynomial regression of the given degree.
    pub fn fit(x: ArrayView1<f64>, y: ArrayView1<f64>, degree: usize) -> anyhow::Result<Self> {
        check_samples(&x, &y, degree + 1)?;

        let vandermonde =
            Array2::from_shape_fn((x.len(), degree + 1), |(i, j)| x[i].powi((degree - j) as i32));
        let lstsq = least_squares(vandermonde.view(), y, None)?;
        log::debug!(
            "Degree {} polynomial fit, residual sum of squares {:.6}",
            degree,
            lstsq.residual_sum_of_squares
        );

        Ok(Polynomial {
            coefficients: lstsq.solution,
        })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    pub fn evaluate_at(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    pub fn evaluate(&self, x: ArrayView1<f64>) -> Array1<f64> {
        x.mapv(|v| self.evaluate_at(v))
    }
}

pub struct CurveFitBuilder {
    degrees: Vec<usize>,
    linear: bool,
}

impl CurveFitBuilder {
    pub fn new() -> Self {
        CurveFitBuilder {
            degrees: vec![2, 3, 4],
            linear: true,
        }
    }

    pub fn degrees(mut self, degrees: impl IntoIterator<Item = usize>) -> Self {
        self.degrees = degrees.into_iter().collect();
        self
    }

    pub fn linear(mut self, linear: bool) -> Self {
        self.linear = linear;
        self
    }

    pub fn fit(self, x: ArrayView1<f64>, y: ArrayView1<f64>) -> anyhow::Result<CurveFit> {
        let linear = if self.linear {
            Some(LinearFit::fit(x, y)?)
        } else {
            None
        };

        let polynomials = self
            .degrees
            .iter()
            .map(|&degree| Polynomial::fit(x, y, degree))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(CurveFit {
            linear,
            polynomials,
        })
    }
}

impl Default for CurveFitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The set of models fitted to one dataset.
pub struct CurveFit {
    linear: Option<LinearFit>,
    polynomials: Vec<Polynomial>,
}

impl CurveFit {
    pub fn linear(&self) -> Option<&LinearFit> {
        self.linear.as_ref()
    }

    pub fn polynomials(&self) -> &[Polynomial] {
        &self.polynomials
    }

    /// Every fitted model evaluated over `x`, labelled for display.
    pub fn curves(&self, x: ArrayView1<f64>) -> Vec<(String, Array1<f64>)> {
        let mut curves = Vec::with_capacity(self.polynomials.len() + 1);
        if let Some(linear) = &self.linear {
            curves.push(("Fitted line".to_string(), linear.evaluate(x)));
        }
        for poly in &self.polynomials {
            curves.push((format!("Degree {} fit", poly.degree()), poly.evaluate(x)));
        }
        curves
    }
}
