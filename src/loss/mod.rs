use anyhow::bail;
use ndarray::{ArrayView1, LinalgScalar};
use num_traits::Float;

pub trait LossFunction {
    fn compute<T>(&self, u: ArrayView1<T>, v: ArrayView1<T>) -> anyhow::Result<T>
    where
        T: Float + LinalgScalar;
}

fn check_lengths<T>(u: &ArrayView1<T>, v: &ArrayView1<T>) -> anyhow::Result<()> {
    if u.len() != v.len() {
        bail!(
            "Shape mismatch: vectors have lengths {} and {}",
            u.len(),
            v.len()
        );
    }
    Ok(())
}

/// Sum of absolute elementwise differences.
pub struct L1Loss;

impl LossFunction for L1Loss {
    fn compute<T>(&self, u: ArrayView1<T>, v: ArrayView1<T>) -> anyhow::Result<T>
    where
        T: Float + LinalgScalar,
    {
        check_lengths(&u, &v)?;
        Ok((&u - &v).fold(T::zero(), |acc, d| acc + d.abs()))
    }
}

/// Sum of squared elementwise differences, taken as the dot product of `u - v` with itself.
pub struct L2Loss;

impl LossFunction for L2Loss {
    fn compute<T>(&self, u: ArrayView1<T>, v: ArrayView1<T>) -> anyhow::Result<T>
    where
        T: Float + LinalgScalar,
    {
        check_lengths(&u, &v)?;
        let diff = &u - &v;
        Ok(diff.dot(&diff))
    }
}

pub fn l1_loss(u: ArrayView1<f64>, v: ArrayView1<f64>) -> anyhow::Result<f64> {
    L1Loss.compute(u, v)
}

pub fn l2_loss(u: ArrayView1<f64>, v: ArrayView1<f64>) -> anyhow::Result<f64> {
    L2Loss.compute(u, v)
}
