// Based on https://medium.com/@gshriya195/top-5-distance-similarity-measures-implementation-in-machine-learning-1f68b9ecb0a3
use anyhow::bail;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use num_traits::Float;
use rayon::prelude::*;

pub trait SimilarityMeasure {
    fn calculate<T>(&self, a: ArrayView1<T>, b: ArrayView1<T>) -> T
    where
        T: Float;
}

/// `1 - cosine_distance`, i.e. the cosine of the angle between two vectors.
pub struct CosineSimilarity;

impl SimilarityMeasure for CosineSimilarity {
    fn calculate<T>(&self, a: ArrayView1<T>, b: ArrayView1<T>) -> T
    where
        T: Float,
    {
        let mut dot_product = T::zero();
        let mut norm_a = T::zero();
        let mut norm_b = T::zero();

        for (&x, &y) in a.iter().zip(b.iter()) {
            dot_product = dot_product + x * y;
            norm_a = norm_a + x * x;
            norm_b = norm_b + y * y;
        }

        let norm_product = (norm_a * norm_b).sqrt();
        if norm_product > T::epsilon() {
            (dot_product / norm_product).max(-T::one()).min(T::one())
        } else {
            T::zero()
        }
    }
}

/// Pairwise similarity of the rows of `vectors`, computed row by row in parallel.
pub fn similarity_matrix<T, M>(vectors: ArrayView2<T>, measure: &M) -> Array2<T>
where
    T: Float + Send + Sync,
    M: SimilarityMeasure + Sync,
{
    let n = vectors.nrows();
    let mut result = Array2::zeros((n, n));

    result
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, mut row)| {
            let a = vectors.row(i);
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = measure.calculate(a, vectors.row(j));
            }
        });

    log::debug!("Computed {}x{} similarity matrix", n, n);
    result
}

/// Cosine similarity of every ordered pair of rows.
pub fn cosine_similarity_matrix(vectors: ArrayView2<f64>) -> anyhow::Result<Array2<f64>> {
    if vectors.ncols() == 0 {
        bail!("Vectors must have at least one component");
    }
    Ok(similarity_matrix(vectors, &CosineSimilarity))
}
