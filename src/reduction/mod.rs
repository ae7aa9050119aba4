//! # Row Reduction
//!
//! Gauss-Jordan elimination and the subspaces that fall out of it: the reduced row
//! echelon form, pivot columns, rank, column space and null space of a matrix.

use anyhow::bail;
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Reduced row echelon form of a matrix together with its pivot columns.
#[derive(Debug, Clone)]
pub struct RowReduction {
    rref: Array2<f64>,
    pivots: Vec<usize>,
    tolerance: f64,
}

impl RowReduction {
    /// Reduces `a` with a tolerance scaled to its largest entry.
    pub fn new(a: ArrayView2<f64>) -> Self {
        let scale = a.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
        Self::with_tolerance(a, 1e-10 * scale)
    }

    /// Reduces `a`, treating entries with magnitude at or below `tolerance` as zero.
    pub fn with_tolerance(a: ArrayView2<f64>, tolerance: f64) -> Self {
        let (rows, cols) = a.dim();
        let mut m = a.to_owned();
        let mut pivots = Vec::new();
        let mut pivot_row = 0;

        for col in 0..cols {
            if pivot_row == rows {
                break;
            }

            // partial pivoting: largest magnitude at or below the current pivot row
            let (best, best_val) = (pivot_row..rows)
                .map(|r| (r, m[[r, col]].abs()))
                .fold((pivot_row, -1.0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });

            if best_val <= tolerance {
                for r in pivot_row..rows {
                    m[[r, col]] = 0.0;
                }
                continue;
            }

            if best != pivot_row {
                for c in 0..cols {
                    m.swap([best, c], [pivot_row, c]);
                }
            }

            let pivot = m[[pivot_row, col]];
            m.row_mut(pivot_row).mapv_inplace(|v| v / pivot);
            m[[pivot_row, col]] = 1.0;

            let pivot_vals = m.row(pivot_row).to_owned();
            for r in 0..rows {
                if r == pivot_row {
                    continue;
                }
                let factor = m[[r, col]];
                if factor != 0.0 {
                    m.row_mut(r).scaled_add(-factor, &pivot_vals);
                    m[[r, col]] = 0.0;
                }
            }

            pivots.push(col);
            pivot_row += 1;
        }

        // flush rounding noise left behind by elimination
        m.mapv_inplace(|v| if v.abs() <= tolerance { 0.0 } else { v });

        log::debug!("Row reduction found pivots {:?}", pivots);

        RowReduction {
            rref: m,
            pivots,
            tolerance,
        }
    }

    pub fn rref(&self) -> &Array2<f64> {
        &self.rref
    }

    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Columns that carry no pivot.
    pub fn free_columns(&self) -> Vec<usize> {
        (0..self.rref.ncols())
            .filter(|c| !self.pivots.contains(c))
            .collect()
    }

    /// Basis of the null space, one vector per free column.
    pub fn null_space(&self) -> Vec<Array1<f64>> {
        let cols = self.rref.ncols();
        self.free_columns()
            .into_iter()
            .map(|free| {
                let mut v = Array1::zeros(cols);
                v[free] = 1.0;
                for (row, &pivot) in self.pivots.iter().enumerate() {
                    v[pivot] = -self.rref[[row, free]];
                }
                v
            })
            .collect()
    }
}

/// Reduced row echelon form of `a`.
pub fn rref(a: ArrayView2<f64>) -> Array2<f64> {
    RowReduction::new(a).rref
}

/// Pivot columns of the original matrix, forming a basis of its column space.
pub fn column_space(a: ArrayView2<f64>) -> Vec<Array1<f64>> {
    RowReduction::new(a)
        .pivots()
        .iter()
        .map(|&c| a.column(c).to_owned())
        .collect()
}

pub fn null_space(a: ArrayView2<f64>) -> Vec<Array1<f64>> {
    RowReduction::new(a).null_space()
}

/// Basis and dimension of the span of a set of vectors.
#[derive(Debug, Clone)]
pub struct SpanBasis {
    basis: Vec<Array1<f64>>,
    pivots: Vec<usize>,
}

impl SpanBasis {
    pub fn from_vectors(vectors: &[Array1<f64>]) -> anyhow::Result<Self> {
        let Some(first) = vectors.first() else {
            bail!("Cannot compute the span of an empty set of vectors");
        };
        let len = first.len();
        if let Some(bad) = vectors.iter().position(|v| v.len() != len) {
            bail!(
                "Vector {} has length {} but expected {}",
                bad,
                vectors[bad].len(),
                len
            );
        }

        let views: Vec<_> = vectors.iter().map(|v| v.view().insert_axis(Axis(1))).collect();
        let matrix = ndarray::concatenate(Axis(1), &views)?;
        let reduction = RowReduction::new(matrix.view());
        let pivots = reduction.pivots().to_vec();
        let basis = pivots.iter().map(|&p| vectors[p].clone()).collect();

        Ok(SpanBasis { basis, pivots })
    }

    pub fn dimension(&self) -> usize {
        self.basis.len()
    }

    pub fn basis(&self) -> &[Array1<f64>] {
        &self.basis
    }

    /// Indices of the input vectors that were kept as basis vectors.
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }
}
