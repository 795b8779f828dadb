//! Cholesky factorization over packed storage.
//!
//! Factorization doubles as the positive-definiteness test for covariance
//! matrices: a matrix is accepted exactly when the factorization succeeds.
//! A failed factorization is an ordinary outcome and is reported as `None`.

use ndarray::Array2;

use super::packed::{packed_index, packed_len, PackedSymmetricMatrix};

/// A dense Cholesky routine working in place on a packed upper triangle.
///
/// This follows the LAPACK `dpptrf` contract: on success the buffer holds
/// the upper factor U with A = UᵀU (equivalently the lower factor L = Uᵀ
/// read row by row) and the routine returns 0. Any other return value is
/// the 1-based order of the first leading minor that is not positive
/// definite, and the buffer contents must be discarded.
pub trait PackedCholesky {
    fn factorize(&self, dim: usize, packed: &mut [f64]) -> usize;
}

/// Column-oriented packed factorization, as in `dpptrf` with `UPLO = 'U'`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCholesky;

impl PackedCholesky for NativeCholesky {
    fn factorize(&self, dim: usize, ap: &mut [f64]) -> usize {
        debug_assert_eq!(ap.len(), packed_len(dim));
        for j in 0..dim {
            let jc = packed_index(0, j);
            // Solve Uᵀ x = a(0..j, j) against the columns already factored.
            for i in 0..j {
                let ic = packed_index(0, i);
                let mut sum = ap[jc + i];
                for k in 0..i {
                    sum -= ap[ic + k] * ap[jc + k];
                }
                ap[jc + i] = sum / ap[ic + i];
            }
            let dot: f64 = ap[jc..jc + j].iter().map(|x| x * x).sum();
            let ajj = ap[jc + j] - dot;
            if !(ajj > 0.0) {
                ap[jc + j] = ajj;
                return j + 1;
            }
            ap[jc + j] = ajj.sqrt();
        }
        0
    }
}

/// Factorization delegated to `nalgebra`.
///
/// `nalgebra` does not say which minor failed, so failures report `dim`
/// (at least 1).
#[cfg(feature = "matrix")]
#[derive(Debug, Clone, Copy, Default)]
pub struct NalgebraCholesky;

#[cfg(feature = "matrix")]
impl PackedCholesky for NalgebraCholesky {
    fn factorize(&self, dim: usize, ap: &mut [f64]) -> usize {
        use super::packed::symmetric_index;
        use nalgebra::DMatrix;

        let full = DMatrix::from_fn(dim, dim, |r, c| ap[symmetric_index(r, c)]);
        match full.cholesky() {
            Some(chol) => {
                let l = chol.l();
                for j in 0..dim {
                    for i in 0..=j {
                        ap[packed_index(i, j)] = l[(j, i)];
                    }
                }
                0
            }
            None => dim.max(1),
        }
    }
}

/// Lower-triangular L with L·Lᵗ equal to the matrix it was computed from.
///
/// L(row, col) for col <= row is stored at `packed_index(col, row)`, the
/// same offsets as the upper triangle of the source matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CholeskyFactor {
    dim: usize,
    data: Vec<f64>,
}

impl CholeskyFactor {
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// L(row, col); zero above the diagonal.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.dim && col < self.dim);
        if col <= row {
            self.data[packed_index(col, row)]
        } else {
            0.0
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Computes L·g.
    pub fn transform(&self, g: &[f64]) -> Vec<f64> {
        assert_eq!(g.len(), self.dim, "vector length must match factor dimension");
        // Row j of L is contiguous in packed order.
        (0..self.dim)
            .map(|j| {
                let row = &self.data[packed_index(0, j)..=packed_index(j, j)];
                row.iter().zip(g).map(|(l, g_i)| l * g_i).sum()
            })
            .collect()
    }

    /// Rebuilds L·Lᵗ.
    pub fn reconstruct(&self) -> PackedSymmetricMatrix {
        let mut data = vec![0.0; self.data.len()];
        for j in 0..self.dim {
            for i in 0..=j {
                data[packed_index(i, j)] = (0..=i).map(|k| self.get(i, k) * self.get(j, k)).sum();
            }
        }
        PackedSymmetricMatrix::from_parts(self.dim, data)
    }

    /// L as a full lower-triangular matrix.
    pub fn to_full(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.dim, self.dim), |(r, c)| self.get(r, c))
    }
}

/// Factors `matrix` with the built-in routine.
pub fn cholesky_decomposition(matrix: &PackedSymmetricMatrix) -> Option<CholeskyFactor> {
    cholesky_decomposition_with(&NativeCholesky, matrix)
}

/// Factors a copy of `matrix` with `routine`, or returns `None` when it is
/// not positive definite.
pub fn cholesky_decomposition_with<C: PackedCholesky + ?Sized>(
    routine: &C,
    matrix: &PackedSymmetricMatrix,
) -> Option<CholeskyFactor> {
    let dim = matrix.dim();
    let mut data = matrix.as_slice().to_vec();
    let info = routine.factorize(dim, &mut data);
    if info != 0 {
        log::debug!(
            "cholesky: leading minor of order {} of {}x{} matrix is not positive definite",
            info,
            dim,
            dim
        );
        return None;
    }
    Some(CholeskyFactor { dim, data })
}
