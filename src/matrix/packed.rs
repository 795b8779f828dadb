//! Packed storage for symmetric matrices.
//!
//! Only the upper triangle of an n×n symmetric matrix is kept, column by
//! column: element (i, j) with i <= j lives at offset `i + j*(j+1)/2`.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{FitMinError, Result};

/// Relative tolerance used when checking that a full matrix is symmetric.
const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Number of stored elements for an n×n symmetric matrix.
pub fn packed_len(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Packed offset of element (i, j), for i <= j.
pub fn packed_index(i: usize, j: usize) -> usize {
    debug_assert!(i <= j, "packed_index requires i <= j, got ({}, {})", i, j);
    i + j * (j + 1) / 2
}

/// Packed offset of element (i, j) of a symmetric matrix, in either order.
pub fn symmetric_index(i: usize, j: usize) -> usize {
    if i <= j {
        packed_index(i, j)
    } else {
        packed_index(j, i)
    }
}

/// Recovers n from a packed length of n(n+1)/2.
pub fn dimension_from_packed_len(len: usize) -> Result<usize> {
    let estimate = ((((8 * len + 1) as f64).sqrt() - 1.0) / 2.0).floor() as usize;
    // Guard against rounding in the square root for very large lengths.
    for n in estimate.saturating_sub(1)..=estimate + 1 {
        if packed_len(n) == len {
            return Ok(n);
        }
    }
    Err(FitMinError::InvalidPackedLength(len))
}

/// A symmetric matrix stored as its packed upper triangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PackedSymmetricMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl PackedSymmetricMatrix {
    /// Wraps packed data, inferring the dimension from its length.
    pub fn from_packed(data: Vec<f64>) -> Result<Self> {
        let dim = dimension_from_packed_len(data.len())?;
        Ok(Self { dim, data })
    }

    /// Wraps packed data that must describe a `dim`×`dim` matrix.
    pub fn with_dimension(dim: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != packed_len(dim) {
            return Err(FitMinError::DimensionMismatch(format!(
                "packed {}x{} matrix needs {} elements, got {}",
                dim,
                dim,
                packed_len(dim),
                data.len()
            )));
        }
        Ok(Self { dim, data })
    }

    pub(crate) fn from_parts(dim: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), packed_len(dim));
        Self { dim, data }
    }

    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![0.0; packed_len(dim)],
        }
    }

    pub fn identity(dim: usize) -> Self {
        let mut matrix = Self::zeros(dim);
        for i in 0..dim {
            matrix.data[packed_index(i, i)] = 1.0;
        }
        matrix
    }

    /// Diagonal matrix with the squares of `errors` on the diagonal.
    ///
    /// Squares overflow to infinity for |e| above about 1.3e154; such an
    /// entry still factorizes, and the derived error is then infinite.
    pub fn from_errors(errors: &[f64]) -> Self {
        let mut matrix = Self::zeros(errors.len());
        for (i, error) in errors.iter().enumerate() {
            matrix.data[packed_index(i, i)] = error * error;
        }
        matrix
    }

    /// Packs a full square matrix, which must be symmetric.
    pub fn from_full(full: &Array2<f64>) -> Result<Self> {
        let (rows, cols) = full.dim();
        if rows != cols {
            return Err(FitMinError::DimensionMismatch(format!(
                "matrix must be square, got {}x{}",
                rows, cols
            )));
        }
        let mut matrix = Self::zeros(rows);
        for j in 0..rows {
            for i in 0..=j {
                let upper = full[[i, j]];
                let lower = full[[j, i]];
                let scale = upper.abs().max(lower.abs()).max(1.0);
                if (upper - lower).abs() > SYMMETRY_TOLERANCE * scale {
                    return Err(FitMinError::InvalidInput(format!(
                        "matrix is not symmetric at ({}, {}): {} != {}",
                        i, j, upper, lower
                    )));
                }
                matrix.data[packed_index(i, j)] = upper;
            }
        }
        Ok(matrix)
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element (i, j), in either order.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.dim && j < self.dim,
            "index ({}, {}) out of range for {}x{} matrix",
            i,
            j,
            self.dim,
            self.dim
        );
        self.data[symmetric_index(i, j)]
    }

    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.dim).map(|i| self.data[packed_index(i, i)]).collect()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Expands to a full symmetric matrix.
    pub fn to_full(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.dim, self.dim), |(i, j)| self.data[symmetric_index(i, j)])
    }
}

impl TryFrom<Vec<f64>> for PackedSymmetricMatrix {
    type Error = FitMinError;

    fn try_from(data: Vec<f64>) -> Result<Self> {
        Self::from_packed(data)
    }
}

impl From<PackedSymmetricMatrix> for Vec<f64> {
    fn from(matrix: PackedSymmetricMatrix) -> Self {
        matrix.data
    }
}
