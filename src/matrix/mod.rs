//! # Packed Symmetric Matrices
//!
//! Storage and factorization for covariance matrices:
//!
//! - [`PackedSymmetricMatrix`]: the packed upper triangle of a symmetric matrix
//! - [`CholeskyFactor`]: the lower factor L of a positive-definite matrix, in the same layout
//! - [`PackedCholesky`]: the seam for plugging in a factorization routine
//!
//! ```
//! use fitmin_rs::matrix::{cholesky_decomposition, PackedSymmetricMatrix};
//!
//! let covar = PackedSymmetricMatrix::from_packed(vec![4.0, 2.0, 5.0]).unwrap();
//! let factor = cholesky_decomposition(&covar).unwrap();
//! assert_eq!(factor.get(1, 0), 1.0);
//! ```

mod cholesky;
mod packed;

#[cfg(feature = "matrix")]
pub use cholesky::NalgebraCholesky;
pub use cholesky::{
    cholesky_decomposition, cholesky_decomposition_with, CholeskyFactor, NativeCholesky,
    PackedCholesky,
};
pub use packed::{
    dimension_from_packed_len, packed_index, packed_len, symmetric_index, PackedSymmetricMatrix,
};
