//! # fitmin-rs
//!
//! `fitmin-rs` represents the outcome of a numerical minimization: the found
//! parameter vector, its objective value and an optional covariance matrix.
//!
//! The library provides:
//! - Packed symmetric matrix storage and a Cholesky factorization that doubles
//!   as a positive-definiteness test
//! - Per-parameter errors and correlated random parameter draws around a minimum
//! - A seedable random source with independent seed-selected array fills
//! - Named fit parameters, 1-D interpolation and non-uniform binning helpers
//!
//! ## Basic Usage
//!
//! ```
//! use fitmin_rs::{random, CovarianceInput, MinimizationResult};
//! use ndarray::arr1;
//!
//! let mut minimum = MinimizationResult::new(0.3, arr1(&[1.0, 2.0]));
//! assert!(minimum
//!     .update_covariance(CovarianceInput::Errors(&[0.1, 0.2]))
//!     .unwrap());
//!
//! random::set_seed(42);
//! let (params, weight) = minimum.random_parameters().unwrap();
//! assert_eq!(params.len(), 2);
//! assert!(weight >= 0.0);
//! ```

// Public modules
pub mod error;

pub mod matrix;

pub mod minimum;

pub mod random;

// Collaborators
pub mod binning;

pub mod interpolate;

pub mod parameters;

// Re-exports for convenience
pub use error::{FitMinError, Result};
pub use matrix::{CholeskyFactor, PackedSymmetricMatrix};
pub use minimum::{CovarianceInput, MinimizationResult, NumberFormat, SampleSet, SamplingConfig};
pub use random::{AlignedBuffer, RandomSource};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
