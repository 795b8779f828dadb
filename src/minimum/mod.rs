//! # Function Minima
//!
//! [`MinimizationResult`] holds what a minimizer found: the objective value, the
//! minimizing parameter vector and, optionally, a covariance matrix for the
//! parameters. When a covariance is present its Cholesky factor is kept
//! alongside it and is used to:
//!
//! - certify that the covariance is positive definite,
//! - derive per-parameter errors,
//! - draw correlated random parameter vectors around the minimum.
//!
//! ```
//! use fitmin_rs::{CovarianceInput, MinimizationResult};
//! use ndarray::arr1;
//!
//! // Covariance [[4, 2], [2, 5]] in packed upper-triangle order.
//! let covar = [4.0, 2.0, 5.0];
//! let minimum =
//!     MinimizationResult::with_covariance(1.25, arr1(&[0.5, -1.0]), CovarianceInput::Packed(&covar))
//!         .unwrap();
//!
//! assert_eq!(minimum.errors().unwrap()[0], 2.0);
//!
//! let mut params = [0.0; 2];
//! let weight = minimum.set_random_parameters(&mut params).unwrap();
//! assert!(weight >= 0.0);
//! ```

mod format;
mod sampling;

pub use format::{Conversion, NumberFormat};
pub use sampling::{SampleSet, SamplingConfig};

use std::fmt;
use std::io::Write;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{FitMinError, Result};
use crate::matrix::{cholesky_decomposition, packed_len, CholeskyFactor, PackedSymmetricMatrix};
use crate::random::{self, RandomSource};

/// The two ways of specifying a covariance matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CovarianceInput<'a> {
    /// Per-parameter standard errors; the covariance is diagonal.
    Errors(&'a [f64]),
    /// The packed upper triangle of a full covariance matrix.
    Packed(&'a [f64]),
}

/// A covariance matrix together with its Cholesky factor. The two are only
/// ever replaced as a unit.
#[derive(Debug, Clone, PartialEq)]
struct FittedCovariance {
    matrix: PackedSymmetricMatrix,
    cholesky: CholeskyFactor,
}

/// The result of a function minimization.
#[derive(Debug, Clone)]
pub struct MinimizationResult {
    value: f64,
    location: Array1<f64>,
    covariance: Option<FittedCovariance>,
}

/// Serialized form of a [`MinimizationResult`].
#[derive(Serialize, Deserialize)]
struct MinimumRecord {
    value: f64,
    location: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    covariance: Option<PackedSymmetricMatrix>,
}

impl MinimizationResult {
    /// Creates a minimum without covariance information.
    pub fn new(value: f64, location: Array1<f64>) -> Self {
        Self {
            value,
            location,
            covariance: None,
        }
    }

    /// Creates a minimum with a covariance that must be usable: a covariance
    /// that is not positive definite (or an error <= 0) is an error here.
    pub fn with_covariance(
        value: f64,
        location: Array1<f64>,
        covariance: CovarianceInput<'_>,
    ) -> Result<Self> {
        let mut minimum = Self::new(value, location);
        if !minimum.update_covariance(covariance)? {
            return Err(FitMinError::NotPositiveDefinite(
                "covariance supplied with the minimum was rejected".to_string(),
            ));
        }
        Ok(minimum)
    }

    /// Objective value at the minimum.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Parameter values at the minimum.
    pub fn location(&self) -> &Array1<f64> {
        &self.location
    }

    pub fn n_parameters(&self) -> usize {
        self.location.len()
    }

    pub fn has_covariance(&self) -> bool {
        self.covariance.is_some()
    }

    pub fn covariance(&self) -> Option<&PackedSymmetricMatrix> {
        self.covariance.as_ref().map(|c| &c.matrix)
    }

    pub fn cholesky(&self) -> Option<&CholeskyFactor> {
        self.covariance.as_ref().map(|c| &c.cholesky)
    }

    /// Replaces the location and value, leaving any covariance untouched.
    pub fn update_parameters(&mut self, location: Array1<f64>, value: f64) -> Result<()> {
        if location.len() != self.location.len() {
            return Err(FitMinError::DimensionMismatch(format!(
                "expected {} parameters, got {}",
                self.location.len(),
                location.len()
            )));
        }
        self.location = location;
        self.value = value;
        Ok(())
    }

    /// Replaces the covariance and its Cholesky factor.
    ///
    /// Returns `Ok(false)`, leaving the current state untouched, when the new
    /// covariance is not positive definite or an error is not positive. Input
    /// whose size does not match the number of parameters is an `Err`.
    pub fn update_covariance(&mut self, covariance: CovarianceInput<'_>) -> Result<bool> {
        let n_par = self.location.len();
        let matrix = match covariance {
            CovarianceInput::Errors(errors) => {
                if errors.len() != n_par {
                    return Err(FitMinError::DimensionMismatch(format!(
                        "parameter and error vectors have incompatible sizes ({} != {})",
                        n_par,
                        errors.len()
                    )));
                }
                if let Some(i) = errors.iter().position(|&e| !(e > 0.0)) {
                    log::debug!("rejecting covariance: error[{}] = {} is not positive", i, errors[i]);
                    return Ok(false);
                }
                PackedSymmetricMatrix::from_errors(errors)
            }
            CovarianceInput::Packed(packed) => {
                if packed.len() != packed_len(n_par) {
                    return Err(FitMinError::DimensionMismatch(format!(
                        "parameter and covariance vectors have incompatible sizes ({} parameters need {} elements, got {})",
                        n_par,
                        packed_len(n_par),
                        packed.len()
                    )));
                }
                PackedSymmetricMatrix::with_dimension(n_par, packed.to_vec())?
            }
        };
        self.update_covariance_matrix(matrix)
    }

    /// Like [`update_covariance`](Self::update_covariance) for an already
    /// packed matrix.
    pub fn update_covariance_matrix(&mut self, matrix: PackedSymmetricMatrix) -> Result<bool> {
        if matrix.dim() != self.location.len() {
            return Err(FitMinError::DimensionMismatch(format!(
                "{}x{} covariance for {} parameters",
                matrix.dim(),
                matrix.dim(),
                self.location.len()
            )));
        }
        match cholesky_decomposition(&matrix) {
            Some(cholesky) => {
                self.covariance = Some(FittedCovariance { matrix, cholesky });
                Ok(true)
            }
            None => {
                log::debug!("rejecting covariance: not positive definite");
                Ok(false)
            }
        }
    }

    /// Per-parameter errors: the square roots of the covariance diagonal.
    pub fn errors(&self) -> Result<Array1<f64>> {
        let fitted = self.require_covariance("errors")?;
        Ok(standard_errors(&fitted.matrix).collect())
    }

    /// Fills `params` with a random point drawn from the covariance around
    /// the minimum, using this thread's shared [`RandomSource`].
    ///
    /// Returns ½·Σgᵢ², the negative log-likelihood of the standard normal
    /// deviates g that were transformed by the Cholesky factor.
    pub fn set_random_parameters(&self, params: &mut [f64]) -> Result<f64> {
        random::with_instance(|rng| self.set_random_parameters_with(rng, params))
    }

    /// Like [`set_random_parameters`](Self::set_random_parameters) with an
    /// explicit generator.
    pub fn set_random_parameters_with(
        &self,
        rng: &mut RandomSource,
        params: &mut [f64],
    ) -> Result<f64> {
        let fitted = self.require_covariance("random parameters")?;
        let n_par = self.location.len();
        if params.len() != n_par {
            return Err(FitMinError::DimensionMismatch(format!(
                "output has {} parameters, expected {}",
                params.len(),
                n_par
            )));
        }
        let gauss: Vec<f64> = (0..n_par).map(|_| rng.normal()).collect();
        let nl_weight = gauss.iter().map(|g| g * g).sum::<f64>() / 2.0;
        let offset = fitted.cholesky.transform(&gauss);
        for ((param, center), delta) in params.iter_mut().zip(&self.location).zip(offset) {
            *param = center + delta;
        }
        Ok(nl_weight)
    }

    /// Draws one random point, returning it with its weight.
    pub fn random_parameters(&self) -> Result<(Array1<f64>, f64)> {
        let mut params = vec![0.0; self.location.len()];
        let weight = self.set_random_parameters(&mut params)?;
        Ok((Array1::from(params), weight))
    }

    fn require_covariance(&self, what: &str) -> Result<&FittedCovariance> {
        self.covariance.as_ref().ok_or_else(|| {
            FitMinError::NoCovariance(format!("cannot compute {} without a covariance matrix", what))
        })
    }

    /// Renders the report with every number formatted by `format`.
    ///
    /// ```text
    /// F(v0,v1,...) = value
    /// ERRORS: e0 e1 ...
    /// COVARIANCE:
    ///  c00 c01 ...
    ///  c10 c11 ...
    /// ```
    ///
    /// The last three parts are only present when there is a covariance.
    pub fn render(&self, format: &NumberFormat) -> String {
        let mut out = String::new();
        let location: Vec<String> = self.location.iter().map(|&v| format.format(v)).collect();
        out.push_str(&format!("F({}) = {}\n", location.join(","), format.format(self.value)));
        if let Some(fitted) = &self.covariance {
            let n_par = self.location.len();
            out.push_str("ERRORS:");
            for e in standard_errors(&fitted.matrix) {
                out.push(' ');
                out.push_str(&format.format(e));
            }
            out.push_str("\nCOVARIANCE:\n");
            for i in 0..n_par {
                for j in 0..n_par {
                    out.push(' ');
                    out.push_str(&format.format(fitted.matrix.get(i, j)));
                }
                out.push('\n');
            }
        }
        out
    }

    /// Writes the report to `out` using the printf-style `format`.
    pub fn print_to<W: Write>(&self, out: &mut W, format: &str) -> Result<()> {
        let format = NumberFormat::parse(format)?;
        out.write_all(self.render(&format).as_bytes())?;
        Ok(())
    }

    /// Serializes the minimum, including any covariance, to JSON.
    pub fn to_json(&self) -> Result<String> {
        let record = MinimumRecord {
            value: self.value,
            location: self.location.to_vec(),
            covariance: self.covariance().cloned(),
        };
        Ok(serde_json::to_string(&record)?)
    }

    /// Restores a minimum from [`to_json`](Self::to_json) output. A stored
    /// covariance must still be positive definite.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: MinimumRecord = serde_json::from_str(json)?;
        let location = Array1::from(record.location);
        match record.covariance {
            Some(matrix) => Self::with_covariance(
                record.value,
                location,
                CovarianceInput::Packed(matrix.as_slice()),
            ),
            None => Ok(Self::new(record.value, location)),
        }
    }
}

/// Square roots of the diagonal, with non-positive entries clamped to 0.
fn standard_errors(matrix: &PackedSymmetricMatrix) -> impl Iterator<Item = f64> {
    matrix.diagonal().into_iter().enumerate().map(|(i, sigsq)| {
        if sigsq > 0.0 {
            sigsq.sqrt()
        } else {
            log::warn!("covariance diagonal [{}] = {} is not positive", i, sigsq);
            0.0
        }
    })
}

impl fmt::Display for MinimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&NumberFormat::default()))
    }
}
