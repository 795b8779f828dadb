//! # Fit Parameters
//!
//! Named scalar parameters with fix/float bookkeeping. The numerical core
//! only consumes the raw value and error vectors extracted from them:
//!
//! ```rust
//! use fitmin_rs::parameters::{fit_parameter_errors, fit_parameter_values, FitParameter};
//! use fitmin_rs::{CovarianceInput, MinimizationResult};
//! use ndarray::Array1;
//!
//! let params = vec![
//!     FitParameter::new("slope", 1.5, 0.2).unwrap(),
//!     FitParameter::new("offset", -0.5, 0.1).unwrap(),
//! ];
//! let location = Array1::from(fit_parameter_values(&params, false));
//! let errors = fit_parameter_errors(&params, false);
//!
//! let minimum =
//!     MinimizationResult::with_covariance(3.2, location, CovarianceInput::Errors(&errors)).unwrap();
//! assert!(minimum.has_covariance());
//! ```

pub mod parameter;

pub use parameter::{
    count_floating_fit_parameters, find_fit_parameter_by_name, fit_parameter_errors,
    fit_parameter_names, fit_parameter_values, FitParameter, ParameterError,
};
