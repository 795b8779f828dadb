//! Named fit parameters
//!
//! A [`FitParameter`] is a plain value type: a name, a value and an estimated
//! error. An error of zero means the parameter is permanently fixed. A
//! temporarily fixed parameter keeps its error negated so that
//! [`FitParameter::release`] can restore it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when working with fit parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Parameter '{name}' has negative error {error}")]
    NegativeError { name: String, error: f64 },
}

/// A fit parameter specified by its name, value and estimated error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitParameter {
    name: String,
    value: f64,
    error: f64,
}

impl FitParameter {
    /// Creates a new parameter. Zero error means the parameter is fixed.
    ///
    /// # Examples
    ///
    /// ```
    /// use fitmin_rs::parameters::FitParameter;
    ///
    /// let param = FitParameter::new("amplitude", 10.0, 0.5).unwrap();
    /// assert_eq!(param.name(), "amplitude");
    /// assert!(param.is_floating());
    ///
    /// assert!(FitParameter::new("width", 1.0, -1.0).is_err());
    /// ```
    pub fn new(name: &str, value: f64, error: f64) -> Result<Self, ParameterError> {
        check_error(name, error)?;
        Ok(Self {
            name: name.to_string(),
            value,
            error,
        })
    }

    /// Creates a fixed parameter.
    pub fn fixed(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            error: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Estimated error, or zero if the parameter is fixed.
    pub fn error(&self) -> f64 {
        if self.is_floating() {
            self.error
        } else {
            0.0
        }
    }

    /// Sets a new error. Zero fixes the parameter permanently; use
    /// [`fix`](Self::fix) to fix it temporarily.
    pub fn set_error(&mut self, error: f64) -> Result<(), ParameterError> {
        check_error(&self.name, error)?;
        self.error = error;
        Ok(())
    }

    /// Temporarily fixes the parameter, remembering its error.
    pub fn fix(&mut self) {
        if self.error > 0.0 {
            self.error = -self.error;
        }
    }

    /// Undoes [`fix`](Self::fix).
    pub fn release(&mut self) {
        if self.error < 0.0 {
            self.error = -self.error;
        }
    }

    /// True if the parameter is floating, in which case its error is > 0.
    pub fn is_floating(&self) -> bool {
        self.error > 0.0
    }
}

fn check_error(name: &str, error: f64) -> Result<(), ParameterError> {
    if error < 0.0 {
        return Err(ParameterError::NegativeError {
            name: name.to_string(),
            error,
        });
    }
    Ok(())
}

fn selected(
    parameters: &[FitParameter],
    only_floating: bool,
) -> impl Iterator<Item = &FitParameter> + '_ {
    parameters
        .iter()
        .filter(move |p| !only_floating || p.is_floating())
}

/// Parameter values, optionally only those of floating parameters.
pub fn fit_parameter_values(parameters: &[FitParameter], only_floating: bool) -> Vec<f64> {
    selected(parameters, only_floating).map(|p| p.value()).collect()
}

/// Parameter errors, optionally only those of floating parameters.
pub fn fit_parameter_errors(parameters: &[FitParameter], only_floating: bool) -> Vec<f64> {
    selected(parameters, only_floating).map(|p| p.error()).collect()
}

/// Parameter names, optionally only those of floating parameters.
pub fn fit_parameter_names(parameters: &[FitParameter], only_floating: bool) -> Vec<String> {
    selected(parameters, only_floating)
        .map(|p| p.name().to_string())
        .collect()
}

pub fn count_floating_fit_parameters(parameters: &[FitParameter]) -> usize {
    parameters.iter().filter(|p| p.is_floating()).count()
}

/// Index of the first parameter called `name`.
pub fn find_fit_parameter_by_name(parameters: &[FitParameter], name: &str) -> Option<usize> {
    parameters.iter().position(|p| p.name() == name)
}
