//! # Interpolation
//!
//! One-dimensional interpolation over tabulated control points, plus a reader
//! for whitespace-separated numeric columns.
//!
//! ```
//! use fitmin_rs::interpolate::{InterpolationMethod, Interpolator};
//!
//! let interp = Interpolator::new(
//!     vec![0.0, 1.0, 2.0],
//!     vec![0.0, 10.0, 40.0],
//!     InterpolationMethod::Linear,
//! )
//! .unwrap();
//! assert_eq!(interp.eval(0.5), 5.0);
//! // Outside the domain the nearest endpoint value is returned.
//! assert_eq!(interp.eval(7.0), 40.0);
//! ```

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use nom::character::complete::{space0, space1};
use nom::multi::separated_list0;
use nom::number::complete::double;
use nom::sequence::delimited;
use nom::{IResult, Parser};
use thiserror::Error;

use crate::error::{FitMinError, Result};

/// Errors that can occur when building an interpolator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    #[error("unknown interpolation method '{0}'")]
    UnknownMethod(String),

    #[error("x and y have different lengths ({x_len} != {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("{method} interpolation needs at least {needed} points, got {got}")]
    TooFewPoints {
        method: InterpolationMethod,
        needed: usize,
        got: usize,
    },

    #[error("x values are not strictly increasing at index {index}")]
    NotIncreasing { index: usize },
}

/// Interpolation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMethod {
    /// Piecewise linear.
    Linear,
    /// Natural cubic spline (zero second derivative at both ends).
    CubicSpline,
}

impl InterpolationMethod {
    fn min_points(self) -> usize {
        match self {
            InterpolationMethod::Linear => 2,
            InterpolationMethod::CubicSpline => 3,
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolationMethod::Linear => write!(f, "linear"),
            InterpolationMethod::CubicSpline => write!(f, "cspline"),
        }
    }
}

impl FromStr for InterpolationMethod {
    type Err = InterpolationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "linear" => Ok(InterpolationMethod::Linear),
            "cspline" => Ok(InterpolationMethod::CubicSpline),
            other => Err(InterpolationError::UnknownMethod(other.to_string())),
        }
    }
}

/// Interpolates y(x) through a set of control points.
#[derive(Debug, Clone)]
pub struct Interpolator {
    method: InterpolationMethod,
    x: Vec<f64>,
    y: Vec<f64>,
    // Second derivatives at the control points (cubic spline only).
    y2: Vec<f64>,
}

impl Interpolator {
    pub fn new(
        x: Vec<f64>,
        y: Vec<f64>,
        method: InterpolationMethod,
    ) -> std::result::Result<Self, InterpolationError> {
        if x.len() != y.len() {
            return Err(InterpolationError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        let needed = method.min_points();
        if x.len() < needed {
            return Err(InterpolationError::TooFewPoints {
                method,
                needed,
                got: x.len(),
            });
        }
        if let Some(index) = x.windows(2).position(|w| !(w[0] < w[1])) {
            return Err(InterpolationError::NotIncreasing { index: index + 1 });
        }
        let y2 = match method {
            InterpolationMethod::Linear => Vec::new(),
            InterpolationMethod::CubicSpline => natural_spline(&x, &y),
        };
        Ok(Self { method, x, y, y2 })
    }

    /// Builds an interpolator from the first two columns of `input`.
    pub fn from_reader<R: BufRead>(input: R, method: InterpolationMethod) -> Result<Self> {
        let mut columns = read_vectors(input, 2, true)?;
        let y = columns.pop().unwrap_or_default();
        let x = columns.pop().unwrap_or_default();
        Ok(Self::new(x, y, method)?)
    }

    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// Interpolated y at `x`, or the nearest endpoint y outside the domain.
    /// A NaN `x` gives NaN.
    pub fn eval(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        let n = self.x.len();
        if x <= self.x[0] {
            return self.y[0];
        }
        if x >= self.x[n - 1] {
            return self.y[n - 1];
        }
        // x[k] <= x < x[k+1]
        let k = self.x.partition_point(|&xi| xi <= x) - 1;
        let h = self.x[k + 1] - self.x[k];
        let t = x - self.x[k];
        match self.method {
            InterpolationMethod::Linear => self.y[k] + (self.y[k + 1] - self.y[k]) * t / h,
            InterpolationMethod::CubicSpline => {
                let (m0, m1) = (self.y2[k], self.y2[k + 1]);
                let b = (self.y[k + 1] - self.y[k]) / h - h * (2.0 * m0 + m1) / 6.0;
                let c = m0 / 2.0;
                let d = (m1 - m0) / (6.0 * h);
                self.y[k] + t * (b + t * (c + t * d))
            }
        }
    }
}

/// Second derivatives of the natural cubic spline through (x, y).
fn natural_spline(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }
    // Thomas algorithm on the interior equations
    //   h[i-1] m[i-1] + 2 (h[i-1] + h[i]) m[i] + h[i] m[i+1] = rhs[i]
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let mut diag = vec![0.0; n];
    let mut rhs = vec![0.0; n];
    for i in 1..n - 1 {
        diag[i] = 2.0 * (h[i - 1] + h[i]);
        rhs[i] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
    }
    for i in 2..n - 1 {
        let w = h[i - 1] / diag[i - 1];
        diag[i] -= w * h[i - 1];
        rhs[i] -= w * rhs[i - 1];
    }
    for i in (1..n - 1).rev() {
        m[i] = (rhs[i] - h[i] * m[i + 1]) / diag[i];
    }
    m
}

/// Numbers separated by at least one space or tab.
fn row(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(space0, separated_list0(space1, double), space0).parse(input)
}

/// Reads `n_columns` whitespace-separated numeric columns from `input`.
///
/// Blank lines and lines starting with `#` are skipped. A row with fewer
/// than `n_columns` values is an error, as is a row with more unless
/// `ignore_extra` is set.
pub fn read_vectors<R: BufRead>(
    input: R,
    n_columns: usize,
    ignore_extra: bool,
) -> Result<Vec<Vec<f64>>> {
    let mut columns = vec![Vec::new(); n_columns];
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let values = match row(trimmed) {
            Ok(("", values)) => values,
            Ok((rest, _)) => {
                return Err(FitMinError::Parse(format!(
                    "line {}: unexpected input '{}'",
                    number + 1,
                    rest
                )))
            }
            Err(e) => return Err(FitMinError::Parse(format!("line {}: {}", number + 1, e))),
        };
        if values.len() < n_columns || (values.len() > n_columns && !ignore_extra) {
            return Err(FitMinError::Parse(format!(
                "line {}: expected {} values, got {}",
                number + 1,
                n_columns,
                values.len()
            )));
        }
        for (column, value) in columns.iter_mut().zip(values) {
            column.push(value);
        }
    }
    log::debug!(
        "read {} rows of {} columns",
        columns.first().map_or(0, Vec::len),
        n_columns
    );
    Ok(columns)
}
