//! printf-style formatting of single numbers.
//!
//! A format string holds exactly one conversion of the form
//! `%[flags][width][.precision]conv`, where `conv` is one of `f`, `e`, `E`,
//! `g` or `G` and the flags are any of `-`, `+`, space, `0` and `#`.
//! Literal text may surround the conversion; `%%` is a literal percent sign.

use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, digit0, digit1, one_of};
use nom::combinator::{map, map_res, opt, value};
use nom::multi::many0;
use nom::sequence::preceded;
use nom::{IResult, Parser};

use crate::error::{FitMinError, Result};

const DEFAULT_PRECISION: usize = 6;

/// Conversion character of a [`NumberFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `%f`
    Fixed,
    /// `%e` / `%E`
    Exponent { upper: bool },
    /// `%g` / `%G`
    General { upper: bool },
}

/// A parsed single-number format specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    prefix: String,
    suffix: String,
    left_align: bool,
    plus_sign: bool,
    space_sign: bool,
    zero_pad: bool,
    alternate: bool,
    width: usize,
    precision: Option<usize>,
    conversion: Conversion,
}

impl Default for NumberFormat {
    /// Equivalent to `"%g"`.
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            left_align: false,
            plus_sign: false,
            space_sign: false,
            zero_pad: false,
            alternate: false,
            width: 0,
            precision: None,
            conversion: Conversion::General { upper: false },
        }
    }
}

fn literal(input: &str) -> IResult<&str, String> {
    map(
        many0(alt((
            value("%", tag("%%")),
            take_while1(|c: char| c != '%'),
        ))),
        |parts: Vec<&str>| parts.concat(),
    )
    .parse(input)
}

fn conversion(input: &str) -> IResult<&str, Conversion> {
    map(one_of("feEgG"), |c| match c {
        'f' => Conversion::Fixed,
        'e' => Conversion::Exponent { upper: false },
        'E' => Conversion::Exponent { upper: true },
        'g' => Conversion::General { upper: false },
        _ => Conversion::General { upper: true },
    })
    .parse(input)
}

fn number_format(input: &str) -> IResult<&str, NumberFormat> {
    map(
        (
            literal,
            char('%'),
            many0(one_of("-+ 0#")),
            opt(map_res(digit1, str::parse::<usize>)),
            // A bare "." means precision zero.
            opt(preceded(
                char('.'),
                map(digit0, |d: &str| d.parse::<usize>().unwrap_or(0)),
            )),
            conversion,
            literal,
        ),
        |(prefix, _, flags, width, precision, conversion, suffix)| NumberFormat {
            prefix,
            suffix,
            left_align: flags.contains(&'-'),
            plus_sign: flags.contains(&'+'),
            space_sign: flags.contains(&' '),
            zero_pad: flags.contains(&'0'),
            alternate: flags.contains(&'#'),
            width: width.unwrap_or(0),
            precision,
            conversion,
        },
    )
    .parse(input)
}

impl NumberFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match number_format(format) {
            Ok(("", parsed)) => Ok(parsed),
            Ok((rest, _)) => Err(FitMinError::Format(format!(
                "unexpected '{}' in format '{}'",
                rest, format
            ))),
            Err(e) => Err(FitMinError::Format(format!(
                "invalid format '{}': {}",
                format, e
            ))),
        }
    }

    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    /// Renders `x` according to this format.
    pub fn format(&self, x: f64) -> String {
        let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
        let upper = matches!(
            self.conversion,
            Conversion::Exponent { upper: true } | Conversion::General { upper: true }
        );
        let magnitude = x.abs();
        let body = if x.is_nan() {
            "nan".to_string()
        } else if x.is_infinite() {
            "inf".to_string()
        } else {
            match self.conversion {
                Conversion::Fixed => {
                    let mut s = format!("{:.*}", precision, magnitude);
                    if self.alternate && precision == 0 {
                        s.push('.');
                    }
                    s
                }
                Conversion::Exponent { .. } => c_exponent(magnitude, precision, upper),
                Conversion::General { .. } => self.general(magnitude, precision, upper),
            }
        };
        let body = if upper { body.to_uppercase() } else { body };

        let sign = if x.is_sign_negative() && !x.is_nan() {
            "-"
        } else if self.plus_sign {
            "+"
        } else if self.space_sign {
            " "
        } else {
            ""
        };

        let used = sign.len() + body.len();
        let padding = self.width.saturating_sub(used);
        let field = if self.left_align {
            format!("{}{}{}", sign, body, " ".repeat(padding))
        } else if self.zero_pad && x.is_finite() {
            format!("{}{}{}", sign, "0".repeat(padding), body)
        } else {
            format!("{}{}{}", " ".repeat(padding), sign, body)
        };
        format!("{}{}{}", self.prefix, field, self.suffix)
    }

    fn general(&self, magnitude: f64, precision: usize, upper: bool) -> String {
        let p = precision.max(1);
        let exponent = if magnitude == 0.0 {
            0
        } else {
            decimal_exponent(magnitude, p - 1)
        };
        let mut s = if exponent >= -4 && exponent < p as i32 {
            format!("{:.*}", (p as i32 - 1 - exponent) as usize, magnitude)
        } else {
            c_exponent(magnitude, p - 1, upper)
        };
        if !self.alternate {
            strip_trailing_zeros(&mut s);
        }
        s
    }
}

impl FromStr for NumberFormat {
    type Err = FitMinError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Decimal exponent of `magnitude` after rounding to `digits` fractional digits
/// in scientific notation.
fn decimal_exponent(magnitude: f64, digits: usize) -> i32 {
    let s = format!("{:.*e}", digits, magnitude);
    s.rsplit('e')
        .next()
        .and_then(|e| e.parse().ok())
        .unwrap_or(0)
}

/// Scientific notation with a signed, at least two digit exponent.
fn c_exponent(magnitude: f64, precision: usize, upper: bool) -> String {
    let s = format!("{:.*e}", precision, magnitude);
    let (mantissa, exponent) = s.split_once('e').unwrap_or((s.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    format!(
        "{}{}{}{:02}",
        mantissa,
        if upper { 'E' } else { 'e' },
        if exponent < 0 { '-' } else { '+' },
        exponent.abs()
    )
}

fn strip_trailing_zeros(s: &mut String) {
    let exponent_at = s.find(|c: char| c == 'e' || c == 'E');
    let (mantissa, exponent) = match exponent_at {
        Some(at) => s.split_at(at),
        None => (s.as_str(), ""),
    };
    if !mantissa.contains('.') {
        return;
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    *s = format!("{}{}", trimmed, exponent);
}
