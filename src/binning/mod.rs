//! # Binning
//!
//! A [`Binning`] describes how an axis is divided into bins. The only scheme
//! provided here is [`NonUniformSampling`], where every bin is a single
//! sample point of zero width.

use thiserror::Error;

/// Errors that can occur when building or indexing a binning
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BinningError {
    #[error("need at least 1 sample point")]
    NoSamplePoints,

    #[error("sample points are not in increasing order at index {index}")]
    NotIncreasing { index: usize },

    #[error("invalid bin index {index} (have {n_bins} bins)")]
    InvalidBinIndex { index: usize, n_bins: usize },
}

/// An axis divided into indexed bins.
pub trait Binning {
    fn n_bins(&self) -> usize;

    fn bin_low_edge(&self, index: usize) -> Result<f64, BinningError>;

    fn bin_high_edge(&self, index: usize) -> Result<f64, BinningError>;

    fn bin_width(&self, index: usize) -> Result<f64, BinningError>;

    fn bin_center(&self, index: usize) -> Result<f64, BinningError>;

    /// Checks that `index` addresses an existing bin.
    fn check_bin_index(&self, index: usize) -> Result<(), BinningError> {
        let n_bins = self.n_bins();
        if index >= n_bins {
            return Err(BinningError::InvalidBinIndex { index, n_bins });
        }
        Ok(())
    }
}

/// Binning defined by a non-decreasing list of sample points.
#[derive(Debug, Clone, PartialEq)]
pub struct NonUniformSampling {
    sample_points: Vec<f64>,
}

impl NonUniformSampling {
    pub fn new(sample_points: Vec<f64>) -> Result<Self, BinningError> {
        if sample_points.is_empty() {
            return Err(BinningError::NoSamplePoints);
        }
        if let Some(index) = sample_points.windows(2).position(|w| w[0] > w[1]) {
            return Err(BinningError::NotIncreasing { index: index + 1 });
        }
        Ok(Self { sample_points })
    }

    pub fn sample_points(&self) -> &[f64] {
        &self.sample_points
    }
}

impl Binning for NonUniformSampling {
    fn n_bins(&self) -> usize {
        self.sample_points.len()
    }

    fn bin_low_edge(&self, index: usize) -> Result<f64, BinningError> {
        self.bin_center(index)
    }

    fn bin_high_edge(&self, index: usize) -> Result<f64, BinningError> {
        self.bin_center(index)
    }

    fn bin_width(&self, index: usize) -> Result<f64, BinningError> {
        self.check_bin_index(index)?;
        Ok(0.0)
    }

    fn bin_center(&self, index: usize) -> Result<f64, BinningError> {
        self.check_bin_index(index)?;
        Ok(self.sample_points[index])
    }
}
