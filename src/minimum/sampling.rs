//! Bulk parameter sampling around a minimum.
//!
//! Draws are split into fixed-size chunks that are processed in parallel.
//! Chunk `k` draws from its own `RandomSource::from_seed(seed + k)`, so the
//! output depends only on the configuration and never on thread scheduling.

use ndarray::{Array1, Array2, Axis};
use rayon::prelude::*;

use crate::error::{FitMinError, Result};
use crate::random::RandomSource;

use super::MinimizationResult;

/// Configuration for [`MinimizationResult::sample`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Number of parameter vectors to draw.
    pub n_samples: usize,

    /// Base seed; chunk `k` is seeded with `seed + k`.
    pub seed: u64,

    /// Number of draws per parallel work unit.
    pub chunk_size: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            seed: 0,
            chunk_size: 1024,
        }
    }
}

/// Parameter vectors drawn around a minimum, with their weights.
#[derive(Debug, Clone)]
pub struct SampleSet {
    /// One row per draw, one column per parameter.
    pub parameters: Array2<f64>,

    /// ½·Σg² of the normal deviates behind each row.
    pub weights: Array1<f64>,
}

impl SampleSet {
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Per-parameter sample means.
    pub fn means(&self) -> Option<Array1<f64>> {
        self.parameters.mean_axis(Axis(0))
    }

    /// Per-parameter population variances.
    pub fn variances(&self) -> Option<Array1<f64>> {
        if self.is_empty() {
            return None;
        }
        Some(self.parameters.var_axis(Axis(0), 0.0))
    }

    pub fn mean_weight(&self) -> Option<f64> {
        self.weights.mean()
    }
}

impl MinimizationResult {
    /// Draws `config.n_samples` parameter vectors from the covariance around
    /// the minimum.
    pub fn sample(&self, config: &SamplingConfig) -> Result<SampleSet> {
        if self.cholesky().is_none() {
            return Err(FitMinError::NoCovariance(
                "cannot sample without a covariance matrix".to_string(),
            ));
        }
        if config.chunk_size == 0 {
            return Err(FitMinError::InvalidInput(
                "chunk_size must be positive".to_string(),
            ));
        }

        let n_par = self.n_parameters();
        let n_chunks = config.n_samples.div_ceil(config.chunk_size);
        log::debug!(
            "drawing {} samples of {} parameters in {} chunks",
            config.n_samples,
            n_par,
            n_chunks
        );

        let chunks: Result<Vec<(Vec<f64>, Vec<f64>)>> = (0..n_chunks)
            .into_par_iter()
            .map(|k| {
                let start = k * config.chunk_size;
                let count = config.chunk_size.min(config.n_samples - start);
                let mut rng = RandomSource::from_seed(config.seed.wrapping_add(k as u64));
                let mut params = vec![0.0; count * n_par];
                let mut weights = Vec::with_capacity(count);
                for i in 0..count {
                    let row = &mut params[i * n_par..(i + 1) * n_par];
                    weights.push(self.set_random_parameters_with(&mut rng, row)?);
                }
                Ok((params, weights))
            })
            .collect();

        let mut params = Vec::with_capacity(config.n_samples * n_par);
        let mut weights = Vec::with_capacity(config.n_samples);
        for (p, w) in chunks? {
            params.extend(p);
            weights.extend(w);
        }
        let parameters = Array2::from_shape_vec((config.n_samples, n_par), params)
            .map_err(|e| FitMinError::Other(e.to_string()))?;
        Ok(SampleSet {
            parameters,
            weights: Array1::from(weights),
        })
    }
}
