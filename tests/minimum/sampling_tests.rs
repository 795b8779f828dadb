//! Statistical tests for correlated parameter draws

use crate::test_helpers::positive_definite;
use fitmin_rs::random::{self, RandomSource};
use fitmin_rs::{CovarianceInput, MinimizationResult, SamplingConfig};
use ndarray::{arr1, Array1};

#[test]
fn test_identity_covariance_draws() {
    let location = arr1(&[1.0, -2.0, 0.5]);
    let n_par = location.len();
    let minimum = MinimizationResult::with_covariance(
        0.0,
        location.clone(),
        CovarianceInput::Errors(&[1.0, 1.0, 1.0]),
    )
    .unwrap();

    random::set_seed(12345);
    let n = 100_000;
    let mut sum = vec![0.0; n_par];
    let mut sum_sq = vec![0.0; n_par];
    let mut weight_sum = 0.0;
    let mut params = vec![0.0; n_par];
    for _ in 0..n {
        weight_sum += minimum.set_random_parameters(&mut params).unwrap();
        for i in 0..n_par {
            sum[i] += params[i];
            sum_sq[i] += params[i] * params[i];
        }
    }

    let n = n as f64;
    for i in 0..n_par {
        let mean = sum[i] / n;
        let var = sum_sq[i] / n - mean * mean;
        assert!((mean - location[i]).abs() < 0.02, "mean[{}] = {}", i, mean);
        assert!((var - 1.0).abs() < 0.03, "var[{}] = {}", i, var);
    }
    let mean_weight = weight_sum / n;
    assert!((mean_weight - n_par as f64 / 2.0).abs() < 0.03, "weight = {}", mean_weight);
}

#[test]
fn test_correlated_draws_reproduce_covariance() {
    let matrix = positive_definite(3);
    let minimum = MinimizationResult::with_covariance(
        0.0,
        Array1::zeros(3),
        CovarianceInput::Packed(matrix.as_slice()),
    )
    .unwrap();
    let config = SamplingConfig {
        n_samples: 200_000,
        seed: 99,
        chunk_size: 4096,
    };
    let samples = minimum.sample(&config).unwrap();

    let n = samples.len() as f64;
    let p = &samples.parameters;
    let empirical = p.t().dot(p) / n;
    for i in 0..3 {
        for j in 0..3 {
            let expected = matrix.get(i, j);
            let scale = (matrix.get(i, i) * matrix.get(j, j)).sqrt();
            assert!(
                (empirical[[i, j]] - expected).abs() < 0.03 * scale,
                "cov[{}][{}] = {} (expected {})",
                i,
                j,
                empirical[[i, j]],
                expected
            );
        }
    }
    let mean_weight = samples.mean_weight().unwrap();
    assert!((mean_weight - 1.5).abs() < 0.02, "weight = {}", mean_weight);
}

#[test]
fn test_sample_moments() {
    let minimum = MinimizationResult::with_covariance(
        0.0,
        arr1(&[3.0, -1.0]),
        CovarianceInput::Errors(&[0.5, 2.0]),
    )
    .unwrap();
    let samples = minimum
        .sample(&SamplingConfig {
            n_samples: 50_000,
            seed: 1,
            chunk_size: 1000,
        })
        .unwrap();
    let means = samples.means().unwrap();
    let variances = samples.variances().unwrap();
    assert!((means[0] - 3.0).abs() < 0.02);
    assert!((means[1] + 1.0).abs() < 0.05);
    assert!((variances[0] - 0.25).abs() < 0.01);
    assert!((variances[1] - 4.0).abs() < 0.15);
}

#[test]
fn test_explicit_generator_is_reproducible() {
    let minimum = MinimizationResult::with_covariance(
        0.0,
        arr1(&[0.0, 0.0]),
        CovarianceInput::Packed(&[2.0, 0.5, 1.0]),
    )
    .unwrap();
    let mut a = RandomSource::from_seed(4);
    let mut b = RandomSource::from_seed(4);
    let mut x = [0.0; 2];
    let mut y = [0.0; 2];
    for _ in 0..20 {
        let wx = minimum.set_random_parameters_with(&mut a, &mut x).unwrap();
        let wy = minimum.set_random_parameters_with(&mut b, &mut y).unwrap();
        assert_eq!(x, y);
        assert_eq!(wx, wy);
    }
}
