//! Tests for Cholesky factorization as a positive-definiteness test

use crate::test_helpers::{matrix_approx_eq, positive_definite};
use fitmin_rs::matrix::{
    cholesky_decomposition, cholesky_decomposition_with, NativeCholesky, PackedCholesky,
    PackedSymmetricMatrix,
};
use ndarray::arr2;

#[test]
fn test_reconstructs_positive_definite_matrices() {
    for n in 1..10 {
        let matrix = positive_definite(n);
        let factor = cholesky_decomposition(&matrix).unwrap();
        let l = factor.to_full();
        assert!(matrix_approx_eq(&l.dot(&l.t()), &matrix.to_full(), 1e-9), "n = {}", n);
        assert!(matrix_approx_eq(
            &factor.reconstruct().to_full(),
            &matrix.to_full(),
            1e-9
        ));
    }
}

#[test]
fn test_status_reports_failing_minor() {
    let routine = NativeCholesky;

    let mut data = PackedSymmetricMatrix::from_full(&arr2(&[[1.0, 0.0], [0.0, -1.0]]))
        .unwrap()
        .into_vec();
    assert_eq!(routine.factorize(2, &mut data), 2);

    let mut data = vec![0.0, 0.0, 1.0];
    assert_eq!(routine.factorize(2, &mut data), 1);

    // [[1, 2], [2, 1]] has a negative determinant.
    let mut data = vec![1.0, 2.0, 1.0];
    assert_eq!(routine.factorize(2, &mut data), 2);

    let mut data = PackedSymmetricMatrix::identity(4).into_vec();
    assert_eq!(routine.factorize(4, &mut data), 0);
}

#[test]
fn test_failure_is_absence() {
    let not_pd = PackedSymmetricMatrix::from_full(&arr2(&[[1.0, 0.0], [0.0, -1.0]])).unwrap();
    assert!(cholesky_decomposition(&not_pd).is_none());

    let singular = PackedSymmetricMatrix::from_packed(vec![1.0, 1.0, 1.0]).unwrap();
    assert!(cholesky_decomposition(&singular).is_none());
}

#[test]
fn test_input_matrix_is_not_modified() {
    let matrix = positive_definite(4);
    let before = matrix.clone();
    let _ = cholesky_decomposition(&matrix);
    assert_eq!(matrix, before);
}

/// A routine that always rejects, to exercise the pluggable seam.
struct Rejecting;

impl PackedCholesky for Rejecting {
    fn factorize(&self, dim: usize, _packed: &mut [f64]) -> usize {
        dim.max(1)
    }
}

#[test]
fn test_custom_routine() {
    let matrix = PackedSymmetricMatrix::identity(3);
    assert!(cholesky_decomposition_with(&Rejecting, &matrix).is_none());
    let routine: &dyn PackedCholesky = &NativeCholesky;
    assert!(cholesky_decomposition_with(routine, &matrix).is_some());
}

#[cfg(feature = "matrix")]
#[test]
fn test_nalgebra_agrees_with_native() {
    use approx::assert_relative_eq;
    use fitmin_rs::matrix::NalgebraCholesky;

    for n in 1..8 {
        let matrix = positive_definite(n);
        let native = cholesky_decomposition(&matrix).unwrap();
        let other = cholesky_decomposition_with(&NalgebraCholesky, &matrix).unwrap();
        for (a, b) in native.as_slice().iter().zip(other.as_slice()) {
            assert_relative_eq!(a, b, epsilon = 1e-10);
        }
    }
    let not_pd = PackedSymmetricMatrix::from_packed(vec![1.0, 0.0, -1.0]).unwrap();
    assert!(cholesky_decomposition_with(&NalgebraCholesky, &not_pd).is_none());
}
