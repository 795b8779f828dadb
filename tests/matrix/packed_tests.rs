//! Tests for the packed upper-triangle layout

use fitmin_rs::error::FitMinError;
use fitmin_rs::matrix::{dimension_from_packed_len, packed_index, packed_len, PackedSymmetricMatrix};
use ndarray::arr2;

#[test]
fn test_packed_index_is_a_bijection() {
    for n in 0..12 {
        let len = packed_len(n);
        let mut hits = vec![0usize; len];
        for j in 0..n {
            for i in 0..=j {
                hits[packed_index(i, j)] += 1;
            }
        }
        assert!(hits.iter().all(|&h| h == 1), "n = {}", n);
    }
}

#[test]
fn test_dimension_from_packed_len() {
    for n in 0..20 {
        assert_eq!(dimension_from_packed_len(packed_len(n)).unwrap(), n);
    }
    for len in [2, 4, 5, 7, 8, 9, 11] {
        assert!(matches!(
            dimension_from_packed_len(len),
            Err(FitMinError::InvalidPackedLength(l)) if l == len
        ));
    }
}

#[test]
fn test_full_roundtrip() {
    let full = arr2(&[[4.0, 2.0, 0.4], [2.0, 5.0, 1.0], [0.4, 1.0, 3.0]]);
    let packed = PackedSymmetricMatrix::from_full(&full).unwrap();
    assert_eq!(packed.as_slice(), &[4.0, 2.0, 5.0, 0.4, 1.0, 3.0]);
    assert_eq!(packed.to_full(), full);
    assert_eq!(packed.get(2, 0), packed.get(0, 2));
    assert_eq!(packed.diagonal(), vec![4.0, 5.0, 3.0]);
}

#[test]
fn test_invalid_shapes_are_rejected() {
    assert!(PackedSymmetricMatrix::from_packed(vec![1.0, 2.0]).is_err());
    assert!(PackedSymmetricMatrix::with_dimension(3, vec![1.0; 3]).is_err());
    assert!(PackedSymmetricMatrix::from_full(&arr2(&[[1.0, 2.0], [3.0, 4.0]])).is_err());
    assert!(PackedSymmetricMatrix::from_full(&arr2(&[[1.0, 2.0, 3.0]])).is_err());
}

#[test]
fn test_from_errors_is_diagonal() {
    let m = PackedSymmetricMatrix::from_errors(&[2.0, -3.0]);
    assert_eq!(m.dim(), 2);
    assert_eq!(m.get(0, 0), 4.0);
    assert_eq!(m.get(1, 1), 9.0);
    assert_eq!(m.get(0, 1), 0.0);
    assert_eq!(PackedSymmetricMatrix::identity(2).as_slice(), &[1.0, 0.0, 1.0]);
}
