use approx::assert_relative_eq;
use fitmin_rs::error::FitMinError;
use fitmin_rs::interpolate::{read_vectors, InterpolationError, InterpolationMethod, Interpolator};
use std::io::Cursor;

const TABLE: &str = "\
# energy  yield  extra
0.0   1.0   9
1.0   2.0   9

2.0   0.0   9
4.0   4.0   9
";

#[test]
fn test_interpolator_from_table() {
    let linear = Interpolator::from_reader(Cursor::new(TABLE), InterpolationMethod::Linear).unwrap();
    assert_eq!(linear.method(), InterpolationMethod::Linear);
    assert_relative_eq!(linear.eval(0.5), 1.5);
    assert_relative_eq!(linear.eval(3.0), 2.0);
    assert_eq!(linear.eval(-1.0), 1.0);
    assert_eq!(linear.eval(10.0), 4.0);

    let spline =
        Interpolator::from_reader(Cursor::new(TABLE), InterpolationMethod::CubicSpline).unwrap();
    for (x, y) in [(0.0, 1.0), (1.0, 2.0), (2.0, 0.0), (4.0, 4.0)] {
        assert_relative_eq!(spline.eval(x), y, epsilon = 1e-12);
    }
}

#[test]
fn test_read_all_columns() {
    let columns = read_vectors(Cursor::new(TABLE), 3, false).unwrap();
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[2], vec![9.0; 4]);
}

#[test]
fn test_method_names() {
    for method in [InterpolationMethod::Linear, InterpolationMethod::CubicSpline] {
        assert_eq!(method.to_string().parse::<InterpolationMethod>().unwrap(), method);
    }
    assert_eq!(
        "polynomial".parse::<InterpolationMethod>(),
        Err(InterpolationError::UnknownMethod("polynomial".to_string()))
    );
}

#[test]
fn test_bad_tables() {
    let unsorted = "0 1\n2 2\n1 3\n";
    assert!(matches!(
        Interpolator::from_reader(Cursor::new(unsorted), InterpolationMethod::Linear),
        Err(FitMinError::Interpolation(InterpolationError::NotIncreasing { index: 2 }))
    ));

    let short = "0 1\n1\n";
    assert!(matches!(
        Interpolator::from_reader(Cursor::new(short), InterpolationMethod::Linear),
        Err(FitMinError::Parse(_))
    ));

    let single = "0 1\n";
    assert!(matches!(
        Interpolator::from_reader(Cursor::new(single), InterpolationMethod::Linear),
        Err(FitMinError::Interpolation(InterpolationError::TooFewPoints { .. }))
    ));
}
