use ndarray::array;
use ordpat::{Algorithm, Error, GlobalValue, LocalValues, PermutationEntropy};

use crate::test_helpers::{assert_abs_diff_eq, generate_gaussian_series, generate_tied_series};

#[test]
fn permutation_entropy_two_balanced_patterns() {
    // codes [0, 0, 1, 1]
    let pe = PermutationEntropy::new(array![1.0, 2.0, 3.0, 2.0, 1.0], 2, 1).unwrap();
    assert_eq!(pe.codes().to_vec(), vec![0, 0, 1, 1]);
    assert_eq!(pe.num_patterns(), 2);
    assert_abs_diff_eq!(pe.global_value(), 2.0_f64.ln(), epsilon = 1e-12);
    assert_abs_diff_eq!(pe.normalized(), 1.0, epsilon = 1e-12);
}

#[test]
fn permutation_entropy_monotone_series_is_zero() {
    let x = ndarray::Array1::from_iter((0..50).map(|v| v as f64));
    for order in 2..=6 {
        let pe = PermutationEntropy::new(x.clone(), order, 1).unwrap();
        assert_eq!(pe.num_patterns(), 1);
        assert_abs_diff_eq!(pe.global_value(), 0.0, epsilon = 1e-12);
        assert!(pe.local_values().iter().all(|&v| v.abs() < 1e-12));
    }
}

#[test]
fn permutation_entropy_local_mean_equals_global() {
    let x = generate_gaussian_series(1000, 42);
    for order in [3, 4, 5] {
        for lag in [1, 2] {
            let pe = PermutationEntropy::new(x.clone(), order, lag).unwrap();
            let local = pe.local_values();
            assert_eq!(local.len(), 1000 - (order - 1) * lag);
            assert_abs_diff_eq!(pe.global_from_local(), pe.global_value(), epsilon = 1e-10);
        }
    }
}

#[test]
fn permutation_entropy_is_bounded() {
    let x = generate_gaussian_series(5000, 3);
    for order in 2..=6 {
        let pe = PermutationEntropy::new(x.clone(), order, 1).unwrap();
        let h = pe.global_value();
        assert!(h > 0.0);
        assert!(pe.normalized() <= 1.0 + 1e-12);
        // white noise visits nearly every pattern
        assert!(pe.normalized() > 0.9, "order={order}, h={h}");
    }
}

#[test]
fn permutation_entropy_independent_of_algorithm() {
    let x = generate_tied_series(400, 4, 5);
    let reference = PermutationEntropy::new(x.clone(), 4, 2).unwrap();
    for algorithm in [
        Algorithm::Plain,
        Algorithm::Overlap,
        Algorithm::Lookup,
        Algorithm::Vectorised,
    ] {
        let pe = PermutationEntropy::with_algorithm(x.clone(), 4, 2, Some(algorithm)).unwrap();
        assert_eq!(pe.codes(), reference.codes());
        assert_abs_diff_eq!(pe.global_value(), reference.global_value(), epsilon = 1e-12);
    }
    assert_eq!(reference.order(), 4);
    assert_eq!(reference.lag(), 2);
}

#[test]
fn permutation_entropy_rejects_invalid_input() {
    assert_eq!(
        PermutationEntropy::new(array![1.0, 2.0], 3, 1).err(),
        Some(Error::InputTooShort {
            required: 3,
            actual: 2
        })
    );
    assert!(matches!(
        PermutationEntropy::new(array![1.0, 2.0, 3.0], 1, 1),
        Err(Error::InvalidOrder { .. })
    ));
    assert!(matches!(
        PermutationEntropy::new(array![1.0, f64::NAN, 3.0], 2, 1),
        Err(Error::NonFiniteSample { index: 1 })
    ));
}
