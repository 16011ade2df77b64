// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ordpat::encoders::plain::encode_pattern;
use ordpat::encoders::rank::{
    FACTORIALS, compose, decompose, factorial, permutation_from_code, rank_vector,
};

use crate::test_helpers::factorial as slow_factorial;

#[test]
fn test_rank_vector_counts_later_smaller_samples() {
    assert_eq!(rank_vector(&[3.0, 1.0, 2.0]), vec![2, 0]);
    assert_eq!(rank_vector(&[1.0, 2.0, 3.0, 4.0]), vec![0, 0, 0]);
    assert_eq!(rank_vector(&[4.0, 3.0, 2.0, 1.0]), vec![3, 2, 1]);
    // equal samples never count as greater
    assert_eq!(rank_vector(&[1.0, 1.0, 1.0]), vec![0, 0]);
    assert!(rank_vector(&[]).is_empty());
    assert!(rank_vector(&[42.0]).is_empty());
}

#[test]
fn test_adjacent_swaps_give_factorial_codes() {
    let code = |perm: &[usize]| {
        let window: Vec<f64> = perm.iter().map(|&v| v as f64).collect();
        encode_pattern(&window)
    };
    assert_eq!(code(&[1, 0]), 1);
    assert_eq!(code(&[0, 1, 2, 3, 4, 5, 7, 6]), 1);
    assert_eq!(code(&[0, 1, 2, 3, 4, 6, 5, 7]), 2);
    assert_eq!(code(&[0, 1, 2, 3, 5, 4, 6, 7]), 6);
    assert_eq!(code(&[0, 1, 2, 4, 3, 5, 6, 7]), 24);
    assert_eq!(code(&[0, 1, 3, 2, 4, 5, 6, 7]), 120);
}

#[test]
fn test_compose_horner_rule() {
    // (0 + 2) * 2 = 4, (4 + 0) * 1 = 4
    assert_eq!(compose(&[2, 0]), 4);
    assert_eq!(compose(&[0, 0, 0]), 0);
    // reversed order of 4 samples is the largest code
    assert_eq!(compose(&[3, 2, 1]), 23);
    assert_eq!(compose(&[1]), 1);
    assert_eq!(compose(&[]), 0);
}

#[test]
fn test_decompose_inverts_compose() {
    for order in 2..=7 {
        for code in 0..FACTORIALS[order] {
            let ranks = decompose(code, order);
            assert_eq!(ranks.len(), order - 1);
            for (i, &r) in ranks.iter().enumerate() {
                assert!(r as usize <= order - 1 - i, "rank out of range for code {code}");
            }
            assert_eq!(compose(&ranks), code, "order={order}, code={code}");
        }
    }
}

#[test]
fn test_permutation_from_code_round_trip() {
    for order in 1..=7 {
        for code in 0..FACTORIALS[order] {
            let perm = permutation_from_code(code, order);
            let mut sorted = perm.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..order).collect::<Vec<_>>());
            let window: Vec<f64> = perm.iter().map(|&v| v as f64).collect();
            assert_eq!(encode_pattern(&window), code, "order={order}, code={code}");
        }
    }
}

#[test]
fn test_factorial_table() {
    for n in 0..=20 {
        assert_eq!(factorial(n), Some(slow_factorial(n)), "n={n}");
    }
    assert_eq!(factorial(21), None);
}

#[test]
#[should_panic(expected = "For embedding dimensions larger than 20")]
fn test_decompose_overflow_panic() {
    decompose(0, 21);
}
