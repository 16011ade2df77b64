// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array2, array};
use ordpat::encoders::lookup::encode_lookup;
use ordpat::encoders::plain::encode_pattern;
use ordpat::encoders::rank::permutation_from_code;
use ordpat::{Error, TransitionTable};
use rand::Rng;

use crate::test_helpers::{
    SeedableRng, StdRng, factorial, generate_gaussian_series, generate_tied_series,
    reference_codes, shared_table,
};

/// Window that follows the permutation with code `code` when exactly `rank`
/// retained samples exceed the new sample.
fn successor_window(code: u64, order: usize, rank: usize) -> Vec<f64> {
    let perm = permutation_from_code(code, order);
    let mut retained: Vec<f64> = perm[1..].iter().map(|&v| v as f64).collect();
    let mut sorted = retained.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let width = order - 1;
    let newest = if rank == width {
        sorted[0] - 1.0
    } else {
        sorted[width - 1 - rank] + 0.5
    };
    retained.push(newest);
    retained
}

fn check_entry(table: &TransitionTable, code: u64, rank: usize) {
    let order = table.order();
    let expected = encode_pattern(&successor_window(code, order, rank));
    assert_eq!(
        table.next(code, rank),
        expected,
        "order={order}, code={code}, rank={rank}"
    );
}

#[test]
fn table_invariant_exhaustive() {
    for order in 2..=8 {
        let table = shared_table(order);
        assert_eq!(table.num_rows() as u64, factorial(order));
        for code in 0..factorial(order) {
            for rank in 0..order {
                check_entry(table, code, rank);
            }
        }
    }
}

#[test]
fn table_invariant_sampled_orders_9_and_10() {
    let mut rng = StdRng::seed_from_u64(1010);
    for order in [9, 10] {
        let table = shared_table(order);
        for _ in 0..5000 {
            let code = rng.gen_range(0..factorial(order));
            let rank = rng.gen_range(0..order);
            check_entry(table, code, rank);
        }
        // first and last rows
        for rank in 0..order {
            check_entry(table, 0, rank);
            check_entry(table, factorial(order) - 1, rank);
        }
    }
}

#[test]
fn table_order2_contents() {
    let table = shared_table(2);
    assert_eq!(table.as_slice(), &[0, 1, 0, 1]);
    assert_eq!(table.to_array().unwrap(), array![[0u64, 1], [0, 1]]);
}

#[test]
fn table_entries_below_factorial() {
    for order in 2..=7 {
        let table = shared_table(order);
        assert!(table.as_slice().iter().all(|&c| c < factorial(order)));
    }
}

#[test]
fn table_order10_footprint() {
    let table = shared_table(10);
    assert_eq!(table.size_in_bytes(), 290_304_000);
    assert_eq!(table.num_rows(), 3_628_800);
    assert_eq!(table.as_slice().len(), 3_628_800 * 10);
}

#[test]
fn table_rejects_out_of_range_orders() {
    assert_eq!(
        TransitionTable::build(11),
        Err(Error::InvalidOrder {
            order: 11,
            min: 2,
            max: 10
        })
    );
    assert!(matches!(
        TransitionTable::build(1),
        Err(Error::InvalidOrder { order: 1, .. })
    ));
}

#[test]
fn table_from_vec_round_trip_and_validation() {
    let built = shared_table(4).clone();
    let wrapped = TransitionTable::from_vec(4, built.as_slice().to_vec()).unwrap();
    assert_eq!(wrapped, built);

    let short = built.as_slice()[..10].to_vec();
    assert!(matches!(
        TransitionTable::from_vec(4, short),
        Err(Error::InvalidTable { .. })
    ));

    let mut bad = built.as_slice().to_vec();
    bad[5] = 24;
    assert!(matches!(
        TransitionTable::from_vec(4, bad),
        Err(Error::InvalidTable { .. })
    ));
}

#[test]
fn table_from_array_validation() {
    let built = shared_table(3);
    let arr = built.to_array().unwrap();
    assert_eq!(arr.dim(), (6, 3));
    assert_eq!(&TransitionTable::from_array(arr).unwrap(), built);

    let wrong_rows = Array2::<u64>::zeros((5, 3));
    assert!(matches!(
        TransitionTable::from_array(wrong_rows),
        Err(Error::InvalidTable { .. })
    ));
    let too_wide = Array2::<u64>::zeros((2, 11));
    assert!(matches!(
        TransitionTable::from_array(too_wide),
        Err(Error::InvalidTable { .. })
    ));
}

#[test]
fn lookup_concrete_order3_example() {
    let x = array![3.0, 1.0, 2.0, 5.0, 4.0, 6.0];
    let codes = encode_lookup(&x, 3, 1, shared_table(3)).unwrap();
    assert_eq!(codes, array![4u64, 0, 1, 2]);
}

#[test]
fn lookup_matches_reference() {
    let x = generate_gaussian_series(500, 8);
    let t = generate_tied_series(500, 4, 8);
    for order in 2..=8 {
        for lag in 1..=5 {
            for series in [&x, &t] {
                let codes = encode_lookup(series, order, lag, shared_table(order)).unwrap();
                let expected = reference_codes(series.as_slice().unwrap(), order, lag);
                assert_eq!(codes.to_vec(), expected, "order={order}, lag={lag}");
            }
        }
    }
}

#[test]
fn lookup_fewer_patterns_than_lag() {
    // 3 windows, lag 5: every code comes from direct encoding
    let x = generate_gaussian_series(13, 4);
    let codes = encode_lookup(&x, 3, 5, shared_table(3)).unwrap();
    assert_eq!(codes.len(), 3);
    assert_eq!(codes.to_vec(), reference_codes(x.as_slice().unwrap(), 3, 5));
}

#[test]
fn lookup_rejects_mismatched_table() {
    let x = generate_gaussian_series(50, 4);
    assert!(matches!(
        encode_lookup(&x, 5, 1, shared_table(4)),
        Err(Error::InvalidTable { .. })
    ));
    assert!(matches!(
        encode_lookup(&x, 11, 1, shared_table(4)),
        Err(Error::InvalidOrder { order: 11, .. })
    ));
}
