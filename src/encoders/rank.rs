// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rank vectors and their mixed-radix composition into pattern codes.
//!
//! A window `(x_0, …, x_{m-1})` is summarised by its rank vector
//! `rank_i = |{ j > i : x_i > x_j }|` for `i = 0..m-1`. The pattern code is
//! the Horner composition of that vector with radixes `m-1, m-2, …, 1`,
//! i.e. its value in the factorial number system.

/// Largest order whose codes fit into a `u64` (20! - 1 < 2^64).
pub const MAX_U64_ORDER: usize = 20;

/// Factorials from 0! to 20!.
pub const FACTORIALS: [u64; MAX_U64_ORDER + 1] = [
    1,
    1,
    2,
    6,
    24,
    120,
    720,
    5040,
    40320,
    362880,
    3628800,
    39916800,
    479001600,
    6227020800,
    87178291200,
    1307674368000,
    20922789888000,
    355687428096000,
    6402373705728000,
    121645100408832000,
    2432902008176640000,
];

/// Return `n!` for `n <= 20`, `None` otherwise.
pub fn factorial(n: usize) -> Option<u64> {
    FACTORIALS.get(n).copied()
}

/// Compute the rank vector of a window.
///
/// The returned vector has `window.len() - 1` entries; an empty or
/// single-sample window yields an empty vector. Equal samples never count as
/// greater.
pub fn rank_vector(window: &[f64]) -> Vec<u8> {
    let m = window.len();
    if m < 2 {
        return Vec::new();
    }
    let mut ranks = vec![0u8; m - 1];
    for i in 0..m - 1 {
        let mut c = 0u8;
        for j in (i + 1)..m {
            if window[i] > window[j] {
                c += 1;
            }
        }
        ranks[i] = c;
    }
    ranks
}

/// Compose a pattern code from a rank vector using the Horner rule.
///
/// `ranks` holds `rank_0 … rank_{m-2}` of a window of order `m = ranks.len() + 1`.
/// Entries are not range checked; out-of-range ranks produce codes outside
/// `[0, m!)`.
pub fn compose(ranks: &[u8]) -> u64 {
    let len = ranks.len();
    let mut code = 0u64;
    for (i, &r) in ranks.iter().enumerate() {
        code = (code + r as u64) * (len - i) as u64;
    }
    code
}

/// Split a pattern code of order `order` back into its rank vector.
///
/// Inverse of [`compose`] for codes in `[0, order!)`; panics if `order > 20`.
pub fn decompose(code: u64, order: usize) -> Vec<u8> {
    assert!(
        order <= MAX_U64_ORDER,
        "For embedding dimensions larger than 20, the integer will be too large for u64."
    );
    if order < 2 {
        return Vec::new();
    }
    let mut ranks = vec![0u8; order - 1];
    let mut rest = code;
    for i in 0..order - 1 {
        let weight = FACTORIALS[order - 1 - i];
        ranks[i] = (rest / weight) as u8;
        rest %= weight;
    }
    ranks
}

/// Rebuild the permutation of `0..order` whose pattern code is `code`.
///
/// Element `i` of the result is the relative size of the `i`-th sample; feeding
/// the result (as `f64`) to the naive encoder yields `code` again.
pub fn permutation_from_code(code: u64, order: usize) -> Vec<usize> {
    let ranks = decompose(code, order);
    let mut available: Vec<usize> = (0..order).collect();
    let mut perm = Vec::with_capacity(order);
    for &r in ranks.iter() {
        // rank_i later samples are smaller, so pick the rank_i-th smallest remaining value
        perm.push(available.remove(r as usize));
    }
    if let Some(last) = available.pop() {
        perm.push(last);
    }
    perm
}
