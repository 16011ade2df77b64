// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use ndarray::Array1;

use crate::encoders::rank::factorial;
use crate::error::Result;
use crate::ordpat::{Algorithm, encode_series};
use crate::traits::{GlobalValue, LocalValues};

/// Permutation entropy of a 1-D time series.
///
/// The series is encoded into ordinal patterns of order `m` and lag `τ`; the
/// entropy is the Shannon entropy (natural log) of the empirical pattern
/// distribution. Local values are -ln p(pattern_t) for each window t, so their
/// mean equals the global value.
pub struct PermutationEntropy {
    codes: Array1<u64>,
    counts: HashMap<u64, usize>,
    order: usize,
    lag: usize,
}

impl PermutationEntropy {
    /// Encode `series` with the default algorithm and count the patterns.
    pub fn new(series: Array1<f64>, order: usize, lag: usize) -> Result<Self> {
        Self::with_algorithm(series, order, lag, None)
    }

    /// Same as [`new`](Self::new), with an explicit in-process algorithm.
    pub fn with_algorithm(
        series: Array1<f64>,
        order: usize,
        lag: usize,
        algorithm: Option<Algorithm>,
    ) -> Result<Self> {
        let codes = encode_series(&series, order, lag, algorithm)?;
        let mut counts: HashMap<u64, usize> = HashMap::new();
        for &c in codes.iter() {
            *counts.entry(c).or_insert(0) += 1;
        }
        Ok(Self {
            codes,
            counts,
            order,
            lag,
        })
    }

    pub fn codes(&self) -> &Array1<u64> {
        &self.codes
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Number of distinct patterns observed.
    pub fn num_patterns(&self) -> usize {
        self.counts.len()
    }

    /// Entropy divided by its maximum, ln(order!), giving a value in [0, 1].
    pub fn normalized(&self) -> f64 {
        let max = match factorial(self.order) {
            Some(f) => (f as f64).ln(),
            None => return 0.0,
        };
        self.global_value() / max
    }
}

impl GlobalValue for PermutationEntropy {
    fn global_value(&self) -> f64 {
        let n_f = self.codes.len() as f64;
        let mut h = 0.0_f64;
        for &cnt in self.counts.values() {
            let p = (cnt as f64) / n_f;
            h -= p * p.ln();
        }
        h
    }
}

impl LocalValues for PermutationEntropy {
    fn local_values(&self) -> Array1<f64> {
        let n_f = self.codes.len() as f64;
        self.codes.mapv(|c| {
            let p = self.counts.get(&c).copied().unwrap_or(0) as f64 / n_f;
            -p.ln()
        })
    }
}
