// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The 'plain' algorithm: every window is encoded from scratch.
//!
//! This is the reference semantics all other encoders are tested against.

use ndarray::{Array1, ArrayBase, Data, Ix1};

use super::contiguous;
use crate::error::Result;
use crate::validation::{check_encoding_args, check_finite};

/// Largest order supported by the plain algorithm.
pub const MAX_ORDER: usize = 20;

/// Encode a single window whose samples are stored contiguously.
///
/// `window.len()` is the pattern order and must not exceed 20.
pub fn encode_pattern(window: &[f64]) -> u64 {
    encode_pattern_strided(window, window.len(), 1)
}

/// Encode the window `x[0], x[lag], …, x[(order-1)*lag]`.
///
/// No argument checks are performed; `x` must hold at least
/// `(order - 1) * lag + 1` samples.
#[inline]
pub fn encode_pattern_strided(x: &[f64], order: usize, lag: usize) -> u64 {
    let mut code = 0u64;
    for i in 0..order.saturating_sub(1) {
        let pivot = x[i * lag];
        let mut count = 0u64;
        for j in (i + 1)..order {
            count += (pivot > x[j * lag]) as u64;
        }
        code = (code + count) * (order - 1 - i) as u64;
    }
    code
}

/// Encode all windows of `x` into `out` without validating anything.
///
/// `out` must hold at least `x.len() - (order - 1) * lag` elements.
pub fn encode_plain_into(x: &[f64], order: usize, lag: usize, out: &mut [u64]) {
    let n_pat = x.len() - (order - 1) * lag;
    for (k, code) in out[..n_pat].iter_mut().enumerate() {
        *code = encode_pattern_strided(&x[k..], order, lag);
    }
}

/// Extract and encode ordinal patterns using the 'plain' algorithm.
///
/// # Arguments
///
/// * `series` - One-dimensional time series of finite samples
/// * `order` - Pattern order between 2 and 20
/// * `lag` - Time lag, at least 1
///
/// # Returns
///
/// `series.len() - (order - 1) * lag` pattern codes in `[0, order!)`.
pub fn encode_plain<S>(series: &ArrayBase<S, Ix1>, order: usize, lag: usize) -> Result<Array1<u64>>
where
    S: Data<Elem = f64>,
{
    let n_pat = check_encoding_args(series.len(), order, lag, MAX_ORDER)?;
    check_finite(series)?;
    let x = contiguous(series);
    let mut out = Array1::<u64>::zeros(n_pat);
    if let Some(buf) = out.as_slice_mut() {
        encode_plain_into(&x, order, lag, buf);
    }
    Ok(out)
}
