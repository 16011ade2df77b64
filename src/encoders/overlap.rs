// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The 'overlap' algorithm: consecutive windows of one residue class share
//! all but one sample, so their rank vectors are updated instead of recomputed.

use ndarray::{Array1, ArrayBase, Data, Ix1};

use super::contiguous;
use super::rank::compose;
use crate::error::Result;
use crate::validation::{check_encoding_args, check_finite};

/// Largest order supported by the overlap algorithm.
pub const MAX_ORDER: usize = 20;

/// Per-residue-class rank counts for the overlap algorithm.
///
/// Holds `lag` buffers of `order - 1` counts in one flat arena. The buffer for
/// window `k` is `k % lag`; the cursor walks the arena in that order.
#[derive(Debug, Clone)]
pub struct RollingRankState {
    counts: Vec<u8>,
    width: usize,
    lag: usize,
    cursor: usize,
}

impl RollingRankState {
    /// Create zeroed buffers for the given order and lag.
    pub fn new(order: usize, lag: usize) -> Self {
        let width = order - 1;
        Self {
            counts: vec![0u8; width * lag],
            width,
            lag,
            cursor: 0,
        }
    }

    /// Load each residue class with the comparison counts among the first
    /// `order - 1` samples of its first window.
    ///
    /// Counts are stored one slot to the right so that the shift performed by
    /// [`advance`](Self::advance) lines them up with the window's positions.
    pub fn seed(&mut self, x: &[f64]) {
        let (width, lag) = (self.width, self.lag);
        self.counts.fill(0);
        for pos in 0..lag {
            let buf = &mut self.counts[pos * width..(pos + 1) * width];
            for i in 0..width.saturating_sub(1) {
                let pivot = x[pos + i * lag];
                for j in (i + 1)..width {
                    buf[i + 1] += (pivot > x[pos + j * lag]) as u8;
                }
            }
        }
        self.cursor = 0;
    }

    /// Update the current buffer with the window starting at `x[0]` and
    /// return its pattern code. Moves the cursor to the next residue class.
    #[inline]
    pub fn advance(&mut self, x: &[f64]) -> u64 {
        let (width, lag) = (self.width, self.lag);
        let buf = &mut self.counts[self.cursor * width..(self.cursor + 1) * width];
        buf.copy_within(1.., 0);
        buf[width - 1] = 0;

        let newest = x[width * lag];
        for (i, count) in buf.iter_mut().enumerate() {
            *count += (x[i * lag] > newest) as u8;
        }
        let code = compose(buf);

        self.cursor += 1;
        if self.cursor == lag {
            self.cursor = 0;
        }
        code
    }

    /// Rank vector currently held by the buffer of residue class `class`.
    pub fn ranks(&self, class: usize) -> &[u8] {
        &self.counts[class * self.width..(class + 1) * self.width]
    }
}

/// Encode all windows of `x` into `out` without validating anything.
pub fn encode_overlap_into(x: &[f64], order: usize, lag: usize, out: &mut [u64]) {
    let n_pat = x.len() - (order - 1) * lag;
    let mut state = RollingRankState::new(order, lag);
    state.seed(x);
    for (k, code) in out[..n_pat].iter_mut().enumerate() {
        *code = state.advance(&x[k..]);
    }
}

/// Extract and encode ordinal patterns using the 'overlap' algorithm.
///
/// Produces exactly the codes of [`encode_plain`](super::plain::encode_plain)
/// at O(order) cost per window.
pub fn encode_overlap<S>(
    series: &ArrayBase<S, Ix1>,
    order: usize,
    lag: usize,
) -> Result<Array1<u64>>
where
    S: Data<Elem = f64>,
{
    let n_pat = check_encoding_args(series.len(), order, lag, MAX_ORDER)?;
    check_finite(series)?;
    let x = contiguous(series);
    let mut out = Array1::<u64>::zeros(n_pat);
    if let Some(buf) = out.as_slice_mut() {
        encode_overlap_into(&x, order, lag, buf);
    }
    Ok(out)
}
