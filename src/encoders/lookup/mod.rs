// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The 'lookup' algorithm: after `lag` directly encoded windows, every code
//! follows from the code `lag` steps earlier and the rank of the new sample.

pub mod table;

use ndarray::{Array1, ArrayBase, Data, Ix1};

pub use table::{MAX_TABLE_ORDER, TransitionTable};

use super::contiguous;
use super::plain::encode_pattern_strided;
use crate::error::{Error, Result};
use crate::validation::{check_encoding_args, check_finite};

/// Largest order supported by the lookup algorithm.
pub const MAX_ORDER: usize = MAX_TABLE_ORDER;

/// Encode all windows of `x` into `out` without validating the arguments.
///
/// `table` must have been built for `order`; a table for another order makes
/// the lookups panic or produce meaningless codes.
pub fn encode_lookup_into(
    x: &[f64],
    order: usize,
    lag: usize,
    table: &TransitionTable,
    out: &mut [u64],
) {
    let span = (order - 1) * lag;
    let n_pat = x.len() - span;

    for k in 0..lag.min(n_pat) {
        out[k] = encode_pattern_strided(&x[k..], order, lag);
    }

    for k in lag..n_pat {
        let newest = x[k + span];
        let mut rank = 0usize;
        for i in 0..order - 1 {
            rank += (x[k + i * lag] > newest) as usize;
        }
        out[k] = table.next(out[k - lag], rank);
    }
}

/// Extract and encode ordinal patterns using the 'lookup' algorithm.
///
/// # Arguments
///
/// * `series` - One-dimensional time series of finite samples
/// * `order` - Pattern order between 2 and 10
/// * `lag` - Time lag, at least 1
/// * `table` - Transition table for `order`, see [`TransitionTable::build`]
///
/// Fails with [`Error::InvalidTable`] when the table was made for another order.
pub fn encode_lookup<S>(
    series: &ArrayBase<S, Ix1>,
    order: usize,
    lag: usize,
    table: &TransitionTable,
) -> Result<Array1<u64>>
where
    S: Data<Elem = f64>,
{
    let n_pat = check_encoding_args(series.len(), order, lag, MAX_ORDER)?;
    if table.order() != order {
        return Err(Error::InvalidTable {
            reason: format!(
                "table was built for order {}, but order {order} was requested",
                table.order()
            ),
        });
    }
    check_finite(series)?;
    let x = contiguous(series);
    let mut out = Array1::<u64>::zeros(n_pat);
    if let Some(buf) = out.as_slice_mut() {
        encode_lookup_into(&x, order, lag, table, buf);
    }
    Ok(out)
}
