// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Ordinal pattern encoders.
// All algorithms produce identical codes; they differ in cost and maximum order.

pub mod lookup;
pub mod overlap;
pub mod plain;
pub mod rank;
pub mod vectorised;
pub mod word_width;

use std::borrow::Cow;

use ndarray::{ArrayBase, Data, Ix1};

pub use lookup::{TransitionTable, encode_lookup, encode_lookup_into};
pub use overlap::{RollingRankState, encode_overlap, encode_overlap_into};
pub use plain::{encode_pattern, encode_pattern_strided, encode_plain, encode_plain_into};
pub use rank::{compose, factorial, rank_vector};
pub use vectorised::{BatchEncoder, ExecutionPlan, PlanCache, encode_vectorised};
pub use word_width::{pattern_uint64_width, pattern_word_size};

/// Borrow the samples of a 1-D array as a slice, copying only if it is strided.
pub(crate) fn contiguous<S>(series: &ArrayBase<S, Ix1>) -> Cow<'_, [f64]>
where
    S: Data<Elem = f64>,
{
    match series.as_slice() {
        Some(x) => Cow::Borrowed(x),
        None => Cow::Owned(series.to_vec()),
    }
}
