// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boundary checks shared by every validated entry point.

use ndarray::{ArrayBase, Axis, Data, Dimension};

use crate::error::{Error, Result};

/// Smallest pattern order accepted by any algorithm.
pub const MIN_ORDER: usize = 2;

/// Check that `order` lies in `[2, max_order]`.
pub fn check_order(order: usize, max_order: usize) -> Result<()> {
    if order < MIN_ORDER || order > max_order {
        return Err(Error::InvalidOrder {
            order,
            min: MIN_ORDER,
            max: max_order,
        });
    }
    Ok(())
}

/// Check that `lag` is positive.
pub fn check_lag(lag: usize) -> Result<()> {
    if lag < 1 {
        return Err(Error::InvalidLag { lag });
    }
    Ok(())
}

/// Number of ordinal patterns a series of length `n` yields, zero if it is too short.
pub fn sequence_length(n: usize, order: usize, lag: usize) -> usize {
    let span = order.saturating_sub(1).saturating_mul(lag);
    n.saturating_sub(span)
}

/// Number of ordinal patterns a series of length `n` yields.
///
/// Fails with [`Error::InputTooShort`] when not even one window fits.
pub fn check_length(n: usize, order: usize, lag: usize) -> Result<usize> {
    let n_pat = sequence_length(n, order, lag);
    if n_pat == 0 {
        return Err(Error::InputTooShort {
            required: (order - 1) * lag + 1,
            actual: n,
        });
    }
    Ok(n_pat)
}

/// Validate order, lag and length in one go and return the output length.
pub fn check_encoding_args(n: usize, order: usize, lag: usize, max_order: usize) -> Result<usize> {
    check_order(order, max_order)?;
    check_lag(lag)?;
    check_length(n, order, lag)
}

/// Ensure every sample is finite.
pub fn check_finite<S, D>(x: &ArrayBase<S, D>) -> Result<()>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    match x.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(Error::NonFiniteSample { index }),
        None => Ok(()),
    }
}

/// Resolve a possibly negative axis index against `ndim` dimensions.
pub fn resolve_axis(axis: isize, ndim: usize) -> Result<Axis> {
    let resolved = if axis < 0 {
        ndim as isize + axis
    } else {
        axis
    };
    if resolved < 0 || resolved as usize >= ndim {
        return Err(Error::InvalidAxis { axis, ndim });
    }
    Ok(Axis(resolved as usize))
}
