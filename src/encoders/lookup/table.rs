// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transition tables for the 'lookup' algorithm.
//!
//! Entry `(c, r)` is the code of the window that follows a window with code
//! `c` when the new sample is exceeded by exactly `r` of the `order - 1`
//! retained samples. The retained samples of a window with code `c` have the
//! order-`(order-1)` code `c mod (order-1)!`, so only `(order-1)! * order`
//! entries are distinct; the table repeats that block `order` times.

use log::debug;
use ndarray::Array2;

use crate::encoders::rank::{FACTORIALS, decompose, permutation_from_code};
use crate::error::{Error, Result};
use crate::validation::check_order;

/// Largest order for which a table can be built. An order-11 table would need
/// more than 3 GiB.
pub const MAX_TABLE_ORDER: usize = 10;

/// Dense `[order!, order]` table of pattern codes, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    order: usize,
    codes: Vec<u64>,
}

impl TransitionTable {
    /// Build the transition table for `order` in `[2, 10]`.
    ///
    /// Fails with [`Error::InvalidOrder`] before allocating anything when the
    /// order is out of range.
    pub fn build(order: usize) -> Result<Self> {
        check_order(order, MAX_TABLE_ORDER)?;

        let n_rows = FACTORIALS[order];
        let n_tails = FACTORIALS[order - 1] as usize;
        let block = n_tails * order;
        debug!(
            "building transition table: order={order}, rows={n_rows}, bytes={}",
            n_rows as usize * order * std::mem::size_of::<u64>()
        );

        let mut codes: Vec<u64> = Vec::with_capacity(n_rows as usize * order);
        let width = order - 1;
        for tail in 0..n_tails as u64 {
            // relative sizes (0..order-1) and rank digits of the retained samples
            let values = permutation_from_code(tail, width);
            let digits = decompose(tail, width);
            for r in 0..order {
                // exactly the r largest retained samples exceed the new one
                let threshold = width - r;
                let mut code = 0u64;
                for i in 0..width {
                    let carried = digits.get(i).copied().unwrap_or(0) as u64;
                    let rank = carried + (values[i] >= threshold) as u64;
                    code = (code + rank) * (width - i) as u64;
                }
                codes.push(code);
            }
        }
        for _ in 1..order {
            codes.extend_from_within(0..block);
        }

        Ok(Self { order, codes })
    }

    /// Wrap an externally supplied row-major table of `order! * order` codes.
    ///
    /// Fails with [`Error::InvalidTable`] if the length does not match or any
    /// code is `>= order!`.
    pub fn from_vec(order: usize, codes: Vec<u64>) -> Result<Self> {
        check_order(order, MAX_TABLE_ORDER)?;
        let n_rows = FACTORIALS[order];
        let expected = n_rows as usize * order;
        if codes.len() != expected {
            return Err(Error::InvalidTable {
                reason: format!(
                    "expected {expected} entries for order {order}, got {}",
                    codes.len()
                ),
            });
        }
        if let Some(pos) = codes.iter().position(|&c| c >= n_rows) {
            return Err(Error::InvalidTable {
                reason: format!(
                    "entry {pos} holds code {} which is not below {order}! = {n_rows}",
                    codes[pos]
                ),
            });
        }
        Ok(Self { order, codes })
    }

    /// Wrap an `[order!, order]` array; the order is taken from the column count.
    pub fn from_array(table: Array2<u64>) -> Result<Self> {
        let (rows, cols) = table.dim();
        if !(2..=MAX_TABLE_ORDER).contains(&cols) || rows as u64 != FACTORIALS[cols] {
            return Err(Error::InvalidTable {
                reason: format!("table must have shape order! x order, got {rows} x {cols}"),
            });
        }
        Self::from_vec(cols, table.iter().copied().collect())
    }

    /// Pattern order the table was built for.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of rows, `order!`.
    pub fn num_rows(&self) -> usize {
        self.codes.len() / self.order
    }

    /// Code following a window with code `code` when `rank` retained samples
    /// exceed the new sample.
    #[inline]
    pub fn next(&self, code: u64, rank: usize) -> u64 {
        self.codes[code as usize * self.order + rank]
    }

    /// Row-major view of all entries.
    pub fn as_slice(&self) -> &[u64] {
        &self.codes
    }

    /// Copy the table into an `[order!, order]` array.
    pub fn to_array(&self) -> Result<Array2<u64>> {
        Ok(Array2::from_shape_vec(
            (self.num_rows(), self.order),
            self.codes.clone(),
        )?)
    }

    /// Memory occupied by the entries.
    pub fn size_in_bytes(&self) -> usize {
        self.codes.len() * std::mem::size_of::<u64>()
    }
}
