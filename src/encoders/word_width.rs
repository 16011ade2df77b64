// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage widths of pattern codes.

use crate::encoders::rank::FACTORIALS;
use crate::error::Result;
use crate::validation::check_order;

/// Largest order for which [`pattern_word_size`] is defined.
pub const MAX_WORD_ORDER: usize = 20;

/// Largest order for which [`pattern_uint64_width`] is defined.
pub const MAX_MULTIWORD_ORDER: usize = 255;

/// Machine word size in bits (8, 16, 32 or 64) able to hold every code of
/// order `order` in `[2, 20]`.
pub fn pattern_word_size(order: usize) -> Result<u32> {
    check_order(order, MAX_WORD_ORDER)?;
    let max_code = FACTORIALS[order] - 1;
    let bits = u64::BITS - max_code.leading_zeros();
    Ok(bits.next_power_of_two().max(8))
}

/// Number of 64-bit words needed to store a code of order `order` in `[2, 255]`.
pub fn pattern_uint64_width(order: usize) -> Result<usize> {
    check_order(order, MAX_MULTIWORD_ORDER)?;

    // order! as little-endian 64-bit limbs
    let mut limbs: Vec<u64> = vec![1];
    for k in 2..=order as u64 {
        let mut carry = 0u128;
        for limb in limbs.iter_mut() {
            let wide = (*limb as u128) * (k as u128) + carry;
            *limb = wide as u64;
            carry = wide >> 64;
        }
        if carry != 0 {
            limbs.push(carry as u64);
        }
    }

    // largest code is order! - 1
    for limb in limbs.iter_mut() {
        let (value, borrow) = limb.overflowing_sub(1);
        *limb = value;
        if !borrow {
            break;
        }
    }

    while limbs.len() > 1 && limbs.last() == Some(&0) {
        limbs.pop();
    }
    Ok(limbs.len())
}
