// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # ordpat
//!
//! Extraction and encoding of ordinal patterns from time series.
//!
//! An ordinal pattern of order `m` describes the relative ordering of the `m`
//! samples `x[k], x[k+τ], …, x[k+(m-1)τ]`. Each pattern is encoded as an
//! integer in `[0, m!)`, so a series of length `n` becomes a sequence of
//! `n - (m-1)τ` codes that drives symbolic analyses such as permutation entropy.
//!
//! ## Quick Start
//!
//! ```rust
//! use ordpat::ordpat;
//! use ndarray::array;
//!
//! let x = array![3.0, 1.0, 2.0, 5.0, 4.0, 6.0];
//! let codes = ordpat(&x, 3, 1).unwrap();
//! assert_eq!(codes.as_slice().unwrap(), &[4, 0, 1, 2]);
//! ```
//!
//! ## Algorithms
//!
//! | Algorithm | Max order | Cost per pattern | State |
//! |-----------|-----------|------------------|-------|
//! | `plain` | 20 | O(m²) | none |
//! | `overlap` | 20 | O(m) | `lag` rank buffers |
//! | `lookup` | 10 | O(m), one table read | `m! × m` transition table |
//! | `vectorised` | 20 | O(m²), whole-array passes | cached execution plan |
//!
//! All algorithms yield identical codes. Orders beyond 20 need a
//! [`NativeBackend`](ordpat::NativeBackend).
//!
//! Equal samples never count as "greater", so ties are ordered by position.
//!
//! ## Feature Flags
//!
//! - `parallel`: encode independent lanes of n-dimensional inputs with rayon
//!
//! ## Reference
//!
//! Berger S, Kravtsiv A, Schneider G, Jordan D. Teaching Ordinal Patterns to a
//! Computer. Entropy. 2019; 21(10):1023.

pub mod encoders;
pub mod entropy;
pub mod error;
pub mod ordpat;
pub mod traits;
pub mod validation;

pub use encoders::{
    BatchEncoder, ExecutionPlan, PlanCache, RollingRankState, TransitionTable, encode_lookup,
    encode_overlap, encode_plain, encode_vectorised, pattern_uint64_width, pattern_word_size,
};
pub use entropy::PermutationEntropy;
pub use error::{Error, Result};
pub use ordpat::{Algorithm, NativeBackend, Ordpat, encode_series, ordpat};
pub use traits::{GlobalValue, LocalValues};
