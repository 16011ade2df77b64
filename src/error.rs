// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for ordinal pattern encoding.
//!
//! Every check runs at the boundary, before any computation starts. Once an
//! input has been validated the encoders cannot fail.

use thiserror::Error;

/// The error type returned by all validated encoding entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The pattern order lies outside the range supported by the algorithm.
    #[error("invalid order {order}: must be between {min} and {max}")]
    InvalidOrder {
        /// The order that was requested.
        order: usize,
        /// Smallest supported order.
        min: usize,
        /// Largest supported order.
        max: usize,
    },

    /// The time lag is not a positive integer.
    #[error("invalid lag {lag}: time lag must be positive")]
    InvalidLag {
        /// The lag that was requested.
        lag: usize,
    },

    /// The series is shorter than one embedding window.
    #[error("input too short: required at least {required} samples, got {actual}")]
    InputTooShort {
        /// Minimum number of samples, `(order - 1) * lag + 1`.
        required: usize,
        /// Number of samples along the encoded axis.
        actual: usize,
    },

    /// A transition table has the wrong shape or contains invalid codes.
    #[error("invalid transition table: {reason}")]
    InvalidTable {
        /// Description of the defect.
        reason: String,
    },

    /// The algorithm name is unknown or the algorithm cannot handle the order.
    #[error("unsupported algorithm '{name}': {reason}")]
    UnsupportedAlgorithm {
        /// Name of the requested algorithm.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A native algorithm was requested but no native backend is attached.
    #[error("algorithm '{algorithm}' requires the native backend, which is not available")]
    BackendUnavailable {
        /// Name of the requested algorithm.
        algorithm: String,
    },

    /// The encoding axis does not exist in the input array.
    #[error("axis {axis} is out of bounds for an array of dimension {ndim}")]
    InvalidAxis {
        /// The axis that was requested (negative values count from the end).
        axis: isize,
        /// Number of dimensions of the input.
        ndim: usize,
    },

    /// The series contains NaN or an infinite value.
    #[error("non-finite sample at flat index {index}")]
    NonFiniteSample {
        /// Position of the first offending sample in logical iteration order.
        index: usize,
    },

    /// Reshaping an intermediate array failed.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Convenience type alias for results carrying an ordpat [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
