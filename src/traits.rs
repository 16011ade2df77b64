// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

pub trait GlobalValue {
    /// Compute and return the global value of the measure.
    fn global_value(&self) -> f64;
}

pub trait LocalValues: GlobalValue {
    /// Compute and return the local value of the measure at every pattern.
    fn local_values(&self) -> Array1<f64>;

    /// Derive the global value as the mean of the local values.
    fn global_from_local(&self) -> f64 {
        self.local_values().mean().unwrap_or(0.0)
    }
}
