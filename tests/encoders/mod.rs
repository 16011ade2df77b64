// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module containing tests for the individual encoding algorithms.
mod lookup_table;
mod rank_vector;
