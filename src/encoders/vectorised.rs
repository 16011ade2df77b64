// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The 'vectorised' algorithm: all windows of an n-dimensional array are
//! encoded at once with whole-array comparisons.
//!
//! With `x_i` denoting the view of the input shifted by `i * lag` along the
//! encoded axis, the codes are
//!
//! ```text
//! y = Σ_{i<j} (order-1-i)! · [x_i > x_j]
//! ```
//!
//! The offsets and weighted terms of this sum only depend on `(order, lag)`
//! and are kept in an [`ExecutionPlan`], cached by [`PlanCache`].

use std::sync::Arc;

use log::{debug, trace};
use ndarray::{Array, Array1, ArrayBase, ArrayView, Axis, Data, Dimension, Ix1, Slice, Zip};
use parking_lot::Mutex;

use crate::encoders::rank::FACTORIALS;
use crate::error::{Error, Result};
use crate::validation::{check_encoding_args, check_finite};

/// Largest order supported by the vectorised algorithm.
pub const MAX_ORDER: usize = 20;

/// One weighted comparison `weight * [x_left > x_right]` of the code sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonTerm {
    /// Window position of the left operand.
    pub left: usize,
    /// Window position of the right operand, always greater than `left`.
    pub right: usize,
    /// Factorial weight `(order - 1 - left)!`.
    pub weight: u64,
}

/// Slice offsets and comparison terms for one `(order, lag)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    order: usize,
    lag: usize,
    offsets: Vec<usize>,
    terms: Vec<ComparisonTerm>,
}

impl ExecutionPlan {
    /// Lay out the `order` shifted views and the `order * (order - 1) / 2` terms.
    pub fn new(order: usize, lag: usize) -> Self {
        let offsets = (0..order).map(|idx| idx * lag).collect();
        let mut terms = Vec::with_capacity(order * order.saturating_sub(1) / 2);
        for left in 0..order.saturating_sub(1) {
            let weight = FACTORIALS[order - 1 - left];
            for right in (left + 1)..order {
                terms.push(ComparisonTerm {
                    left,
                    right,
                    weight,
                });
            }
        }
        Self {
            order,
            lag,
            offsets,
            terms,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Start offset of each shifted view along the encoded axis.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn terms(&self) -> &[ComparisonTerm] {
        &self.terms
    }

    /// Evaluate the plan on `x` along `axis`.
    ///
    /// The caller guarantees that `x` holds at least one window along `axis`.
    pub fn evaluate<D>(&self, x: ArrayView<'_, f64, D>, axis: Axis) -> Array<u64, D>
    where
        D: Dimension,
    {
        let n = x.len_of(axis);
        let n_pat = n - (self.order - 1) * self.lag;

        let mut dim = x.raw_dim();
        dim[axis.index()] = n_pat;
        let mut out = Array::<u64, D>::zeros(dim);

        let views: Vec<ArrayView<'_, f64, D>> = self
            .offsets
            .iter()
            .map(|&off| x.slice_axis(axis, Slice::from(off..off + n_pat)))
            .collect();

        for term in self.terms.iter() {
            let w = term.weight;
            Zip::from(&mut out)
                .and(&views[term.left])
                .and(&views[term.right])
                .for_each(|y, &a, &b| {
                    if a > b {
                        *y += w;
                    }
                });
        }
        out
    }
}

/// Single-slot cache holding the plan of the most recent `(order, lag)`.
///
/// Lookup and rebuild happen under one lock; plans are handed out as `Arc`s,
/// so a concurrent rebuild for other parameters never affects a plan that is
/// already in use.
#[derive(Debug, Default)]
pub struct PlanCache {
    slot: Mutex<Option<Arc<ExecutionPlan>>>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the plan for `(order, lag)`, rebuilding it if the cached plan
    /// was made for other parameters.
    pub fn plan(&self, order: usize, lag: usize) -> Arc<ExecutionPlan> {
        let mut slot = self.slot.lock();
        if let Some(plan) = slot.as_ref() {
            if plan.order == order && plan.lag == lag {
                trace!("execution plan cache hit: order={order}, lag={lag}");
                return Arc::clone(plan);
            }
        }
        debug!("building execution plan: order={order}, lag={lag}");
        let plan = Arc::new(ExecutionPlan::new(order, lag));
        *slot = Some(Arc::clone(&plan));
        plan
    }

    /// The currently cached plan, if any.
    pub fn current(&self) -> Option<Arc<ExecutionPlan>> {
        self.slot.lock().clone()
    }

    /// Drop the cached plan.
    pub fn clear(&self) {
        *self.slot.lock() = None;
    }
}

/// Encoder for n-dimensional arrays along one axis.
#[derive(Debug, Default)]
pub struct BatchEncoder {
    cache: PlanCache,
}

impl BatchEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `x` along `axis`; all other axes are independent lanes.
    ///
    /// The output has the shape of `x`, except that `axis` is shortened by
    /// `(order - 1) * lag`.
    pub fn encode<S, D>(
        &self,
        x: &ArrayBase<S, D>,
        order: usize,
        lag: usize,
        axis: Axis,
    ) -> Result<Array<u64, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        if axis.index() >= x.ndim() {
            return Err(Error::InvalidAxis {
                axis: axis.index() as isize,
                ndim: x.ndim(),
            });
        }
        check_encoding_args(x.len_of(axis), order, lag, MAX_ORDER)?;
        check_finite(x)?;
        Ok(self.encode_trusted(x.view(), order, lag, axis))
    }

    /// Encode without validating the arguments.
    pub fn encode_trusted<D>(
        &self,
        x: ArrayView<'_, f64, D>,
        order: usize,
        lag: usize,
        axis: Axis,
    ) -> Array<u64, D>
    where
        D: Dimension,
    {
        self.cache.plan(order, lag).evaluate(x, axis)
    }

    /// The plan cache used by this encoder.
    pub fn cache(&self) -> &PlanCache {
        &self.cache
    }
}

/// Extract and encode ordinal patterns of a 1-D series using the 'vectorised'
/// algorithm with a throwaway plan.
pub fn encode_vectorised<S>(
    series: &ArrayBase<S, Ix1>,
    order: usize,
    lag: usize,
) -> Result<Array1<u64>>
where
    S: Data<Elem = f64>,
{
    BatchEncoder::new().encode(series, order, lag, Axis(0))
}
