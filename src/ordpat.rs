// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Algorithm selection and n-dimensional encoding.
//!
//! [`Ordpat`] picks an encoder for the requested order, validates the input
//! once, and applies the encoder independently to every lane of the chosen
//! axis. It owns the state worth keeping between calls: the execution plan of
//! the vectorised algorithm and the most recently built transition table.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, trace};
use ndarray::{Array1, ArrayBase, ArrayD, ArrayViewD, Axis, Data, Dimension, Ix1, IxDyn};
use parking_lot::Mutex;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::encoders::lookup::{TransitionTable, encode_lookup_into};
use crate::encoders::overlap::encode_overlap_into;
use crate::encoders::plain::encode_plain_into;
use crate::encoders::vectorised::BatchEncoder;
use crate::encoders::word_width::pattern_uint64_width;
use crate::error::{Error, Result};
use crate::validation::{
    MIN_ORDER, check_finite, check_lag, check_length, check_order, resolve_axis,
};

/// Largest order any in-process algorithm supports.
pub const MAX_IN_PROCESS_ORDER: usize = 20;

/// The available encoding algorithms.
///
/// ```text
/// ALGORITHM       MAX ORDER   NATIVE
/// plain                  20       no
/// overlap                20       no
/// lookup                 10       no
/// vectorised             20       no   default without a native backend
/// plain_c                20      yes
/// overlap_c              20      yes   default with a native backend
/// overlap_mp_c          255      yes   codes span several 64-bit words
/// lookup_c               10      yes
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Plain,
    Overlap,
    Lookup,
    Vectorised,
    PlainNative,
    OverlapNative,
    OverlapMpNative,
    LookupNative,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Plain,
        Algorithm::Overlap,
        Algorithm::Lookup,
        Algorithm::Vectorised,
        Algorithm::PlainNative,
        Algorithm::OverlapNative,
        Algorithm::OverlapMpNative,
        Algorithm::LookupNative,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Plain => "plain",
            Algorithm::Overlap => "overlap",
            Algorithm::Lookup => "lookup",
            Algorithm::Vectorised => "vectorised",
            Algorithm::PlainNative => "plain_c",
            Algorithm::OverlapNative => "overlap_c",
            Algorithm::OverlapMpNative => "overlap_mp_c",
            Algorithm::LookupNative => "lookup_c",
        }
    }

    /// Largest pattern order the algorithm accepts.
    pub fn max_order(self) -> usize {
        match self {
            Algorithm::Lookup | Algorithm::LookupNative => 10,
            Algorithm::OverlapMpNative => 255,
            _ => 20,
        }
    }

    /// Whether the algorithm runs on the native backend.
    pub fn requires_native(self) -> bool {
        matches!(
            self,
            Algorithm::PlainNative
                | Algorithm::OverlapNative
                | Algorithm::OverlapMpNative
                | Algorithm::LookupNative
        )
    }

    /// Whether the algorithm needs a transition table.
    pub fn uses_table(self) -> bool {
        matches!(self, Algorithm::Lookup | Algorithm::LookupNative)
    }

    /// Whether codes are stored as several 64-bit words.
    pub fn is_multiword(self) -> bool {
        self == Algorithm::OverlapMpNative
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|alg| alg.name() == s)
            .ok_or_else(|| Error::UnsupportedAlgorithm {
                name: s.to_string(),
                reason: "unknown algorithm".to_string(),
            })
    }
}

/// Interface to a native acceleration backend.
///
/// Implementations must produce codes bit-identical to the in-process
/// encoders. For [`Algorithm::OverlapMpNative`] every code occupies
/// `pattern_uint64_width(order)` consecutive words, least significant first.
pub trait NativeBackend: Send + Sync {
    /// Encode one contiguous lane into `out`, which holds exactly
    /// `(lane.len() - (order - 1) * lag) * words_per_code` elements.
    ///
    /// `table` is set for the lookup algorithm only.
    fn encode(
        &self,
        algorithm: Algorithm,
        lane: &[f64],
        order: usize,
        lag: usize,
        table: Option<&TransitionTable>,
        out: &mut [u64],
    ) -> Result<()>;

    /// Build a transition table; any table satisfying the table invariant is
    /// interchangeable with the in-process one.
    fn build_table(&self, order: usize) -> Result<TransitionTable> {
        TransitionTable::build(order)
    }
}

/// In-process kernel applied to each lane.
enum LaneKernel {
    Plain,
    Overlap,
    Lookup(Arc<TransitionTable>),
}

impl LaneKernel {
    fn run(&self, lane: &[f64], order: usize, lag: usize, out: &mut [u64]) {
        match self {
            LaneKernel::Plain => encode_plain_into(lane, order, lag, out),
            LaneKernel::Overlap => encode_overlap_into(lane, order, lag, out),
            LaneKernel::Lookup(table) => encode_lookup_into(lane, order, lag, table, out),
        }
    }
}

/// Ordinal pattern encoder with algorithm selection.
///
/// # Example
///
/// ```rust
/// use ordpat::{Algorithm, Ordpat};
/// use ndarray::{Axis, array};
///
/// let x = array![[3.0, 1.0, 2.0, 5.0, 4.0, 6.0], [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]];
/// let codes = Ordpat::new()
///     .with_algorithm(Algorithm::Overlap)
///     .encode(&x, 3, 1)
///     .unwrap();
/// assert_eq!(codes.shape(), &[2, 4]);
/// let first: Vec<u64> = codes.index_axis(Axis(0), 0).iter().copied().collect();
/// assert_eq!(first, vec![4, 0, 1, 2]);
/// ```
pub struct Ordpat {
    algorithm: Option<Algorithm>,
    axis: isize,
    native: Option<Arc<dyn NativeBackend>>,
    batch: BatchEncoder,
    table: Mutex<Option<Arc<TransitionTable>>>,
}

impl Default for Ordpat {
    fn default() -> Self {
        Self {
            algorithm: None,
            axis: -1,
            native: None,
            batch: BatchEncoder::new(),
            table: Mutex::new(None),
        }
    }
}

impl Ordpat {
    /// Automatic algorithm selection, encoding along the last axis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always use `algorithm` instead of selecting one.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Encode along `axis`; negative values count from the last axis.
    #[must_use]
    pub fn with_axis(mut self, axis: isize) -> Self {
        self.axis = axis;
        self
    }

    /// Attach a native acceleration backend.
    #[must_use]
    pub fn with_native_backend(mut self, backend: Arc<dyn NativeBackend>) -> Self {
        self.native = Some(backend);
        self
    }

    /// Seed the table cache with a prebuilt table.
    #[must_use]
    pub fn with_table(mut self, table: Arc<TransitionTable>) -> Self {
        *self.table.get_mut() = Some(table);
        self
    }

    pub fn native_available(&self) -> bool {
        self.native.is_some()
    }

    /// Resolve the algorithm used for `order`.
    ///
    /// Without an explicit choice the native backend is preferred; otherwise
    /// the vectorised algorithm is used up to order 20.
    pub fn select_algorithm(&self, order: usize) -> Result<Algorithm> {
        let alg = match self.algorithm {
            Some(alg) => {
                if alg.requires_native() && self.native.is_none() {
                    return Err(Error::BackendUnavailable {
                        algorithm: alg.name().to_string(),
                    });
                }
                if order > alg.max_order() {
                    return Err(Error::UnsupportedAlgorithm {
                        name: alg.name().to_string(),
                        reason: format!("does not support orders > {}", alg.max_order()),
                    });
                }
                alg
            }
            None if self.native.is_some() => {
                if order <= MAX_IN_PROCESS_ORDER {
                    Algorithm::OverlapNative
                } else {
                    Algorithm::OverlapMpNative
                }
            }
            None => {
                if order > MAX_IN_PROCESS_ORDER {
                    return Err(Error::InvalidOrder {
                        order,
                        min: MIN_ORDER,
                        max: MAX_IN_PROCESS_ORDER,
                    });
                }
                Algorithm::Vectorised
            }
        };
        debug!("selected algorithm '{alg}' for order {order}");
        Ok(alg)
    }

    /// Transition table for `order`, reusing the cached one when possible.
    pub fn lookup_table(&self, order: usize) -> Result<Arc<TransitionTable>> {
        let mut slot = self.table.lock();
        if let Some(table) = slot.as_ref() {
            if table.order() == order {
                trace!("transition table cache hit: order={order}");
                return Ok(Arc::clone(table));
            }
        }
        let table = match &self.native {
            Some(native) => native.build_table(order)?,
            None => TransitionTable::build(order)?,
        };
        if table.order() != order {
            return Err(Error::InvalidTable {
                reason: format!(
                    "backend built a table for order {}, but order {order} was requested",
                    table.order()
                ),
            });
        }
        let table = Arc::new(table);
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// The encoder used for the vectorised algorithm.
    pub fn batch_encoder(&self) -> &BatchEncoder {
        &self.batch
    }

    /// Encode `x` along the configured axis.
    ///
    /// The output has the shape of `x`, except that the encoded axis is
    /// shortened by `(order - 1) * lag`. The multi-word algorithm appends a
    /// trailing axis holding the 64-bit words of each code.
    pub fn encode<S, D>(&self, x: &ArrayBase<S, D>, order: usize, lag: usize) -> Result<ArrayD<u64>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let alg = self.select_algorithm(order)?;
        check_order(order, alg.max_order())?;
        check_lag(lag)?;

        let x = x.view().into_dyn();
        let axis = resolve_axis(self.axis, x.ndim())?;
        let n_pat = check_length(x.len_of(axis), order, lag)?;
        check_finite(&x)?;

        let kernel = match alg {
            Algorithm::Vectorised => return Ok(self.batch.encode_trusted(x, order, lag, axis)),
            Algorithm::Plain => LaneKernel::Plain,
            Algorithm::Overlap => LaneKernel::Overlap,
            Algorithm::Lookup => LaneKernel::Lookup(self.lookup_table(order)?),
            _ => return self.encode_native(x, alg, order, lag, axis, n_pat),
        };

        let lanes = Lanes::gather(&x, axis);
        let mut out = vec![0u64; lanes.count * n_pat];
        if !out.is_empty() {
            #[cfg(feature = "parallel")]
            out.par_chunks_mut(n_pat)
                .zip(lanes.data.par_chunks(lanes.len))
                .for_each(|(row, lane)| kernel.run(lane, order, lag, row));

            #[cfg(not(feature = "parallel"))]
            for (row, lane) in out.chunks_mut(n_pat).zip(lanes.data.chunks(lanes.len)) {
                kernel.run(lane, order, lag, row);
            }
        }
        lanes.scatter(out, n_pat, None)
    }

    fn encode_native(
        &self,
        x: ArrayViewD<'_, f64>,
        alg: Algorithm,
        order: usize,
        lag: usize,
        axis: Axis,
        n_pat: usize,
    ) -> Result<ArrayD<u64>> {
        let native = self
            .native
            .as_ref()
            .ok_or_else(|| Error::BackendUnavailable {
                algorithm: alg.name().to_string(),
            })?;
        let table = if alg.uses_table() {
            Some(self.lookup_table(order)?)
        } else {
            None
        };
        let words = if alg.is_multiword() {
            pattern_uint64_width(order)?
        } else {
            1
        };

        let lanes = Lanes::gather(&x, axis);
        let row_len = n_pat * words;
        let mut out = vec![0u64; lanes.count * row_len];
        if !out.is_empty() {
            let table = table.as_deref();

            #[cfg(feature = "parallel")]
            out.par_chunks_mut(row_len)
                .zip(lanes.data.par_chunks(lanes.len))
                .try_for_each(|(row, lane)| native.encode(alg, lane, order, lag, table, row))?;

            #[cfg(not(feature = "parallel"))]
            for (row, lane) in out.chunks_mut(row_len).zip(lanes.data.chunks(lanes.len)) {
                native.encode(alg, lane, order, lag, table, row)?;
            }
        }
        let extra = alg.is_multiword().then_some(words);
        lanes.scatter(out, n_pat, extra)
    }
}

/// Lanes along one axis, copied into contiguous rows.
struct Lanes {
    data: Vec<f64>,
    len: usize,
    count: usize,
    /// Axis order of the rows: all other axes, then the encoded one.
    perm: Vec<usize>,
    /// Shape of the input in `perm` order.
    shape: Vec<usize>,
}

impl Lanes {
    fn gather(x: &ArrayViewD<'_, f64>, axis: Axis) -> Self {
        let ndim = x.ndim();
        let perm: Vec<usize> = (0..ndim)
            .filter(|&a| a != axis.index())
            .chain(std::iter::once(axis.index()))
            .collect();
        let moved = x.view().permuted_axes(IxDyn(&perm));
        let shape = moved.shape().to_vec();
        let data: Vec<f64> = moved.iter().copied().collect();
        let len = x.len_of(axis);
        let count = if len == 0 { 0 } else { data.len() / len };
        Self {
            data,
            len,
            count,
            perm,
            shape,
        }
    }

    /// Put encoded rows back into the original axis order.
    fn scatter(self, out: Vec<u64>, n_pat: usize, words: Option<usize>) -> Result<ArrayD<u64>> {
        let mut shape = self.shape;
        if let Some(last) = shape.last_mut() {
            *last = n_pat;
        }
        let mut inverse: Vec<usize> = (0..self.perm.len())
            .map(|a| self.perm.iter().position(|&p| p == a).unwrap_or(a))
            .collect();
        if let Some(words) = words {
            shape.push(words);
            inverse.push(self.perm.len());
        }
        let moved = ArrayD::from_shape_vec(IxDyn(&shape), out)?;
        Ok(moved
            .permuted_axes(IxDyn(&inverse))
            .as_standard_layout()
            .into_owned())
    }
}

/// Encode the whole of `x` along its last axis with automatic algorithm selection.
pub fn ordpat<S, D>(x: &ArrayBase<S, D>, order: usize, lag: usize) -> Result<ArrayD<u64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    Ordpat::new().encode(x, order, lag)
}

/// Encode a 1-D series with the given algorithm, or the default one.
///
/// No native backend is attached, so native algorithms fail with
/// [`Error::BackendUnavailable`]; use [`Ordpat::with_native_backend`] for
/// those. The multi-word algorithm is rejected with
/// [`Error::UnsupportedAlgorithm`].
pub fn encode_series<S>(
    series: &ArrayBase<S, Ix1>,
    order: usize,
    lag: usize,
    algorithm: Option<Algorithm>,
) -> Result<Array1<u64>>
where
    S: Data<Elem = f64>,
{
    let mut encoder = Ordpat::new();
    if let Some(alg) = algorithm {
        if alg.is_multiword() {
            return Err(Error::UnsupportedAlgorithm {
                name: alg.name().to_string(),
                reason: "multi-word codes cannot be returned as a 1-D array".to_string(),
            });
        }
        encoder = encoder.with_algorithm(alg);
    }
    Ok(encoder.encode(series, order, lag)?.into_dimensionality::<Ix1>()?)
}
