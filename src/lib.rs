// This software is licensed under a dual license model:
//
// GNU Affero General Public License v3 (AGPLv3): You may use, modify, and
// distribute this software under the terms of the AGPLv3.
//
// Elastic License v2 (ELv2): You may also use, modify, and distribute this
// software under the Elastic License v2, which has specific restrictions.
//
// We welcome any commercial collaboration or support. For inquiries
// regarding the licenses, please contact us at:
// vectorchord-inquiry@tensorchord.ai
//
// Copyright (c) 2025 TensorChord Inc.

//! Squared Euclidean (L2) distance over borrowed vector slices.
//!
//! The reduction runs in the precision of the inputs: `f32` slices produce
//! an `f32`, `f64` slices an `f64`. The accumulator starts at the additive
//! identity, so empty slices yield exactly `0.0`. Hardware kernels are
//! selected at runtime per cpu level and reassociate the sum into
//! lane-parallel partials; the scalar fallback accumulates strictly in
//! index order. Overflow follows IEEE 754 and is not detected.

mod distance;
mod error;

pub use distance::{Distance32, Distance64};
pub use error::DistanceError;
pub use simd::Floating;

/// Computes the sum of squared element-wise differences of two vectors.
///
/// Dimensionality is carried by the slices; the vectors are borrowed for
/// the duration of the call and never retained. Fails with
/// [`DistanceError::DimensionMismatch`] when the slices differ in length,
/// so no out-of-bounds access is possible. Callers that established the
/// length invariant once (e.g. a batched scan over vectors of a known
/// dimension) may call [`Floating::reduce_sum_of_d2`] directly, which
/// asserts instead of returning an error.
#[inline]
pub fn squared_l2<T: Floating>(lhs: &[T], rhs: &[T]) -> Result<T, DistanceError> {
    if lhs.len() != rhs.len() {
        return Err(DistanceError::DimensionMismatch {
            left: lhs.len(),
            right: rhs.len(),
        });
    }
    Ok(T::reduce_sum_of_d2(lhs, rhs))
}
