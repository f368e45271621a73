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

use thiserror::Error;

/// Errors reported by the checked distance operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// The two vectors do not share the same dimensionality.
    #[error("dimension mismatch: left vector has {left} elements, right vector has {right}")]
    DimensionMismatch {
        /// Number of elements in the left vector.
        left: usize,
        /// Number of elements in the right vector.
        right: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_display() {
        let e = DistanceError::DimensionMismatch { left: 3, right: 4 };
        assert_eq!(
            e.to_string(),
            "dimension mismatch: left vector has 3 elements, right vector has 4"
        );
    }
}
