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

//! Totally ordered wrappers for squared distances.
//!
//! Nearest-neighbor consumers only compare distances, so the square root is
//! never taken and the scalar can be stored in a form that sorts with plain
//! integer comparison. The encoding flips the low bits of negative floats so
//! that the resulting integers order the same way as the IEEE 754 values,
//! with NaN above positive infinity.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    FromBytes,
    IntoBytes,
    Immutable,
    KnownLayout,
)]
#[repr(transparent)]
pub struct Distance32(i32);

impl Distance32 {
    pub const ZERO: Self = Distance32::from_f32(0.0f32);
    pub const INFINITY: Self = Distance32::from_f32(f32::INFINITY);
    pub const NEG_INFINITY: Self = Distance32::from_f32(f32::NEG_INFINITY);
    pub const NAN: Self = Distance32::from_f32(f32::NAN);

    #[inline(always)]
    pub const fn from_f32(value: f32) -> Self {
        let bits = value.to_bits() as i32;
        let mask = ((bits >> 31) as u32) >> 1;
        Self(bits ^ (mask as i32))
    }

    #[inline(always)]
    pub const fn to_f32(self) -> f32 {
        let bits = self.0;
        let mask = ((bits >> 31) as u32) >> 1;
        f32::from_bits((bits ^ (mask as i32)) as u32)
    }

    #[inline(always)]
    pub const fn to_i32(self) -> i32 {
        self.0
    }
}

impl From<f32> for Distance32 {
    #[inline(always)]
    fn from(value: f32) -> Self {
        Distance32::from_f32(value)
    }
}

impl From<Distance32> for f32 {
    #[inline(always)]
    fn from(value: Distance32) -> Self {
        Distance32::to_f32(value)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    FromBytes,
    IntoBytes,
    Immutable,
    KnownLayout,
)]
#[repr(transparent)]
pub struct Distance64(i64);

impl Distance64 {
    pub const ZERO: Self = Distance64::from_f64(0.0f64);
    pub const INFINITY: Self = Distance64::from_f64(f64::INFINITY);
    pub const NEG_INFINITY: Self = Distance64::from_f64(f64::NEG_INFINITY);
    pub const NAN: Self = Distance64::from_f64(f64::NAN);

    #[inline(always)]
    pub const fn from_f64(value: f64) -> Self {
        let bits = value.to_bits() as i64;
        let mask = ((bits >> 63) as u64) >> 1;
        Self(bits ^ (mask as i64))
    }

    #[inline(always)]
    pub const fn to_f64(self) -> f64 {
        let bits = self.0;
        let mask = ((bits >> 63) as u64) >> 1;
        f64::from_bits((bits ^ (mask as i64)) as u64)
    }

    #[inline(always)]
    pub const fn to_i64(self) -> i64 {
        self.0
    }
}

impl From<f64> for Distance64 {
    #[inline(always)]
    fn from(value: f64) -> Self {
        Distance64::from_f64(value)
    }
}

impl From<Distance64> for f64 {
    #[inline(always)]
    fn from(value: Distance64) -> Self {
        Distance64::to_f64(value)
    }
}

#[test]
fn distance32_conversions() {
    assert_eq!(Distance32::from(0.0f32), Distance32::ZERO);
    assert_eq!(Distance32::from(f32::INFINITY), Distance32::INFINITY);
    assert_eq!(Distance32::from(f32::NEG_INFINITY), Distance32::NEG_INFINITY);
    for i in -100..100 {
        let val = (i as f32) * 0.1;
        assert_eq!(f32::from(Distance32::from(val)).to_bits(), val.to_bits());
    }
    assert_eq!(
        f32::from(Distance32::from(-0.0f32)).to_bits(),
        (-0.0f32).to_bits()
    );
    assert_eq!(
        f32::from(Distance32::from(f32::NAN)).to_bits(),
        f32::NAN.to_bits()
    );
    assert_eq!(
        f32::from(Distance32::from(-f32::NAN)).to_bits(),
        (-f32::NAN).to_bits()
    );
}

#[test]
fn distance64_conversions() {
    assert_eq!(Distance64::from(0.0f64), Distance64::ZERO);
    assert_eq!(Distance64::from(f64::INFINITY), Distance64::INFINITY);
    assert_eq!(Distance64::from(f64::NEG_INFINITY), Distance64::NEG_INFINITY);
    for i in -100..100 {
        let val = (i as f64) * 0.1;
        assert_eq!(f64::from(Distance64::from(val)).to_bits(), val.to_bits());
    }
    assert_eq!(
        f64::from(Distance64::from(-0.0f64)).to_bits(),
        (-0.0f64).to_bits()
    );
    assert_eq!(
        f64::from(Distance64::from(f64::NAN)).to_bits(),
        f64::NAN.to_bits()
    );
}

#[test]
fn distance_ordering() {
    let values = [0.0f32, 0.25, 1.0, 25.0, 4e20, f32::INFINITY];
    for w in values.windows(2) {
        assert!(Distance32::from(w[0]) < Distance32::from(w[1]));
    }
    let values = [0.0f64, 0.25, 1.0, 25.0, 4e20, f64::INFINITY];
    for w in values.windows(2) {
        assert!(Distance64::from(w[0]) < Distance64::from(w[1]));
    }
}
