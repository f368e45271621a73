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

// Copies the `n` remaining elements behind each pointer into a zero-padded
// stack array of `width` lanes, so the tail can reuse a full-width load.
// Safety: each pointer must be valid for reads of `n` elements, n <= width.
macro_rules! partial_load {
    ($width:expr, $n:expr, $($ptr:ident),+ $(,)?) => {{
        ($(
            {
                let mut padded = [::core::default::Default::default(); $width];
                ::core::ptr::copy_nonoverlapping($ptr, padded.as_mut_ptr(), $n);
                padded
            },
        )+)
    }};
}

pub(crate) use partial_load;

#[inline]
#[cfg(target_arch = "x86_64")]
#[crate::target_cpu(enable = "v2")]
pub fn emulate_mm_reduce_add_ps(this: core::arch::x86_64::__m128) -> f32 {
    use core::arch::x86_64::*;
    let shuf = _mm_movehdup_ps(this);
    let sums = _mm_add_ps(this, shuf);
    let shuf = _mm_movehl_ps(shuf, sums);
    _mm_cvtss_f32(_mm_add_ss(sums, shuf))
}

#[inline]
#[cfg(target_arch = "x86_64")]
#[crate::target_cpu(enable = "v3")]
pub fn emulate_mm256_reduce_add_ps(this: core::arch::x86_64::__m256) -> f32 {
    use core::arch::x86_64::*;
    let lo = _mm256_castps256_ps128(this);
    let hi = _mm256_extractf128_ps(this, 1);
    emulate_mm_reduce_add_ps(_mm_add_ps(lo, hi))
}

#[inline]
#[cfg(target_arch = "x86_64")]
#[crate::target_cpu(enable = "v2")]
pub fn emulate_mm_reduce_add_pd(this: core::arch::x86_64::__m128d) -> f64 {
    use core::arch::x86_64::*;
    let hi = _mm_unpackhi_pd(this, this);
    _mm_cvtsd_f64(_mm_add_sd(this, hi))
}

#[inline]
#[cfg(target_arch = "x86_64")]
#[crate::target_cpu(enable = "v3")]
pub fn emulate_mm256_reduce_add_pd(this: core::arch::x86_64::__m256d) -> f64 {
    use core::arch::x86_64::*;
    let lo = _mm256_castpd256_pd128(this);
    let hi = _mm256_extractf128_pd(this, 1);
    emulate_mm_reduce_add_pd(_mm_add_pd(lo, hi))
}
