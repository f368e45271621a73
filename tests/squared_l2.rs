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

use rand::Rng;
use sqeuclid::{DistanceError, squared_l2};

#[test]
fn zero_length() {
    let empty_f32: [f32; 0] = [];
    let empty_f64: [f64; 0] = [];
    assert_eq!(squared_l2(&empty_f32, &empty_f32), Ok(0.0f32));
    assert_eq!(squared_l2(&empty_f64, &empty_f64), Ok(0.0f64));
}

#[test]
fn self_distance_is_exactly_zero() {
    let mut rng = rand::rng();
    for n in [1, 3, 7, 64, 1000, 4016] {
        let v = (0..n)
            .map(|_| rng.random_range(-1e6..=1e6f32))
            .collect::<Vec<_>>();
        assert_eq!(squared_l2(&v, &v), Ok(0.0f32));
        let v = (0..n)
            .map(|_| rng.random_range(-1e6..=1e6f64))
            .collect::<Vec<_>>();
        assert_eq!(squared_l2(&v, &v), Ok(0.0f64));
    }
}

#[test]
fn symmetry_is_exact() {
    let mut rng = rand::rng();
    for n in [1, 5, 100, 1023] {
        let a = (0..n)
            .map(|_| rng.random_range(-100.0..=100.0f32))
            .collect::<Vec<_>>();
        let b = (0..n)
            .map(|_| rng.random_range(-100.0..=100.0f32))
            .collect::<Vec<_>>();
        assert_eq!(squared_l2(&a, &b), squared_l2(&b, &a));
        let a = (0..n)
            .map(|_| rng.random_range(-100.0..=100.0f64))
            .collect::<Vec<_>>();
        let b = (0..n)
            .map(|_| rng.random_range(-100.0..=100.0f64))
            .collect::<Vec<_>>();
        assert_eq!(squared_l2(&a, &b), squared_l2(&b, &a));
    }
}

#[test]
fn known_values() {
    assert_eq!(
        squared_l2(&[1.0f32, 2.0, 3.0], &[4.0f32, 6.0, 3.0]),
        Ok(25.0f32)
    );
    assert_eq!(
        squared_l2(&[1.0f64, 2.0, 3.0], &[4.0f64, 6.0, 3.0]),
        Ok(25.0f64)
    );
    assert_eq!(squared_l2(&[0.0f32], &[0.0f32]), Ok(0.0f32));
    assert_eq!(squared_l2(&[0.0f64], &[0.0f64]), Ok(0.0f64));
    assert_eq!(
        squared_l2(&[1.0f32, 1.0, 1.0, 1.0], &[0.0f32, 0.0, 0.0, 0.0]),
        Ok(4.0f32)
    );
    assert_eq!(
        squared_l2(&[1.0f64, 1.0, 1.0, 1.0], &[0.0f64, 0.0, 0.0, 0.0]),
        Ok(4.0f64)
    );
    // No premature overflow at double precision for moderate magnitudes.
    assert_eq!(
        squared_l2(&[1e10f64, 0.0], &[-1e10f64, 0.0]),
        Ok(4e20f64)
    );
}

#[test]
fn scaling() {
    let mut rng = rand::rng();
    for n in [2, 17, 256] {
        let a = (0..n)
            .map(|_| rng.random_range(-1.0..=1.0f64))
            .collect::<Vec<_>>();
        let b = (0..n)
            .map(|_| rng.random_range(-1.0..=1.0f64))
            .collect::<Vec<_>>();
        let k = 3.5f64;
        let ka = a.iter().map(|x| k * x).collect::<Vec<_>>();
        let kb = b.iter().map(|x| k * x).collect::<Vec<_>>();
        let base = squared_l2(&a, &b).unwrap();
        let scaled = squared_l2(&ka, &kb).unwrap();
        let expected = k * k * base;
        assert!(
            (scaled - expected).abs() <= 1e-12 * expected.abs().max(1.0),
            "scaled = {scaled}, expected = {expected}"
        );

        let a32 = a.iter().map(|&x| x as f32).collect::<Vec<_>>();
        let b32 = b.iter().map(|&x| x as f32).collect::<Vec<_>>();
        let ka32 = a32.iter().map(|x| 3.5f32 * x).collect::<Vec<_>>();
        let kb32 = b32.iter().map(|x| 3.5f32 * x).collect::<Vec<_>>();
        let base = squared_l2(&a32, &b32).unwrap();
        let scaled = squared_l2(&ka32, &kb32).unwrap();
        let expected = 3.5f32 * 3.5 * base;
        assert!(
            (scaled - expected).abs() <= 1e-4 * expected.abs().max(1.0),
            "scaled = {scaled}, expected = {expected}"
        );
    }
}

#[test]
fn cross_precision_consistency() {
    let mut rng = rand::rng();
    for n in [1, 8, 129, 1000] {
        let a32 = (0..n)
            .map(|_| rng.random_range(-1.0..=1.0f32))
            .collect::<Vec<_>>();
        let b32 = (0..n)
            .map(|_| rng.random_range(-1.0..=1.0f32))
            .collect::<Vec<_>>();
        let a64 = a32.iter().map(|&x| x as f64).collect::<Vec<_>>();
        let b64 = b32.iter().map(|&x| x as f64).collect::<Vec<_>>();
        let single = squared_l2(&a32, &b32).unwrap() as f64;
        let double = squared_l2(&a64, &b64).unwrap();
        assert!(
            (single - double).abs() <= 1e-3 * double.abs().max(1.0),
            "single = {single}, double = {double}"
        );
    }
}

#[test]
fn non_negativity() {
    let mut rng = rand::rng();
    for n in [1, 3, 33, 511] {
        let a = (0..n)
            .map(|_| rng.random_range(-1e3..=1e3f32))
            .collect::<Vec<_>>();
        let b = (0..n)
            .map(|_| rng.random_range(-1e3..=1e3f32))
            .collect::<Vec<_>>();
        assert!(squared_l2(&a, &b).unwrap() >= 0.0);
        let a = (0..n)
            .map(|_| rng.random_range(-1e3..=1e3f64))
            .collect::<Vec<_>>();
        let b = (0..n)
            .map(|_| rng.random_range(-1e3..=1e3f64))
            .collect::<Vec<_>>();
        assert!(squared_l2(&a, &b).unwrap() >= 0.0);
    }
}

#[test]
fn dimension_mismatch_is_rejected() {
    assert_eq!(
        squared_l2(&[1.0f32, 2.0], &[1.0f32]),
        Err(DistanceError::DimensionMismatch { left: 2, right: 1 })
    );
    assert_eq!(
        squared_l2(&[1.0f64], &[1.0f64, 2.0, 3.0]),
        Err(DistanceError::DimensionMismatch { left: 1, right: 3 })
    );
}

#[test]
fn overflow_propagates_per_ieee754() {
    // f32 cannot hold (2e19 * 2)^2; the squared term saturates to infinity.
    let r = squared_l2(&[2e19f32], &[-2e19f32]).unwrap();
    assert!(r.is_infinite() && r > 0.0);
}
