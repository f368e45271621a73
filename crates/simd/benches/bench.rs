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

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use simd::Floating;

fn floating_f32_reduce_sum_of_d2(c: &mut Criterion) {
    use rand::Rng;
    let mut rng = rand::rng();
    for n in [64, 960, 4095] {
        let x = (0..n)
            .map(|_| rng.random_range(-1.0..=1.0f32))
            .collect::<Vec<_>>();
        let y = (0..n)
            .map(|_| rng.random_range(-1.0..=1.0f32))
            .collect::<Vec<_>>();
        c.bench_function(&format!("floating_f32::reduce_sum_of_d2/{n}"), |b| {
            b.iter(|| f32::reduce_sum_of_d2(black_box(&x), black_box(&y)))
        });
    }
}

fn floating_f64_reduce_sum_of_d2(c: &mut Criterion) {
    use rand::Rng;
    let mut rng = rand::rng();
    for n in [64, 960, 4095] {
        let x = (0..n)
            .map(|_| rng.random_range(-1.0..=1.0f64))
            .collect::<Vec<_>>();
        let y = (0..n)
            .map(|_| rng.random_range(-1.0..=1.0f64))
            .collect::<Vec<_>>();
        c.bench_function(&format!("floating_f64::reduce_sum_of_d2/{n}"), |b| {
            b.iter(|| f64::reduce_sum_of_d2(black_box(&x), black_box(&y)))
        });
    }
}

criterion_group!(
    benches,
    floating_f32_reduce_sum_of_d2,
    floating_f64_reduce_sum_of_d2
);
criterion_main!(benches);
