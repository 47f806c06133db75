use ecc_core::curve::presets;
use ecc_core::point::JacobiPoint;

use criterion::{Criterion, criterion_group, criterion_main};
use num_bigint::{BigInt, BigUint};
use std::hint::black_box;
use std::sync::Arc;

fn p256_generator(mark_generator: bool) -> JacobiPoint {
    let params = presets::nist_p256();
    JacobiPoint::from_affine(
        params.curve,
        params.gx,
        params.gy,
        Some(params.order),
        mark_generator,
    )
}

fn odd_scalar() -> BigInt {
    // an arbitrary 256-bit odd scalar, well away from the curve order's
    // low/high edges so neither NAF recoding nor the precompute table hits
    // a degenerate short path.
    BigInt::from(
        BigUint::parse_bytes(
            b"c49a5fd8c9f9aa4eac563c5caa46e4c1ef3a9e825bd4e0d36c5f5c0c8b3ca2ab",
            16,
        )
        .unwrap(),
    )
}

pub fn bench_scalar_mul_plain(c: &mut Criterion) {
    let g = p256_generator(false);
    let k = odd_scalar();
    c.bench_function("jacobi scalar_mul, no precompute", |b| {
        b.iter(|| g.scalar_mul(black_box(&k)))
    });
}

pub fn bench_scalar_mul_generator(c: &mut Criterion) {
    let g = Arc::new(p256_generator(true));
    let k = odd_scalar();
    // first call pays for building the precompute table; warm it up before
    // the timed loop so the benchmark measures the fast path.
    let _ = g.scalar_mul(&k);
    c.bench_function("jacobi scalar_mul, generator precompute", |b| {
        b.iter(|| g.scalar_mul(black_box(&k)))
    });
}

pub fn bench_mul_add(c: &mut Criterion) {
    let g = p256_generator(false);
    let h = g.double();
    let k1 = odd_scalar();
    let k2 = odd_scalar() + BigInt::from(1);
    c.bench_function("jacobi mul_add (dual scalar mult)", |b| {
        b.iter(|| g.mul_add(black_box(&k1), &h, black_box(&k2)))
    });
}

criterion_group!(
    benches,
    bench_scalar_mul_plain,
    bench_scalar_mul_generator,
    bench_mul_add
);
criterion_main!(benches);
