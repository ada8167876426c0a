//! Benchmarks for the tick conversion core.
//!
//! Run with: `cargo bench --package sqrtprice-math`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sqrtprice_math::{sqrt_price_x96, sqrt_price_x96_with_precision, Precision};

/// Benchmark: convert a small tick where the exact powers are tiny.
fn bench_convert_small_tick(c: &mut Criterion) {
    c.bench_function("convert_tick_1000", |b| {
        b.iter(|| sqrt_price_x96(black_box(1000)).unwrap())
    });
}

/// Benchmark: convert a deployment-scale tick.
///
/// `10001^253400` spans roughly 3.4 million bits, so this measures the
/// exact-power path that dominates conversion cost.
fn bench_convert_script_tick(c: &mut Criterion) {
    c.bench_function("convert_tick_253400", |b| {
        b.iter(|| sqrt_price_x96(black_box(253400)).unwrap())
    });
}

/// Benchmark: guard-bit width has no measurable effect next to the powers.
fn bench_convert_wide_guard(c: &mut Criterion) {
    let wide = Precision::with_guard_bits(416);
    c.bench_function("convert_tick_253400_guard_416", |b| {
        b.iter(|| sqrt_price_x96_with_precision(black_box(253400), wide).unwrap())
    });
}

criterion_group!(
    benches,
    bench_convert_small_tick,
    bench_convert_script_tick,
    bench_convert_wide_guard
);
criterion_main!(benches);
