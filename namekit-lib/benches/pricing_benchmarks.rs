//! Pricing path benchmarks
//!
//! Measures name fingerprinting, character validation and multi-year
//! quoting, the work done on every paid mint and renewal.
//!
//! Run with: `cargo bench --bench pricing_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use namekit_lib::prelude::*;
use std::sync::Arc;

fn oracle() -> PriceOracle {
    let owner = Address::from_label("owner");
    let mut oracle = PriceOracle::new(owner, &NamekitConfig::default());
    oracle
        .set_asset_oracle(
            &CallContext::new(owner, 0),
            Address::NATIVE,
            Arc::new(FixedPriceFeed::one_usd()),
        )
        .unwrap();
    oracle
}

/// Benchmark name id derivation
fn bench_fingerprint(c: &mut Criterion) {
    let name = Name::from_units(["🐻", "o", "o", "g", "a"]).unwrap();
    c.bench_function("name_fingerprint", |b| b.iter(|| black_box(&name).id()));
}

/// Benchmark emoji segmentation of plain text
fn bench_segment(c: &mut Criterion) {
    let oracle = oracle();
    c.bench_function("segment_mixed_text", |b| {
        b.iter(|| oracle.segment(black_box("🐻‍❄️honey🍯bear")))
    });
}

/// Benchmark quotes across lease lengths
fn bench_quote(c: &mut Criterion) {
    let oracle = oracle();
    let name = Name::from_units(["🐻", "o", "o", "g", "a"]).unwrap();
    let mut group = c.benchmark_group("price_for_duration");
    for years in [1u32, 5, 25, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(years), &years, |b, &years| {
            b.iter(|| oracle.price_for_duration(black_box(&name), years, Address::NATIVE))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fingerprint, bench_segment, bench_quote);
criterion_main!(benches);
