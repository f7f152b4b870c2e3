// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Criterion benchmarks over the codec's parse entry point.
//!
//! Complements the hand-rolled driver with criterion's statistics at a
//! reduced tree depth, keeping iteration times short.

use codecbench_harness::generator;
use codecbench_schema::{codec, BenchmarkEnvelope};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_envelope_decode(c: &mut Criterion) {
    let envelope = BenchmarkEnvelope {
        root: generator::generate("root", 0, 3),
    };
    let payload = codec::encode(&envelope).expect("encode failed");

    c.bench_function("envelope_decode_depth3", |b| {
        b.iter(|| {
            let decoded: BenchmarkEnvelope =
                codec::decode(black_box(&payload)).expect("decode failed");
            black_box(decoded);
        })
    });
}

fn bench_envelope_encode(c: &mut Criterion) {
    let envelope = BenchmarkEnvelope {
        root: generator::generate("root", 0, 3),
    };

    c.bench_function("envelope_encode_depth3", |b| {
        b.iter(|| {
            let bytes = codec::encode(black_box(&envelope)).expect("encode failed");
            black_box(bytes);
        })
    });
}

criterion_group!(benches, bench_envelope_decode, bench_envelope_encode);
criterion_main!(benches);
