// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use iced_marquee::player::{display_time, format_duration};
use std::hint::black_box;

fn time_format_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_format");

    group.bench_function("format_minutes", |b| {
        b.iter(|| format_duration(black_box(754.3)));
    });

    group.bench_function("format_hours", |b| {
        b.iter(|| format_duration(black_box(3_725.9)));
    });

    // Every timeupdate renders both sides of the readout.
    group.bench_function("display_readout", |b| {
        b.iter(|| {
            let current = display_time(black_box(1_234.5));
            let total = display_time(black_box(f64::NAN));
            black_box((current, total))
        });
    });

    group.finish();
}

criterion_group!(benches, time_format_benchmark);
criterion_main!(benches);
