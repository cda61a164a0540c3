// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the parallel recolor engine.  Times a full
// recolor pass over a synthetic image at one worker and at four, which is
// the comparison the speedup metric is built on.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgb, RgbImage};

use farbwerk_engine::RecolorEngine;

/// Synthetic 640x480 image mixing gray and saturated pixels so both
/// transform branches stay hot.
fn synthetic_image() -> RgbImage {
    RgbImage::from_fn(640, 480, |x, y| {
        let base = ((x * 7 + y * 13) % 256) as u8;
        if (x / 32 + y / 32) % 2 == 0 {
            Rgb([base, base, base])
        } else {
            Rgb([base, 255 - base, base / 2])
        }
    })
}

/// Benchmark a full recolor pass at 1 and 4 workers on the same source.
fn bench_recolor(c: &mut Criterion) {
    let source = synthetic_image();
    let engine = RecolorEngine::default();

    let mut group = c.benchmark_group("recolor 640x480");
    for workers in [1usize, 4] {
        group.bench_function(format!("{workers} worker(s)"), |b| {
            b.iter(|| {
                let out = engine
                    .recolor_to_new(black_box(&source), workers)
                    .expect("recolor");
                black_box(out);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_recolor);
criterion_main!(benches);
