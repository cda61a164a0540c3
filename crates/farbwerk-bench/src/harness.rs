// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Benchmark harness — drives the recolor engine across worker counts and
// image resolutions and records wall-clock timings.  Produces measurement
// sequences only; printing them is the caller's concern.

use std::time::{Duration, Instant};

use image::RgbImage;
use image::imageops::FilterType;
use tracing::{info, instrument};

use farbwerk_core::config::EngineConfig;
use farbwerk_core::error::Result;
use farbwerk_core::types::{BenchmarkResult, ResolutionRange, SweepPoint, WorkerRange};
use farbwerk_engine::RecolorEngine;

/// Times recolor passes across a range of worker counts or resolutions.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkHarness {
    engine: RecolorEngine,
}

impl BenchmarkHarness {
    pub fn new(engine: RecolorEngine) -> Self {
        Self { engine }
    }

    /// Build a harness whose engine uses the configured transform and
    /// partition mode.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(RecolorEngine::from_config(config))
    }

    /// Time one full recolor at each worker count in the range, in order.
    ///
    /// The speedup of each measurement is relative to a dedicated
    /// single-worker pass timed at the start of the sweep, so the ratios in
    /// one sweep all share a baseline.
    #[instrument(skip_all, fields(width = source.width(), height = source.height()))]
    pub fn sweep_worker_count(
        &self,
        source: &RgbImage,
        range: WorkerRange,
    ) -> Result<Vec<BenchmarkResult>> {
        let counts = range.counts()?;
        let baseline = self.timed_recolor(source, 1)?;
        info!(elapsed_ms = as_millis(baseline), "single-worker baseline");

        let mut results = Vec::with_capacity(counts.len());
        for workers in counts {
            let elapsed = self.timed_recolor(source, workers)?;
            let speedup = speedup_ratio(baseline, elapsed);
            info!(workers, elapsed_ms = as_millis(elapsed), speedup, "sweep step");
            results.push(BenchmarkResult {
                point: SweepPoint::Workers(workers),
                elapsed_ms: as_millis(elapsed),
                speedup,
            });
        }
        Ok(results)
    }

    /// Time single-worker and `worker_count`-worker recolors at each scale
    /// factor in the range, largest resolution first.
    ///
    /// Every step resizes fresh from the original source rather than from
    /// the previous step's output, so interpolation error never compounds.
    /// The recorded elapsed time is the parallel pass; the speedup compares
    /// it against the single-worker pass at the same resolution.
    #[instrument(
        skip_all,
        fields(width = source.width(), height = source.height(), workers = worker_count)
    )]
    pub fn sweep_resolution(
        &self,
        source: &RgbImage,
        worker_count: usize,
        range: ResolutionRange,
    ) -> Result<Vec<BenchmarkResult>> {
        let factors = range.factors()?;

        let mut results = Vec::with_capacity(factors.len());
        for factor in factors {
            let scaled = scale_source(source, factor);
            let single = self.timed_recolor(&scaled, 1)?;
            let parallel = self.timed_recolor(&scaled, worker_count)?;
            let speedup = speedup_ratio(single, parallel);
            info!(
                factor,
                width = scaled.width(),
                height = scaled.height(),
                single_ms = as_millis(single),
                parallel_ms = as_millis(parallel),
                speedup,
                "sweep step"
            );
            results.push(BenchmarkResult {
                point: SweepPoint::Scale(factor),
                elapsed_ms: as_millis(parallel),
                speedup,
            });
        }
        Ok(results)
    }

    /// Run one recolor into a fresh destination and return the wall time.
    fn timed_recolor(&self, source: &RgbImage, workers: usize) -> Result<Duration> {
        let mut destination = RgbImage::new(source.width(), source.height());
        let started = Instant::now();
        self.engine.recolor(source, &mut destination, workers)?;
        Ok(started.elapsed())
    }
}

/// Resize fresh from the original source by the given factor, never below
/// one pixel per axis.  A factor of 1.0 skips the resample entirely.
fn scale_source(source: &RgbImage, factor: f64) -> RgbImage {
    if (factor - 1.0).abs() < 1e-9 {
        return source.clone();
    }
    let width = ((f64::from(source.width()) * factor).round() as u32).max(1);
    let height = ((f64::from(source.height()) * factor).round() as u32).max(1);
    image::imageops::resize(source, width, height, FilterType::Lanczos3)
}

/// Speedup of `parallel` relative to `single`.
///
/// `None` when the parallel pass measured as zero: on tiny workloads the
/// clock can read 0ns, and an undefined ratio is more honest than infinity.
fn speedup_ratio(single: Duration, parallel: Duration) -> Option<f64> {
    if parallel.is_zero() {
        return None;
    }
    Some(single.as_secs_f64() / parallel.as_secs_f64())
}

fn as_millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}
