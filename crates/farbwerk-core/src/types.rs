// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Farbwerk recoloring engine.

use serde::{Deserialize, Serialize};

use crate::error::{FarbwerkError, Result};

/// A rectangular, half-open subdivision of an image assigned to one worker.
///
/// Coordinates satisfy `x0 < x1 <= width` and `y0 < y1 <= height`.  Regions
/// produced by the partitioner are pairwise disjoint and together cover the
/// full image exactly once, which is what makes lock-free parallel writes
/// possible downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Inclusive left edge.
    pub x0: u32,
    /// Inclusive top edge.
    pub y0: u32,
    /// Exclusive right edge.
    pub x1: u32,
    /// Exclusive bottom edge.
    pub y1: u32,
}

impl Region {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the region in pixels.
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    /// Height of the region in pixels.
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Total number of pixels in the region.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Whether the given image row intersects this region.
    pub fn contains_row(&self, y: u32) -> bool {
        y >= self.y0 && y < self.y1
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{})x[{},{})", self.x0, self.x1, self.y0, self.y1)
    }
}

/// Per-channel adjustment applied to gray pixels.
///
/// `red` is added (saturating at 255); `green` and `blue` are subtracted
/// (saturating at 0).  The defaults reproduce the warm-tint recolor from the
/// reference workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecolorDeltas {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for RecolorDeltas {
    fn default() -> Self {
        Self {
            red: 10,
            green: 80,
            blue: 20,
        }
    }
}

/// How the image is split into worker regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionMode {
    /// `n` full-height vertical strips (the default; matches the primary
    /// benchmark workload).
    VerticalStrips,
    /// An `n` x `n` grid subdividing both axes, for finer granularity.
    Grid,
}

impl Default for PartitionMode {
    fn default() -> Self {
        Self::VerticalStrips
    }
}

/// Inclusive range of worker counts for the benchmark sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRange {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl Default for WorkerRange {
    fn default() -> Self {
        Self {
            start: 1,
            end: num_cpus::get().max(2),
            step: 1,
        }
    }
}

impl WorkerRange {
    /// Materialise the worker counts this range describes.
    ///
    /// Fails eagerly on a malformed range so the harness never starts a sweep
    /// it cannot finish.
    pub fn counts(&self) -> Result<Vec<usize>> {
        if self.start == 0 || self.step == 0 || self.end < self.start {
            return Err(FarbwerkError::InvalidArgument(format!(
                "worker range must satisfy 1 <= start <= end with step >= 1, got {}..={} step {}",
                self.start, self.end, self.step
            )));
        }
        Ok((self.start..=self.end).step_by(self.step).collect())
    }
}

/// Decreasing sequence of resolution scale factors for the benchmark sweep.
///
/// Successive factors are `start, start * step, start * step^2, ...` down to
/// (and including, within rounding) `end`.  All factors lie in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for ResolutionRange {
    fn default() -> Self {
        Self {
            start: 1.0,
            end: 0.25,
            step: 0.5,
        }
    }
}

impl ResolutionRange {
    /// Materialise the scale factors this range describes, largest first.
    pub fn factors(&self) -> Result<Vec<f64>> {
        let in_unit = |f: f64| f > 0.0 && f <= 1.0;
        if !in_unit(self.start) || !in_unit(self.end) || self.end > self.start {
            return Err(FarbwerkError::InvalidArgument(format!(
                "resolution range must satisfy 0 < end <= start <= 1, got start {} end {}",
                self.start, self.end
            )));
        }
        if !(self.step > 0.0 && self.step < 1.0) {
            return Err(FarbwerkError::InvalidArgument(format!(
                "resolution step must lie in (0, 1), got {}",
                self.step
            )));
        }

        let mut factors = Vec::new();
        let mut factor = self.start;
        // Small epsilon so `end` itself survives floating-point drift.
        while factor >= self.end - 1e-9 {
            factors.push(factor);
            factor *= self.step;
        }
        Ok(factors)
    }
}

/// The swept variable a benchmark measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SweepPoint {
    /// Worker-count sweep: number of concurrent workers used.
    Workers(usize),
    /// Resolution sweep: scale factor applied to the source image.
    Scale(f64),
}

impl std::fmt::Display for SweepPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Workers(n) => write!(f, "{n} worker(s)"),
            Self::Scale(s) => write!(f, "scale {s:.3}"),
        }
    }
}

/// One timed benchmark measurement.  Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Which sweep point this measurement belongs to.
    pub point: SweepPoint,
    /// Wall-clock time of the recolor pass in milliseconds.
    pub elapsed_ms: f64,
    /// Single-worker time divided by this measurement's time.  `None` when
    /// the denominator was measured as zero (sub-resolution workload), in
    /// which case the ratio is undefined rather than infinite.
    pub speedup: Option<f64>,
}
