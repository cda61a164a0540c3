// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{PartitionMode, RecolorDeltas, ResolutionRange, WorkerRange};

/// Tunable settings for the recoloring engine and benchmark harness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of concurrent workers for a plain recolor run.
    pub worker_count: usize,
    /// Maximum pairwise channel difference for a pixel to count as gray.
    pub gray_tolerance: u8,
    /// Per-channel adjustment applied to gray pixels.
    pub recolor_deltas: RecolorDeltas,
    /// How the image is split into worker regions.
    pub partition_mode: PartitionMode,
    /// Worker counts swept by the benchmark harness.
    pub benchmark_workers: WorkerRange,
    /// Resolution scale factors swept by the benchmark harness.
    pub benchmark_resolutions: ResolutionRange,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: 4,
            gray_tolerance: 30,
            recolor_deltas: RecolorDeltas::default(),
            partition_mode: PartitionMode::default(),
            benchmark_workers: WorkerRange::default(),
            benchmark_resolutions: ResolutionRange::default(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Write the configuration to a JSON file, pretty-printed.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), data)?;
        Ok(())
    }
}
