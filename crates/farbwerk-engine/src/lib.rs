// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// farbwerk-engine — Region partitioning and parallel recoloring.
//
// Provides the per-pixel recolor rule, the strip/grid region partitioner, and
// the scoped-thread engine that fans workers out over disjoint destination
// slices and joins them before returning.

pub mod partition;
pub mod recolor;
pub mod transform;

// Re-export the primary structs so callers can use `farbwerk_engine::RecolorEngine` etc.
pub use partition::RegionPartitioner;
pub use recolor::RecolorEngine;
pub use transform::PixelTransform;
