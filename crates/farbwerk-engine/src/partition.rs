// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Region partitioning — splits an image into disjoint rectangles that
// together cover it exactly once.  The disjointness is what the engine
// relies on for lock-free parallel writes.

use farbwerk_core::error::{FarbwerkError, Result};
use farbwerk_core::types::{PartitionMode, Region};

/// Computes the worker regions for a given image and worker count.
#[derive(Debug, Clone, Copy)]
pub struct RegionPartitioner {
    mode: PartitionMode,
}

impl RegionPartitioner {
    pub fn new(mode: PartitionMode) -> Self {
        Self { mode }
    }

    /// Partition the image into regions for `n` workers.
    ///
    /// `VerticalStrips` yields exactly `n` regions.  `Grid` yields `n * n`
    /// regions; the engine then runs one worker per region, so the grid mode
    /// trades fewer pixels per worker for more join overhead.
    pub fn partition(&self, width: u32, height: u32, n: u32) -> Result<Vec<Region>> {
        match self.mode {
            PartitionMode::VerticalStrips => strips(width, height, n),
            PartitionMode::Grid => grid(width, height, n),
        }
    }
}

impl Default for RegionPartitioner {
    fn default() -> Self {
        Self::new(PartitionMode::default())
    }
}

/// Split `[0, extent)` into `n` contiguous intervals of `floor(extent / n)`,
/// with the last interval extended to absorb the remainder.
///
/// Caller must have checked `1 <= n <= extent`; every interval is non-empty.
fn split_axis(extent: u32, n: u32) -> Vec<(u32, u32)> {
    let base = extent / n;
    (0..n)
        .map(|i| {
            let start = i * base;
            let end = if i == n - 1 { extent } else { start + base };
            (start, end)
        })
        .collect()
}

/// Validate the shared partition preconditions for one axis.
fn check_axis(axis: &str, extent: u32, n: u32) -> Result<()> {
    if n == 0 {
        return Err(FarbwerkError::InvalidArgument(
            "worker count must be at least 1".into(),
        ));
    }
    if n > extent {
        return Err(FarbwerkError::InvalidArgument(format!(
            "cannot split {axis} of {extent} pixels into {n} non-empty regions"
        )));
    }
    Ok(())
}

/// Split the image into `n` full-height vertical strips, ordered left to
/// right.  Strip widths are `floor(width / n)` except the last, which absorbs
/// the remainder (at most `n - 1` extra pixels).
pub fn strips(width: u32, height: u32, n: u32) -> Result<Vec<Region>> {
    check_axis("width", width, n)?;
    if height == 0 {
        return Err(FarbwerkError::InvalidArgument(
            "image height must be at least 1".into(),
        ));
    }

    Ok(split_axis(width, n)
        .into_iter()
        .map(|(x0, x1)| Region::new(x0, 0, x1, height))
        .collect())
}

/// Split the image into an `n` x `n` grid, ordered row-major.  Both axes use
/// the same remainder rule as [`strips`], so the right column and bottom row
/// absorb any leftover pixels.
pub fn grid(width: u32, height: u32, n: u32) -> Result<Vec<Region>> {
    check_axis("width", width, n)?;
    check_axis("height", height, n)?;

    let columns = split_axis(width, n);
    let rows = split_axis(height, n);

    let mut regions = Vec::with_capacity((n * n) as usize);
    for &(y0, y1) in &rows {
        for &(x0, x1) in &columns {
            regions.push(Region::new(x0, y0, x1, y1));
        }
    }
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Check that the regions cover every pixel of the image exactly once.
    fn assert_exact_cover(regions: &[Region], width: u32, height: u32) {
        let mut hits = vec![0u32; (width * height) as usize];
        for region in regions {
            for y in region.y0..region.y1 {
                for x in region.x0..region.x1 {
                    hits[(y * width + x) as usize] += 1;
                }
            }
        }
        assert!(
            hits.iter().all(|&count| count == 1),
            "partition must cover each pixel exactly once"
        );
    }

    /// Verify the reference case: width 100, 4 workers gives the strips
    /// [0,25), [25,50), [50,75), [75,100), each spanning the full height.
    #[test]
    fn strips_even_split() {
        let regions = strips(100, 60, 4).expect("partition");
        let expected: Vec<Region> = [(0, 25), (25, 50), (50, 75), (75, 100)]
            .iter()
            .map(|&(x0, x1)| Region::new(x0, 0, x1, 60))
            .collect();
        assert_eq!(regions, expected);
        assert_exact_cover(&regions, 100, 60);
    }

    /// Verify the last strip absorbs the remainder when the width does not
    /// divide evenly.
    #[test]
    fn strips_last_absorbs_remainder() {
        let regions = strips(10, 5, 4).expect("partition");
        assert_eq!(regions.len(), 4);
        assert_eq!(regions[0].width(), 2);
        assert_eq!(regions[1].width(), 2);
        assert_eq!(regions[2].width(), 2);
        // floor(10/4) = 2, so the last strip is [6, 10).
        assert_eq!(regions[3], Region::new(6, 0, 10, 5));
        assert_exact_cover(&regions, 10, 5);
    }

    /// Verify a single worker gets the whole image.
    #[test]
    fn strips_single_worker_full_image() {
        let regions = strips(7, 3, 1).expect("partition");
        assert_eq!(regions, vec![Region::new(0, 0, 7, 3)]);
    }

    /// Verify more workers than columns is rejected rather than producing
    /// zero-width regions.
    #[test]
    fn strips_rejects_more_workers_than_width() {
        let err = strips(3, 100, 10).expect_err("must reject n > width");
        assert!(matches!(err, FarbwerkError::InvalidArgument(_)));
    }

    /// Verify a zero worker count is rejected.
    #[test]
    fn strips_rejects_zero_workers() {
        assert!(strips(100, 100, 0).is_err());
    }

    /// Verify the grid mode yields n*n regions covering the image exactly
    /// once, with remainders absorbed by the right column and bottom row.
    #[test]
    fn grid_exact_cover_with_remainders() {
        let regions = grid(10, 7, 3).expect("partition");
        assert_eq!(regions.len(), 9);
        assert_exact_cover(&regions, 10, 7);
        // Bottom-right cell takes both remainders: x in [6,10), y in [4,7).
        assert_eq!(regions[8], Region::new(6, 4, 10, 7));
    }

    /// Verify the grid mode validates both axes.
    #[test]
    fn grid_rejects_more_workers_than_height() {
        let err = grid(100, 3, 10).expect_err("must reject n > height");
        assert!(matches!(err, FarbwerkError::InvalidArgument(_)));
    }

    /// Verify the partitioner dispatches on its mode.
    #[test]
    fn partitioner_dispatches_on_mode() {
        let strips_regions = RegionPartitioner::new(PartitionMode::VerticalStrips)
            .partition(8, 8, 2)
            .expect("strips");
        assert_eq!(strips_regions.len(), 2);

        let grid_regions = RegionPartitioner::new(PartitionMode::Grid)
            .partition(8, 8, 2)
            .expect("grid");
        assert_eq!(grid_regions.len(), 4);
    }
}
