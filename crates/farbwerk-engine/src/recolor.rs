// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parallel recolor engine.  Fans one worker thread out per region and joins
// them all before returning.  Workers never share mutable state: each one
// owns the destination slices for its region and nothing else, so no locks
// or atomics guard the pixel data.

use image::RgbImage;
use tracing::{debug, instrument};

use farbwerk_core::config::EngineConfig;
use farbwerk_core::error::{FarbwerkError, Result};
use farbwerk_core::types::{PartitionMode, Region};

use crate::partition::RegionPartitioner;
use crate::transform::PixelTransform;

/// One worker's unit of work: a region plus the destination slices it is
/// allowed to write.
///
/// `rows` holds one mutable slice per region row, top to bottom, carved out
/// of the shared destination buffer with `split_at_mut`.  The slices are
/// disjoint across tasks by construction, which is what lets the borrow
/// checker sign off on the whole fan-out.
struct WorkerTask<'buf> {
    region: Region,
    rows: Vec<&'buf mut [u8]>,
}

impl WorkerTask<'_> {
    /// Apply the transform over the region, reading the shared source and
    /// writing this task's exclusive destination slices.
    fn run(self, source: &RgbImage, transform: PixelTransform) {
        let src = source.as_raw();
        let src_stride = source.width() as usize * 3;
        let x_offset = self.region.x0 as usize * 3;

        for (row_index, dst_row) in self.rows.into_iter().enumerate() {
            let y = self.region.y0 as usize + row_index;
            let start = y * src_stride + x_offset;
            let src_row = &src[start..start + dst_row.len()];

            for (src_px, dst_px) in src_row.chunks_exact(3).zip(dst_row.chunks_exact_mut(3)) {
                let out = transform.apply(src_px[0], src_px[1], src_px[2]);
                dst_px.copy_from_slice(&out);
            }
        }
    }
}

/// Applies a [`PixelTransform`] over a whole image using concurrent workers.
///
/// The engine owns no pixel data; callers hand it a source and destination
/// per run.  For any worker count the output is bit-identical — parallelism
/// is purely a performance knob.
#[derive(Debug, Clone, Copy)]
pub struct RecolorEngine {
    transform: PixelTransform,
    partitioner: RegionPartitioner,
}

impl RecolorEngine {
    pub fn new(transform: PixelTransform, mode: PartitionMode) -> Self {
        Self {
            transform,
            partitioner: RegionPartitioner::new(mode),
        }
    }

    /// Build an engine from the configured tolerance, deltas, and mode.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            PixelTransform::new(config.gray_tolerance, config.recolor_deltas),
            config.partition_mode,
        )
    }

    /// Recolor `source` into `destination` using `worker_count` concurrent
    /// workers, blocking until every pixel has been written.
    ///
    /// Fails with `InvalidArgument` before any work if the dimensions
    /// mismatch, the worker count is zero, or the image cannot be split into
    /// that many non-empty regions.  Fails with `WorkerPanic` (after all
    /// workers have stopped) if any worker panicked; the destination contents
    /// are unspecified in that case.
    #[instrument(
        skip_all,
        fields(width = source.width(), height = source.height(), workers = worker_count)
    )]
    pub fn recolor(
        &self,
        source: &RgbImage,
        destination: &mut RgbImage,
        worker_count: usize,
    ) -> Result<()> {
        if source.dimensions() != destination.dimensions() {
            return Err(FarbwerkError::InvalidArgument(format!(
                "destination is {}x{} but source is {}x{}",
                destination.width(),
                destination.height(),
                source.width(),
                source.height()
            )));
        }
        let n = u32::try_from(worker_count).map_err(|_| {
            FarbwerkError::InvalidArgument(format!("worker count {worker_count} out of range"))
        })?;

        let regions = self
            .partitioner
            .partition(source.width(), source.height(), n)?;
        debug!(regions = regions.len(), "image partitioned");

        let tasks = carve_tasks(destination, source.width(), &regions);
        self.run_tasks(source, tasks)
    }

    /// Convenience wrapper that allocates the destination.
    pub fn recolor_to_new(&self, source: &RgbImage, worker_count: usize) -> Result<RgbImage> {
        let mut destination = RgbImage::new(source.width(), source.height());
        self.recolor(source, &mut destination, worker_count)?;
        Ok(destination)
    }

    /// Spawn one scoped thread per task and join them all.
    ///
    /// The scope is the only synchronisation point: it blocks the caller
    /// until every worker has finished.  A panicking worker is reported as
    /// `WorkerPanic` once all of its siblings have stopped too, so the caller
    /// never observes a half-written destination racing live threads.
    fn run_tasks(&self, source: &RgbImage, tasks: Vec<WorkerTask<'_>>) -> Result<()> {
        let transform = self.transform;

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(tasks.len());
            for (index, task) in tasks.into_iter().enumerate() {
                let handle = std::thread::Builder::new()
                    .name(format!("farbwerk-worker-{index}"))
                    .spawn_scoped(scope, move || task.run(source, transform))?;
                handles.push(handle);
            }

            let mut first_panic = None;
            for handle in handles {
                if let Err(payload) = handle.join() {
                    first_panic.get_or_insert_with(|| panic_message(payload.as_ref()));
                }
            }
            match first_panic {
                Some(message) => Err(FarbwerkError::WorkerPanic(message)),
                None => Ok(()),
            }
        })
    }
}

impl Default for RecolorEngine {
    fn default() -> Self {
        Self::new(PixelTransform::default(), PartitionMode::default())
    }
}

/// Split the flat destination buffer into per-region row slices.
///
/// Walks the buffer row by row; within each row the regions that intersect it
/// tile the row contiguously left to right (the partitioner guarantees an
/// exact cover), so plain `split_at_mut` hands each task its exclusive
/// segments without copying.
fn carve_tasks<'buf>(
    destination: &'buf mut RgbImage,
    width: u32,
    regions: &[Region],
) -> Vec<WorkerTask<'buf>> {
    let stride = width as usize * 3;
    let mut tasks: Vec<WorkerTask<'buf>> = regions
        .iter()
        .map(|&region| WorkerTask {
            region,
            rows: Vec::with_capacity(region.height() as usize),
        })
        .collect();

    let buffer: &mut [u8] = &mut **destination;
    for (y, row) in buffer.chunks_exact_mut(stride).enumerate() {
        let y = y as u32;
        let mut rest = row;
        for (index, region) in regions.iter().enumerate() {
            if !region.contains_row(y) {
                continue;
            }
            let (segment, tail) = rest.split_at_mut(region.width() as usize * 3);
            tasks[index].rows.push(segment);
            rest = tail;
        }
        debug_assert!(rest.is_empty(), "row not fully covered by regions");
    }
    tasks
}

/// Human-readable message out of a worker's panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Deterministic multi-colour test image; mixes gray and saturated
    /// pixels so both transform branches run.
    fn patterned_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let base = ((x * 31 + y * 17) % 251) as u8;
            if (x + y) % 3 == 0 {
                // Near-gray: channels within a few steps of each other.
                Rgb([base, base.saturating_add(5), base.saturating_sub(4)])
            } else {
                // Saturated: large channel spread.
                Rgb([base, base.wrapping_mul(3), 255 - base])
            }
        })
    }

    /// Verify the reference end-to-end case: a 4x4 all-(128,128,128) image
    /// with deltas (10,80,20) and tolerance 30 becomes all (138,48,108),
    /// identically for 1 and 4 workers.
    #[test]
    fn uniform_gray_image_reference_output() {
        let source = RgbImage::from_pixel(4, 4, Rgb([128, 128, 128]));
        let engine = RecolorEngine::default();

        let serial = engine.recolor_to_new(&source, 1).expect("1 worker");
        let parallel = engine.recolor_to_new(&source, 4).expect("4 workers");

        for pixel in serial.pixels() {
            assert_eq!(pixel.0, [138, 48, 108]);
        }
        assert_eq!(serial.as_raw(), parallel.as_raw());
    }

    /// Verify the worker count never changes the output, including widths
    /// that leave a remainder strip.
    #[test]
    fn output_identical_across_worker_counts() {
        let source = patterned_image(37, 23);
        let engine = RecolorEngine::default();

        let baseline = engine.recolor_to_new(&source, 1).expect("baseline");
        for workers in [2, 3, 5, 8] {
            let out = engine.recolor_to_new(&source, workers).expect("parallel");
            assert_eq!(
                out.as_raw(),
                baseline.as_raw(),
                "mismatch at {workers} workers"
            );
        }
    }

    /// Verify the grid mode produces the same pixels as the strip mode.
    #[test]
    fn grid_mode_matches_strip_mode() {
        let source = patterned_image(40, 30);
        let strip_engine = RecolorEngine::new(PixelTransform::default(), PartitionMode::VerticalStrips);
        let grid_engine = RecolorEngine::new(PixelTransform::default(), PartitionMode::Grid);

        let strip_out = strip_engine.recolor_to_new(&source, 3).expect("strips");
        let grid_out = grid_engine.recolor_to_new(&source, 3).expect("grid");
        assert_eq!(strip_out.as_raw(), grid_out.as_raw());
    }

    /// Verify non-gray pixels survive the full engine path unchanged.
    #[test]
    fn saturated_pixels_pass_through_engine() {
        let source = RgbImage::from_pixel(8, 8, Rgb([200, 50, 10]));
        let engine = RecolorEngine::default();
        let out = engine.recolor_to_new(&source, 2).expect("recolor");
        for pixel in out.pixels() {
            assert_eq!(pixel.0, [200, 50, 10]);
        }
    }

    /// Verify mismatched destination dimensions fail before any work.
    #[test]
    fn mismatched_destination_rejected() {
        let source = patterned_image(16, 16);
        let mut destination = RgbImage::new(16, 8);
        let engine = RecolorEngine::default();

        let err = engine
            .recolor(&source, &mut destination, 2)
            .expect_err("must reject mismatched dimensions");
        assert!(matches!(err, FarbwerkError::InvalidArgument(_)));
        // Nothing was written.
        assert!(destination.as_raw().iter().all(|&b| b == 0));
    }

    /// Verify a worker count wider than the image is rejected.
    #[test]
    fn oversubscribed_worker_count_rejected() {
        let source = patterned_image(3, 32);
        let engine = RecolorEngine::default();
        let err = engine
            .recolor_to_new(&source, 10)
            .expect_err("must reject n > width");
        assert!(matches!(err, FarbwerkError::InvalidArgument(_)));
    }

    /// Verify a zero worker count is rejected.
    #[test]
    fn zero_worker_count_rejected() {
        let source = patterned_image(8, 8);
        let engine = RecolorEngine::default();
        assert!(engine.recolor_to_new(&source, 0).is_err());
    }

    /// Verify every destination pixel is written exactly once by checking a
    /// sentinel-filled destination holds only transformed values afterwards.
    #[test]
    fn destination_fully_overwritten() {
        let source = RgbImage::from_pixel(10, 6, Rgb([128, 128, 128]));
        let mut destination = RgbImage::from_pixel(10, 6, Rgb([1, 2, 3]));
        let engine = RecolorEngine::default();

        engine
            .recolor(&source, &mut destination, 4)
            .expect("recolor");
        for pixel in destination.pixels() {
            assert_eq!(pixel.0, [138, 48, 108]);
        }
    }
}
