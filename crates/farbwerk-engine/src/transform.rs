// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-pixel recolor rule: desaturate-detection plus a fixed channel shift.

use farbwerk_core::types::RecolorDeltas;

/// Pure per-pixel recolor rule.
///
/// A pixel counts as gray when all three pairwise channel differences are
/// below the tolerance.  Gray pixels get the configured channel shift (red
/// added, green and blue subtracted, saturating at the channel bounds); every
/// other pixel passes through unchanged.
///
/// The rule is total over the full RGB cube and has no state, which is what
/// lets the engine apply it from many worker threads without coordination.
#[derive(Debug, Clone, Copy)]
pub struct PixelTransform {
    /// Maximum pairwise channel difference for a pixel to count as gray.
    tolerance: u8,
    /// Channel shift applied to gray pixels.
    deltas: RecolorDeltas,
}

impl PixelTransform {
    pub fn new(tolerance: u8, deltas: RecolorDeltas) -> Self {
        Self { tolerance, deltas }
    }

    /// Whether the pixel's channels are pairwise within the tolerance.
    ///
    /// Symmetric under any permutation of the channels: each check uses an
    /// absolute difference, so argument order never matters.
    pub fn is_gray(&self, r: u8, g: u8, b: u8) -> bool {
        r.abs_diff(g) < self.tolerance
            && r.abs_diff(b) < self.tolerance
            && g.abs_diff(b) < self.tolerance
    }

    /// Map one input pixel to one output pixel.
    pub fn apply(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        if self.is_gray(r, g, b) {
            [
                r.saturating_add(self.deltas.red),
                g.saturating_sub(self.deltas.green),
                b.saturating_sub(self.deltas.blue),
            ]
        } else {
            [r, g, b]
        }
    }
}

impl Default for PixelTransform {
    fn default() -> Self {
        Self::new(30, RecolorDeltas::default())
    }
}
