// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image file I/O glue around the `image` crate: decode to an RGB grid,
// encode a grid back to disk.

use std::path::Path;

use image::RgbImage;
use tracing::{info, instrument};

use farbwerk_core::error::{FarbwerkError, Result};

/// Decode an image file into an RGB pixel grid.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbImage> {
    let decoded = image::open(path.as_ref()).map_err(|err| {
        FarbwerkError::Image(format!("failed to open {}: {err}", path.as_ref().display()))
    })?;
    let rgb = decoded.into_rgb8();
    info!(width = rgb.width(), height = rgb.height(), "image loaded");
    Ok(rgb)
}

/// Encode a pixel grid to a file.  The format is inferred from the file
/// extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_image(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    image.save(path.as_ref()).map_err(|err| {
        FarbwerkError::Image(format!(
            "failed to save image to {}: {err}",
            path.as_ref().display()
        ))
    })?;
    info!("image written");
    Ok(())
}
