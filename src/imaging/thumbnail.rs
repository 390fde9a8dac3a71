//! Thumbnail normalization.
//!
//! Every thumbnail on a sheet is exactly `edge`×`edge`, whatever the source
//! aspect ratio. The source is resized so its longer side matches the edge,
//! then placed on a square filled with the fill color: centered when it is
//! smaller along an axis, center-cropped when it is larger.
//!
//! Decoding can fail for individual files (truncated downloads, mislabeled
//! extensions). That is an expected outcome, not an error: [`load_thumbnail`]
//! returns [`ThumbnailOutcome::Skipped`] and the caller decides how to lay
//! out the gap.

use super::backend::ImageBackend;
use super::calculations::{plan_placement, plan_thumbnail};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tracing::warn;

/// A file that could not be turned into a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of loading one thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub enum ThumbnailOutcome {
    Ready(RgbImage),
    Skipped(SkippedItem),
}

/// Normalize a decoded raster to an `edge`×`edge` square.
pub fn normalize(source: &RgbImage, edge: u32, fill: Rgb<u8>) -> RgbImage {
    let plan = plan_thumbnail(source.dimensions(), edge);

    if plan.needs_resize(source.dimensions()) {
        let (w, h) = plan.scaled;
        let scaled = imageops::resize(source, w, h, FilterType::Lanczos3);
        place_centered(&scaled, edge, fill)
    } else {
        place_centered(source, edge, fill)
    }
}

/// Center an already-scaled raster on a filled square, cropping any axis
/// longer than `edge` equally from both ends.
fn place_centered(scaled: &RgbImage, edge: u32, fill: Rgb<u8>) -> RgbImage {
    let plan = plan_placement(scaled.dimensions(), edge);
    let mut square = RgbImage::from_pixel(edge, edge, fill);
    imageops::replace(&mut square, scaled, plan.offset.0, plan.offset.1);
    square
}

/// Decode `path` through `backend` and normalize it.
pub fn load_thumbnail(
    backend: &impl ImageBackend,
    path: &Path,
    edge: u32,
    fill: Rgb<u8>,
) -> ThumbnailOutcome {
    match backend.load_rgb(path) {
        Ok(source) => ThumbnailOutcome::Ready(normalize(&source, edge, fill)),
        Err(e) => {
            warn!("Error loading image '{}': {e}", path.display());
            ThumbnailOutcome::Skipped(SkippedItem {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    }
}
