//! Image decoding backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines what every backend must support:
//! decoding a file to an RGB raster.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), using the statically
//! linked decoders from the `image` crate.

use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Trait for image decoding backends.
///
/// `Sync` so thumbnails can be normalized on a rayon pool.
pub trait ImageBackend: Sync {
    /// Decode an image and convert it to 8-bit RGB.
    fn load_rgb(&self, path: &Path) -> Result<RgbImage, BackendError>;
}
