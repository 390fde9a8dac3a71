//! Pure Rust image decoding backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, GIF, TIFF, WebP, BMP) | `image::ImageReader` with format sniffing |
//! | RGB conversion | `image::DynamicImage::into_rgb8` (alpha dropped) |

use super::backend::{BackendError, ImageBackend};
use image::{ImageReader, RgbImage};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, e: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

impl ImageBackend for RustBackend {
    fn load_rgb(&self, path: &Path) -> Result<RgbImage, BackendError> {
        // Sniff the content so a mislabeled extension still decodes.
        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| decode_error(path, e))?;
        Ok(img.into_rgb8())
    }
}
