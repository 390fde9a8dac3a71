//! Image loading and thumbnail normalization, pure Rust via the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (PNG, JPEG, GIF, TIFF, WebP, BMP) |
//! | **Resize** | `image::imageops::resize` with `Lanczos3` |
//! | **Crop / pad** | `image::imageops::replace` at a signed center offset |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for fit dimensions and center offsets (unit testable)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Thumbnail**: [`normalize`] and [`load_thumbnail`], combining calculations + backend

pub mod backend;
mod calculations;
pub mod rust_backend;
pub mod thumbnail;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{Fit, ThumbnailPlan, center_offset, fit_dimensions, plan_thumbnail};
pub use rust_backend::RustBackend;
pub use thumbnail::{SkippedItem, ThumbnailOutcome, load_thumbnail, normalize};
