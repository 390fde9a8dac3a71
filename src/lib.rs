//! # Contact Sheet
//!
//! Renders every image in a folder onto one contact sheet: a grid of
//! uniform square thumbnails with filename captions, a stats line on top,
//! and a timestamped footer. With subfolders enabled, each folder that holds
//! images becomes its own titled section.
//!
//! # Pipeline
//!
//! ```text
//! 1. Discover   folder     →  Discovery       (sections of image files)
//! 2. Plan       counts     →  SheetGeometry   (canvas size, every cell)
//! 3. Compose    discovery  →  ContactSheet    (thumbnails, captions, text)
//! ```
//!
//! Planning only needs counts, so the canvas size is known before a single
//! file is decoded. Every fatal problem (missing folder, bad color, missing
//! font) surfaces before a canvas exists; files that fail to decode are
//! skipped and reported on the returned [`ContactSheet`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`discovery`] | Finds supported image files, flat or one section per folder |
//! | [`layout`] | Pure geometry: canvas size, section bands, cell positions |
//! | [`imaging`] | Decoding backend and square thumbnail normalization |
//! | [`text`] | Font measurement/drawing and caption wrapping |
//! | [`compose`] | Paints a planned sheet onto an RGB canvas |
//! | [`render`] | Validated options and the end-to-end render call |
//! | [`color`] | `#RRGGBB` parsing |
//! | [`config`] | `contact-sheet.toml` loading, merging, and validation |
//! | [`descriptor`] | Static node descriptor for workflow hosts |
//! | [`tensor`] | Float tensor view of a finished sheet |
//! | [`output`] | CLI summary formatting |
//!
//! # Determinism
//!
//! The same folder contents, options, font and timestamp always produce the
//! same pixels. Thumbnails are normalized in parallel but painted in
//! discovery order.

pub mod color;
pub mod compose;
pub mod config;
pub mod descriptor;
pub mod discovery;
pub mod imaging;
pub mod layout;
pub mod output;
pub mod render;
pub mod tensor;
pub mod text;

pub use compose::{ContactSheet, Palette};
pub use render::{RenderError, RenderOptions, render, render_folder};
pub use tensor::SheetTensor;

#[cfg(test)]
pub(crate) mod test_helpers;
