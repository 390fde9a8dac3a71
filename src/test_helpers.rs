//! Shared test utilities for the contact-sheet test suite.
//!
//! Provides fixture writers for real image files, hand-built discovery
//! data, and [`BlockFace`], a [`Typeface`] that needs no font asset.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_png(&tmp.path().join("red.png"), 64, 32, [255, 0, 0]);
//!
//! let face = BlockFace::default();
//! // ... render with `&face` ...
//! assert_eq!(face.drawn()[0], "Found 1 image");
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use image::{ImageEncoder, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::discovery::{ImageItem, Section};
use crate::text::Typeface;
use crate::text::font::blend_pixel;

// =========================================================================
// Fixture files
// =========================================================================

/// Write a solid-color PNG.
pub fn write_png(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(rgb))
        .save(path)
        .unwrap();
}

/// Write a gradient JPEG with the given dimensions.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

// =========================================================================
// Discovery data
// =========================================================================

/// Build a section for `dir` under `root` without touching the filesystem.
///
/// `relative` is the directory relative to root (`""` for the root itself).
pub fn section(dir: &str, root: &str, relative: &str, files: &[&str]) -> Section {
    let dir = PathBuf::from(dir);
    let display_name = if relative.is_empty() {
        Path::new(root)
            .file_name()
            .unwrap()
            .to_string_lossy()
            .to_string()
    } else {
        relative.to_string()
    };
    Section {
        items: files
            .iter()
            .map(|f| ImageItem {
                dir: dir.clone(),
                file_name: f.to_string(),
            })
            .collect(),
        dir,
        display_name,
        relative_dir: PathBuf::from(relative),
    }
}

pub fn created_at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

// =========================================================================
// Block typeface
// =========================================================================

/// Monospace stand-in font: every character advances half the em size and
/// is painted as a solid block. Records every string it draws, in order.
#[derive(Default)]
pub struct BlockFace {
    drawn: Mutex<Vec<(String, (u32, u32))>>,
}

impl BlockFace {
    /// Drawn strings in paint order.
    pub fn drawn(&self) -> Vec<String> {
        self.drawn
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }

    /// Origin of the first drawn string equal to `text`.
    pub fn origin_of(&self, text: &str) -> Option<(u32, u32)> {
        self.drawn
            .lock()
            .unwrap()
            .iter()
            .find(|(t, _)| t == text)
            .map(|(_, o)| *o)
    }
}

impl Typeface for BlockFace {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size / 2.0
    }

    fn draw_text(&self, canvas: &mut RgbImage, origin: (u32, u32), text: &str, size: f32, color: Rgb<u8>) {
        self.drawn
            .lock()
            .unwrap()
            .push((text.to_string(), origin));

        let advance = (size / 2.0) as i64;
        let height = (size / 2.0) as i64;
        for (i, _) in text.chars().enumerate() {
            let left = origin.0 as i64 + i as i64 * advance;
            for y in 0..height {
                for x in 1..advance.max(2) - 1 {
                    blend_pixel(canvas, left + x, origin.1 as i64 + y, color, 1.0);
                }
            }
        }
    }
}
