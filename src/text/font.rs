//! TTF font measurement and rendering.
//!
//! [`GlyphFont`] wraps an `ab_glyph` font loaded from disk. Text is drawn
//! straight onto the RGB canvas with per-pixel coverage blending, so glyph
//! edges are anti-aliased against whatever is already there.
//!
//! Sizes are em sizes in pixels: at size 20 the font's em square is 20px
//! tall, independent of the font's own ascent/descent proportions.

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Font file '{0}' not found")]
    NotFound(PathBuf),
    #[error("Failed to load font '{path}': {reason}")]
    Load { path: PathBuf, reason: String },
}

/// Something that can measure and paint a line of text.
pub trait Typeface {
    /// Advance width of `text` at em size `size`.
    fn text_width(&self, text: &str, size: f32) -> f32;

    /// Paint `text` with the top of its ascender line at `origin`.
    fn draw_text(&self, canvas: &mut RgbImage, origin: (u32, u32), text: &str, size: f32, color: Rgb<u8>);
}

/// A TrueType/OpenType font loaded from a file.
#[derive(Clone)]
pub struct GlyphFont {
    font: FontArc,
    path: PathBuf,
}

impl std::fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFont").field("path", &self.path).finish()
    }
}

impl GlyphFont {
    /// Load a font file. Missing files and unparsable data are distinct errors.
    pub fn load(path: &Path) -> Result<Self, FontError> {
        if !path.is_file() {
            return Err(FontError::NotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|e| FontError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(bytes, path)
    }

    /// Parse font data already in memory; `origin` is only used in errors.
    pub fn from_bytes(bytes: Vec<u8>, origin: &Path) -> Result<Self, FontError> {
        let font = FontArc::try_from_vec(bytes).map_err(|e| FontError::Load {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            font,
            path: origin.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pixel scale giving an em square of `size` pixels.
    fn scale(&self, size: f32) -> PxScale {
        match self.font.units_per_em() {
            Some(units) if units > 0.0 => PxScale::from(size * self.font.height_unscaled() / units),
            _ => PxScale::from(size),
        }
    }

    /// Glyph ids and their x offsets from the line start, kerning applied.
    fn layout(&self, text: &str, scale: PxScale) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = self.font.as_scaled(scale);
        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret = 0.0f32;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = self.font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push((id, caret));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
        (glyphs, caret)
    }
}

impl Typeface for GlyphFont {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        self.layout(text, self.scale(size)).1
    }

    fn draw_text(&self, canvas: &mut RgbImage, origin: (u32, u32), text: &str, size: f32, color: Rgb<u8>) {
        let scale = self.scale(size);
        let ascent = self.font.as_scaled(scale).ascent();
        let (glyphs, _) = self.layout(text, scale);
        let (ox, oy) = (origin.0 as f32, origin.1 as f32);

        for (id, x) in glyphs {
            let glyph = id.with_scale_and_position(scale, point(ox + x, oy + ascent));
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                blend_pixel(canvas, px, py, color, coverage);
            });
        }
    }
}

/// Mix `color` into the canvas pixel at `(x, y)` by `coverage` (0..=1).
/// Out-of-bounds coordinates are ignored.
pub fn blend_pixel(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let c = coverage.clamp(0.0, 1.0);
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    for (d, s) in dst.0.iter_mut().zip(color.0) {
        *d = (*d as f32 * (1.0 - c) + s as f32 * c).round() as u8;
    }
}
