//! Text measurement, wrapping, and rendering.
//!
//! - **Font**: [`Typeface`] trait + [`GlyphFont`] (`ab_glyph`)
//! - **Wrap**: greedy per-character caption wrapping with a two-line limit

pub mod font;
pub mod wrap;

pub use font::{FontError, GlyphFont, Typeface};
pub use wrap::{ELLIPSIS, MAX_CAPTION_LINES, caption_lines, fit_caption, wrap_text};

/// Em size of caption text under thumbnails.
pub const BODY_SIZE: f32 = 20.0;
/// Em size of the stats line, section titles, and footer.
pub const HEADING_SIZE: f32 = 24.0;
