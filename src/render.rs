//! Render pipeline: discovery, geometry, compositing.
//!
//! [`render`] is the whole sheet in one call with every collaborator passed
//! in, which is what the tests drive. [`render_folder`] wires it to the real
//! filesystem, the `image` crate decoder and a font file on disk.
//!
//! Every fatal condition (bad options, missing folder, unusable font) is
//! reported before a canvas is allocated. Individual undecodable files are
//! not fatal; they end up in [`ContactSheet::skipped`].

use crate::color::{ColorError, parse_hex_color};
use crate::compose::{ContactSheet, Palette, compose_sheet};
use crate::config::ConfigError;
use crate::discovery::{DiscoveryError, FileSource, FsSource, discover};
use crate::imaging::{ImageBackend, RustBackend};
use crate::layout::SheetGeometry;
use crate::text::{FontError, GlyphFont, Typeface};
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const MIN_PER_ROW: u32 = 1;
pub const MAX_PER_ROW: u32 = 20;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Font(#[from] FontError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Images per row must be between {MIN_PER_ROW} and {MAX_PER_ROW}, got {0}")]
    InvalidPerRow(u32),
}

/// Validated inputs of one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub root: PathBuf,
    pub per_row: u32,
    pub recurse: bool,
    pub palette: Palette,
}

impl RenderOptions {
    /// Check the column count and parse both colors.
    pub fn new(
        root: impl Into<PathBuf>,
        per_row: u32,
        recurse: bool,
        background: &str,
        text: &str,
    ) -> Result<Self, RenderError> {
        if !(MIN_PER_ROW..=MAX_PER_ROW).contains(&per_row) {
            return Err(RenderError::InvalidPerRow(per_row));
        }
        Ok(Self {
            root: root.into(),
            per_row,
            recurse,
            palette: Palette {
                background: parse_hex_color(background)?,
                text: parse_hex_color(text)?,
            },
        })
    }
}

/// Render a contact sheet for `options.root`.
pub fn render(
    options: &RenderOptions,
    files: &impl FileSource,
    backend: &impl ImageBackend,
    face: &impl Typeface,
    created: NaiveDateTime,
) -> Result<ContactSheet, RenderError> {
    let discovery = discover(files, &options.root, options.recurse)?;
    let geometry = SheetGeometry::plan(options.per_row, &discovery.section_sizes(), discovery.grouped);
    debug!(
        "Planned {}x{} canvas, {} rows of {}",
        geometry.width,
        geometry.height,
        geometry.row_count(),
        geometry.per_row
    );

    let sheet = compose_sheet(&discovery, &geometry, backend, face, options.palette, created);
    info!(
        "Rendered {} of {} images from {}",
        sheet.painted,
        sheet.discovered,
        options.root.display()
    );
    Ok(sheet)
}

/// Render from the real filesystem with the font at `font_path`.
///
/// The folder is checked before the font so a missing folder is reported
/// even when the font is missing too.
pub fn render_folder(options: &RenderOptions, font_path: &Path) -> Result<ContactSheet, RenderError> {
    let files = FsSource;
    if !files.is_dir(&options.root) {
        return Err(DiscoveryError::RootNotFound(options.root.clone()).into());
    }
    let face = GlyphFont::load(font_path)?;
    debug!("Loaded font {}", face.path().display());

    render(
        options,
        &files,
        &RustBackend::new(),
        &face,
        Local::now().naive_local(),
    )
}
