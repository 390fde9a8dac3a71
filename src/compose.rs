//! Sheet compositing.
//!
//! The [`Compositor`] owns the canvas for one render and paints onto it in
//! a fixed top-to-bottom order:
//!
//! 1. background fill
//! 2. stats line (`Found N images`)
//! 3. top divider
//! 4. per section: title (grouped mode), then thumbnails with captions
//! 5. bottom divider
//! 6. `Created on …` footer
//!
//! All coordinates come from a precomputed [`SheetGeometry`]; the compositor
//! never decides where anything goes, only what gets painted there.
//!
//! Thumbnails for a section are normalized on the rayon pool and collected
//! in discovery order before any of them is painted, so the canvas is the
//! same as a sequential render.
//!
//! An item whose file fails to decode leaves its cell empty. Later items
//! keep the cells their discovery position gives them.

use crate::discovery::{Discovery, ImageItem, Section};
use crate::imaging::{ImageBackend, SkippedItem, ThumbnailOutcome, load_thumbnail};
use crate::layout::{
    CAPTION_MAX_WIDTH, Cell, DIVIDER_THICKNESS, GRID_SPACING, SectionBand, SheetGeometry,
    THUMBNAIL_SIZE,
};
use crate::text::{BODY_SIZE, HEADING_SIZE, Typeface, caption_lines};
use chrono::NaiveDateTime;
use image::{Rgb, RgbImage, imageops};
use rayon::prelude::*;
use std::path::Path;
use tracing::debug;

/// Colors used for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb<u8>,
    /// Text, dividers, and thumbnail padding.
    pub text: Rgb<u8>,
}

/// A finished sheet plus what happened while painting it.
#[derive(Debug, Clone)]
pub struct ContactSheet {
    pub image: RgbImage,
    /// Items found by discovery.
    pub discovered: usize,
    /// Thumbnails actually painted.
    pub painted: usize,
    pub skipped: Vec<SkippedItem>,
}

impl ContactSheet {
    /// Write the sheet; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<(), image::ImageError> {
        self.image.save(path)
    }
}

/// Stats line shown above the grid.
pub fn stats_text(total: usize) -> String {
    match total {
        0 => "Not found any image".to_string(),
        1 => "Found 1 image".to_string(),
        n => format!("Found {n} images"),
    }
}

/// Title drawn above a section in grouped mode.
pub fn section_title(section: &Section) -> String {
    format!("- {} ({} images)", section.display_name, section.len())
}

/// Text shown under a thumbnail, before wrapping.
///
/// Grouped sheets prefix the directory relative to the root; root items and
/// flat sheets show just the stem.
pub fn caption_text(section: &Section, item: &ImageItem, grouped: bool) -> String {
    let stem = item.stem();
    if grouped && !section.relative_dir.as_os_str().is_empty() {
        section.relative_dir.join(stem).to_string_lossy().into_owned()
    } else {
        stem
    }
}

/// Footer line for a render started at `created`.
pub fn footer_text(created: NaiveDateTime) -> String {
    created.format("Created on %Y-%m-%d %H:%M:%S").to_string()
}

/// Owns the canvas of one render.
pub struct Compositor<'a, F: Typeface> {
    canvas: RgbImage,
    geometry: &'a SheetGeometry,
    face: &'a F,
    palette: Palette,
}

impl<'a, F: Typeface> Compositor<'a, F> {
    /// Create a canvas of the planned size filled with the background color.
    pub fn new(geometry: &'a SheetGeometry, face: &'a F, palette: Palette) -> Self {
        Self {
            canvas: RgbImage::from_pixel(geometry.width, geometry.height, palette.background),
            geometry,
            face,
            palette,
        }
    }

    pub fn draw_stats(&mut self, total: usize) {
        let origin = self.geometry.stats_origin();
        self.draw_heading(origin, &stats_text(total));
    }

    /// Fill a divider line starting at row `y`.
    pub fn draw_divider(&mut self, y: u32) {
        let (start, end) = self.geometry.divider_span();
        let bottom = (y + DIVIDER_THICKNESS).min(self.canvas.height());
        for py in y..bottom {
            for px in start..end.min(self.canvas.width()) {
                self.canvas.put_pixel(px, py, self.palette.text);
            }
        }
    }

    pub fn draw_section_title(&mut self, band: &SectionBand, section: &Section) {
        if let Some(y) = band.title_y {
            self.draw_heading((GRID_SPACING, y), &section_title(section));
        }
    }

    pub fn place_thumbnail(&mut self, cell: &Cell, thumbnail: &RgbImage) {
        imageops::replace(&mut self.canvas, thumbnail, cell.x as i64, cell.y as i64);
    }

    /// Wrap `text` under the cell's thumbnail, at most two lines.
    pub fn draw_caption(&mut self, cell: &Cell, text: &str) {
        let face = self.face;
        let lines = caption_lines(text, CAPTION_MAX_WIDTH as f32, |s| {
            face.text_width(s, BODY_SIZE)
        });
        for (i, line) in lines.iter().enumerate() {
            let origin = cell.caption_origin(i as u32);
            face.draw_text(&mut self.canvas, origin, line, BODY_SIZE, self.palette.text);
        }
    }

    pub fn draw_footer(&mut self, footer: &str) {
        let origin = self.geometry.footer_origin();
        self.draw_heading(origin, footer);
    }

    pub fn finish(self) -> RgbImage {
        self.canvas
    }

    fn draw_heading(&mut self, origin: (u32, u32), text: &str) {
        self.face
            .draw_text(&mut self.canvas, origin, text, HEADING_SIZE, self.palette.text);
    }

    /// Normalize and paint one band's items; returns (painted, skipped).
    fn paint_band(
        &mut self,
        band: &SectionBand,
        entries: &[(&Section, &ImageItem)],
        backend: &impl ImageBackend,
    ) -> (usize, Vec<SkippedItem>) {
        let fill = self.palette.text;
        let outcomes: Vec<ThumbnailOutcome> = entries
            .par_iter()
            .map(|(_, item)| load_thumbnail(backend, &item.path(), THUMBNAIL_SIZE, fill))
            .collect();

        let mut painted = 0;
        let mut skipped = Vec::new();
        for (index, ((section, item), outcome)) in entries.iter().zip(outcomes).enumerate() {
            match outcome {
                ThumbnailOutcome::Ready(thumbnail) => {
                    let cell = self.geometry.cell(band, index);
                    self.place_thumbnail(&cell, &thumbnail);
                    let caption = caption_text(section, item, self.geometry.grouped);
                    self.draw_caption(&cell, &caption);
                    painted += 1;
                }
                ThumbnailOutcome::Skipped(skip) => skipped.push(skip),
            }
        }
        (painted, skipped)
    }
}

/// Paint a complete sheet for `discovery` laid out by `geometry`.
pub fn compose_sheet<F: Typeface>(
    discovery: &Discovery,
    geometry: &SheetGeometry,
    backend: &impl ImageBackend,
    face: &F,
    palette: Palette,
    created: NaiveDateTime,
) -> ContactSheet {
    // fixed before painting starts: the footer shows when the render began
    let footer = footer_text(created);

    let mut compositor = Compositor::new(geometry, face, palette);
    compositor.draw_stats(discovery.total);
    compositor.draw_divider(geometry.top_divider_y());

    let mut painted = 0;
    let mut skipped = Vec::new();

    if geometry.grouped {
        for (band, section) in geometry.sections.iter().zip(&discovery.sections) {
            compositor.draw_section_title(band, section);
            let entries: Vec<_> = section.items.iter().map(|item| (section, item)).collect();
            let (p, s) = compositor.paint_band(band, &entries, backend);
            painted += p;
            skipped.extend(s);
        }
    } else if let Some(band) = geometry.sections.first() {
        let entries: Vec<_> = discovery
            .sections
            .iter()
            .flat_map(|section| section.items.iter().map(move |item| (section, item)))
            .collect();
        let (p, s) = compositor.paint_band(band, &entries, backend);
        painted += p;
        skipped.extend(s);
    }

    compositor.draw_divider(geometry.bottom_divider_y());
    compositor.draw_footer(&footer);

    debug!(
        "Composed {}x{} sheet: {painted} painted, {} skipped",
        geometry.width,
        geometry.height,
        skipped.len()
    );

    ContactSheet {
        image: compositor.finish(),
        discovered: discovery.total,
        painted,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::{BlockFace, created_at, section};
    use std::path::PathBuf;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn palette() -> Palette {
        Palette {
            background: WHITE,
            text: BLACK,
        }
    }

    fn flat(root: &str, files: &[&str]) -> Discovery {
        let s = section(root, root, "", files);
        Discovery {
            root: PathBuf::from(root),
            grouped: false,
            total: s.len(),
            sections: vec![s],
        }
    }

    // =========================================================================
    // Text helpers
    // =========================================================================

    #[test]
    fn stats_text_pluralizes() {
        assert_eq!(stats_text(0), "Not found any image");
        assert_eq!(stats_text(1), "Found 1 image");
        assert_eq!(stats_text(2), "Found 2 images");
        assert_eq!(stats_text(120), "Found 120 images");
    }

    #[test]
    fn section_title_format() {
        let s = section("/pics/trip", "/pics", "trip", &["a.png", "b.png"]);
        assert_eq!(section_title(&s), "- trip (2 images)");
    }

    #[test]
    fn section_title_keeps_plural_for_one() {
        let s = section("/pics", "/pics", "", &["a.png"]);
        assert_eq!(section_title(&s), "- pics (1 images)");
    }

    #[test]
    fn caption_grouped_includes_relative_dir() {
        let s = section("/pics/trip/day1", "/pics", "trip/day1", &["beach.jpg"]);
        assert_eq!(caption_text(&s, &s.items[0], true), "trip/day1/beach");
    }

    #[test]
    fn caption_grouped_root_item_is_stem() {
        let s = section("/pics", "/pics", "", &["beach.jpg"]);
        assert_eq!(caption_text(&s, &s.items[0], true), "beach");
    }

    #[test]
    fn caption_flat_is_stem() {
        let s = section("/pics/trip", "/pics", "trip", &["beach.jpg"]);
        assert_eq!(caption_text(&s, &s.items[0], false), "beach");
    }

    #[test]
    fn footer_format() {
        assert_eq!(
            footer_text(created_at(2024, 3, 9, 7, 5, 1)),
            "Created on 2024-03-09 07:05:01"
        );
    }

    // =========================================================================
    // Compositing
    // =========================================================================

    #[test]
    fn empty_sheet_has_header_dividers_and_footer_only() {
        let discovery = flat("/pics", &[]);
        let geometry = SheetGeometry::plan(3, &discovery.section_sizes(), false);
        let face = BlockFace::default();

        let sheet = compose_sheet(
            &discovery,
            &geometry,
            &MockBackend::new(),
            &face,
            palette(),
            created_at(2024, 1, 1, 0, 0, 0),
        );

        assert_eq!(sheet.image.height(), 324);
        assert_eq!(sheet.painted, 0);
        let drawn = face.drawn();
        assert_eq!(drawn[0], "Not found any image");
        assert_eq!(drawn[1], "Created on 2024-01-01 00:00:00");
        assert_eq!(drawn.len(), 2);

        // both dividers painted in the text color
        assert_eq!(sheet.image.get_pixel(48, 136), &BLACK);
        assert_eq!(sheet.image.get_pixel(48, 137), &BLACK);
        assert_eq!(sheet.image.get_pixel(48, 138), &WHITE);
        assert_eq!(sheet.image.get_pixel(48, 186), &BLACK);
        assert_eq!(sheet.image.get_pixel(47, 186), &WHITE);
        assert_eq!(sheet.image.get_pixel(sheet.image.width() - 48, 186), &WHITE);
    }

    #[test]
    fn thumbnails_land_in_their_cells() {
        let discovery = flat("/pics", &["a.png", "b.png", "c.png"]);
        let backend = MockBackend::new()
            .with_image("a.png", 256, 256, [255, 0, 0])
            .with_image("b.png", 256, 256, [255, 0, 0])
            .with_image("c.png", 256, 256, [255, 0, 0]);
        let geometry = SheetGeometry::plan(2, &discovery.section_sizes(), false);
        let face = BlockFace::default();

        let sheet = compose_sheet(
            &discovery,
            &geometry,
            &backend,
            &face,
            palette(),
            created_at(2024, 1, 1, 0, 0, 0),
        );

        assert_eq!(sheet.painted, 3);
        assert!(sheet.skipped.is_empty());
        // row 0 col 0, row 0 col 1, row 1 col 0
        assert_eq!(sheet.image.get_pixel(48 + 100, 186 + 100), &RED);
        assert_eq!(sheet.image.get_pixel(352 + 100, 186 + 100), &RED);
        assert_eq!(sheet.image.get_pixel(48 + 100, 186 + 364 + 100), &RED);
        // row 1 col 1 stays background
        assert_eq!(sheet.image.get_pixel(352 + 100, 186 + 364 + 100), &WHITE);
    }

    #[test]
    fn captions_follow_thumbnails_in_order() {
        let discovery = flat("/pics", &["first.png", "second.png"]);
        let backend = MockBackend::new()
            .with_image("first.png", 10, 10, [1, 1, 1])
            .with_image("second.png", 10, 10, [1, 1, 1]);
        let geometry = SheetGeometry::plan(5, &discovery.section_sizes(), false);
        let face = BlockFace::default();

        compose_sheet(
            &discovery,
            &geometry,
            &backend,
            &face,
            palette(),
            created_at(2024, 1, 1, 0, 0, 0),
        );

        assert_eq!(
            face.drawn(),
            vec![
                "Found 2 images",
                "first",
                "second",
                "Created on 2024-01-01 00:00:00"
            ]
        );
        assert_eq!(face.origin_of("first"), Some((53, 186 + 261)));
        assert_eq!(face.origin_of("second"), Some((357, 186 + 261)));
    }

    #[test]
    fn long_caption_is_cut_to_two_lines() {
        let name = format!("{}.png", "x".repeat(80));
        let discovery = flat("/pics", &[name.as_str()]);
        let backend = MockBackend::new().with_image(&name, 10, 10, [1, 1, 1]);
        let geometry = SheetGeometry::plan(1, &discovery.section_sizes(), false);
        let face = BlockFace::default();

        compose_sheet(
            &discovery,
            &geometry,
            &backend,
            &face,
            palette(),
            created_at(2024, 1, 1, 0, 0, 0),
        );

        let drawn = face.drawn();
        // stats, two caption lines, footer
        assert_eq!(drawn.len(), 4);
        assert!(drawn[2].ends_with("..."));
        assert_eq!(face.origin_of(&drawn[1]), Some((53, 186 + 261)));
        assert_eq!(face.origin_of(&drawn[2]), Some((53, 186 + 261 + 25)));
    }

    #[test]
    fn grouped_sheet_draws_section_titles() {
        let root = section("/pics", "/pics", "", &["a.png"]);
        let sub = section("/pics/sub", "/pics", "sub", &["b.png", "c.png"]);
        let discovery = Discovery {
            root: PathBuf::from("/pics"),
            grouped: true,
            total: 3,
            sections: vec![root, sub],
        };
        let backend = MockBackend::new()
            .with_image("a.png", 256, 256, [255, 0, 0])
            .with_image("b.png", 256, 256, [255, 0, 0])
            .with_image("c.png", 256, 256, [255, 0, 0]);
        let geometry = SheetGeometry::plan(2, &discovery.section_sizes(), true);
        let face = BlockFace::default();

        let sheet = compose_sheet(
            &discovery,
            &geometry,
            &backend,
            &face,
            palette(),
            created_at(2024, 1, 1, 0, 0, 0),
        );

        assert_eq!(
            face.drawn(),
            vec![
                "Found 3 images",
                "- pics (1 images)",
                "a",
                "- sub (2 images)",
                "sub/b",
                "sub/c",
                "Created on 2024-01-01 00:00:00"
            ]
        );
        assert_eq!(face.origin_of("- pics (1 images)"), Some((48, 186)));
        let second_title_y = 186 + 88 + 364;
        assert_eq!(face.origin_of("- sub (2 images)"), Some((48, second_title_y)));
        // second section restarts at row 0
        let second_grid = second_title_y + 88;
        assert_eq!(sheet.image.get_pixel(48 + 10, second_grid + 10), &RED);
        assert_eq!(sheet.image.get_pixel(352 + 10, second_grid + 10), &RED);
    }

    #[test]
    fn undecodable_item_leaves_gap() {
        let discovery = flat("/pics", &["good1.png", "bad.png", "good2.png"]);
        let backend = MockBackend::new()
            .with_image("good1.png", 256, 256, [255, 0, 0])
            .with_image("good2.png", 256, 256, [255, 0, 0]);
        let geometry = SheetGeometry::plan(3, &discovery.section_sizes(), false);
        let face = BlockFace::default();

        let sheet = compose_sheet(
            &discovery,
            &geometry,
            &backend,
            &face,
            palette(),
            created_at(2024, 1, 1, 0, 0, 0),
        );

        assert_eq!(sheet.discovered, 3);
        assert_eq!(sheet.painted, 2);
        assert_eq!(sheet.skipped.len(), 1);
        assert_eq!(sheet.skipped[0].path, PathBuf::from("/pics/bad.png"));

        assert_eq!(sheet.image.get_pixel(48 + 10, 196), &RED);
        assert_eq!(sheet.image.get_pixel(352 + 10, 196), &WHITE);
        assert_eq!(sheet.image.get_pixel(656 + 10, 196), &RED);
        assert!(!face.drawn().iter().any(|t| t == "bad"));
        // stats still report what was discovered
        assert_eq!(face.drawn()[0], "Found 3 images");
    }

    #[test]
    fn thumbnail_padding_uses_text_color() {
        let discovery = flat("/pics", &["wide.png"]);
        let backend = MockBackend::new().with_image("wide.png", 512, 256, [255, 0, 0]);
        let geometry = SheetGeometry::plan(1, &discovery.section_sizes(), false);
        let face = BlockFace::default();
        let colors = Palette {
            background: WHITE,
            text: Rgb([0, 0, 255]),
        };

        let sheet = compose_sheet(
            &discovery,
            &geometry,
            &backend,
            &face,
            colors,
            created_at(2024, 1, 1, 0, 0, 0),
        );

        // padded strip above the 256x128 band is text-colored, not background
        assert_eq!(sheet.image.get_pixel(48 + 128, 186 + 10), &Rgb([0, 0, 255]));
        assert_eq!(sheet.image.get_pixel(48 + 128, 186 + 128), &RED);
    }

    #[test]
    fn identical_inputs_render_identically() {
        let discovery = flat("/pics", &["a.png", "b.png", "c.png", "d.png"]);
        let backend = MockBackend::new()
            .with_image("a.png", 300, 200, [10, 20, 30])
            .with_image("b.png", 50, 400, [40, 50, 60])
            .with_image("c.png", 256, 256, [70, 80, 90])
            .with_image("d.png", 1000, 10, [100, 110, 120]);
        let geometry = SheetGeometry::plan(2, &discovery.section_sizes(), false);
        let when = created_at(2024, 6, 1, 12, 0, 0);

        let first = compose_sheet(
            &discovery,
            &geometry,
            &backend,
            &BlockFace::default(),
            palette(),
            when,
        );
        let second = compose_sheet(
            &discovery,
            &geometry,
            &backend,
            &BlockFace::default(),
            palette(),
            when,
        );
        assert_eq!(first.image, second.image);
    }
}
