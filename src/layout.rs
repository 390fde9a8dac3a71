//! Sheet geometry.
//!
//! Pure functions computing the canvas size and every pixel offset the
//! compositor draws at. Nothing here touches images or fonts, so the whole
//! layout is unit testable from item counts alone.
//!
//! ## Vertical structure
//!
//! ```text
//! spacing
//! stats line                    STATS_HEIGHT
//! spacing
//! top divider                   DIVIDER_THICKNESS
//! spacing
//! [section title + spacing]     grouped mode only, per section
//! rows × (thumb + caption + spacing)
//! bottom divider                DIVIDER_THICKNESS
//! spacing
//! footer                        FOOTER_HEIGHT
//! spacing
//! ```
//!
//! With no items the grid body disappears and the bottom divider sits one
//! spacing unit below the top divider.

/// Edge of a normalized thumbnail.
pub const THUMBNAIL_SIZE: u32 = 256;
/// Band under each thumbnail reserved for two caption lines.
pub const CAPTION_HEIGHT: u32 = 60;
/// Gap between cells, margins, and bands.
pub const GRID_SPACING: u32 = 48;
pub const STATS_HEIGHT: u32 = 40;
pub const FOOTER_HEIGHT: u32 = 40;
pub const SECTION_TITLE_HEIGHT: u32 = 40;
pub const DIVIDER_THICKNESS: u32 = 2;

/// Inset of caption text from the thumbnail's left and bottom edges.
pub const CAPTION_INSET: u32 = 5;
/// Vertical distance between caption lines.
pub const CAPTION_LINE_STEP: u32 = 25;
/// Maximum pixel width of a caption line.
pub const CAPTION_MAX_WIDTH: u32 = THUMBNAIL_SIZE - 2 * CAPTION_INSET;

/// Height of one grid row including its caption band and trailing gap.
pub const ROW_HEIGHT: u32 = THUMBNAIL_SIZE + CAPTION_HEIGHT + GRID_SPACING;
/// Height of a section title band including its trailing gap.
pub const SECTION_BAND_HEIGHT: u32 = SECTION_TITLE_HEIGHT + GRID_SPACING;

const TOP_BLOCK: u32 = GRID_SPACING + STATS_HEIGHT + GRID_SPACING + DIVIDER_THICKNESS + GRID_SPACING;
const BOTTOM_BLOCK: u32 = DIVIDER_THICKNESS + GRID_SPACING + FOOTER_HEIGHT + GRID_SPACING;

/// Vertical band occupied by one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBand {
    /// Where the section title is drawn; `None` in flat mode.
    pub title_y: Option<u32>,
    /// Top of the first grid row.
    pub grid_top: u32,
    pub rows: u32,
    pub count: usize,
}

/// Grid position of one item within its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    /// Top-left pixel of the thumbnail.
    pub x: u32,
    pub y: u32,
}

impl Cell {
    /// Top-left pixel of caption line `line` (0-based).
    pub fn caption_origin(&self, line: u32) -> (u32, u32) {
        (
            self.x + CAPTION_INSET,
            self.y + THUMBNAIL_SIZE + CAPTION_INSET + line * CAPTION_LINE_STEP,
        )
    }
}

/// Every offset needed to paint a sheet, computed once from counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetGeometry {
    pub width: u32,
    pub height: u32,
    pub per_row: u32,
    pub grouped: bool,
    pub total: usize,
    pub sections: Vec<SectionBand>,
}

/// Number of rows needed for `count` items at `per_row` items per row.
pub fn rows_for(count: usize, per_row: u32) -> u32 {
    let per_row = per_row.max(1) as usize;
    count.div_ceil(per_row) as u32
}

/// Canvas width for a grid `per_row` cells wide.
pub fn canvas_width(per_row: u32) -> u32 {
    per_row * THUMBNAIL_SIZE + (per_row + 1) * GRID_SPACING
}

impl SheetGeometry {
    /// Plan a sheet for sections of the given sizes.
    ///
    /// `per_row` below 1 is treated as 1. In flat mode all sizes are summed
    /// into a single untitled band.
    pub fn plan(per_row: u32, section_sizes: &[usize], grouped: bool) -> Self {
        let per_row = per_row.max(1);
        let width = canvas_width(per_row);
        let total: usize = section_sizes.iter().sum();

        if total == 0 {
            return Self {
                width,
                height: TOP_BLOCK + BOTTOM_BLOCK,
                per_row,
                grouped,
                total,
                sections: Vec::new(),
            };
        }

        let flat_sizes = [total];
        let sizes: &[usize] = if grouped { section_sizes } else { &flat_sizes };

        let mut cursor = TOP_BLOCK;
        let mut sections = Vec::with_capacity(sizes.len());
        for &count in sizes {
            let title_y = grouped.then_some(cursor);
            if grouped {
                cursor += SECTION_BAND_HEIGHT;
            }
            let rows = rows_for(count, per_row);
            sections.push(SectionBand {
                title_y,
                grid_top: cursor,
                rows,
                count,
            });
            cursor += rows * ROW_HEIGHT;
        }

        Self {
            width,
            height: cursor + BOTTOM_BLOCK,
            per_row,
            grouped,
            total,
            sections,
        }
    }

    pub fn stats_origin(&self) -> (u32, u32) {
        (GRID_SPACING, GRID_SPACING)
    }

    pub fn top_divider_y(&self) -> u32 {
        GRID_SPACING + STATS_HEIGHT + GRID_SPACING
    }

    pub fn bottom_divider_y(&self) -> u32 {
        self.height - FOOTER_HEIGHT - GRID_SPACING - DIVIDER_THICKNESS - GRID_SPACING
    }

    pub fn footer_origin(&self) -> (u32, u32) {
        (
            GRID_SPACING,
            self.bottom_divider_y() + DIVIDER_THICKNESS + GRID_SPACING,
        )
    }

    /// Horizontal extent `[start, end)` of the divider lines.
    pub fn divider_span(&self) -> (u32, u32) {
        (GRID_SPACING, self.width - GRID_SPACING)
    }

    pub fn row_count(&self) -> u32 {
        self.sections.iter().map(|s| s.rows).sum()
    }

    /// Cell of item `index` (0-based, per section) in `band`.
    pub fn cell(&self, band: &SectionBand, index: usize) -> Cell {
        let row = (index / self.per_row as usize) as u32;
        let col = (index % self.per_row as usize) as u32;
        Cell {
            row,
            col,
            x: GRID_SPACING + col * (THUMBNAIL_SIZE + GRID_SPACING),
            y: band.grid_top + row * ROW_HEIGHT,
        }
    }
}
