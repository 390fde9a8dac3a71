//! Pure calculation functions for thumbnail geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// How a scaled image lands on the square thumbnail along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Scaled size is smaller than the edge: centered with fill on both sides.
    Pad,
    /// Scaled size equals the edge.
    Exact,
    /// Scaled size exceeds the edge: symmetric crop.
    Crop,
}

impl Fit {
    fn classify(scaled: u32, edge: u32) -> Self {
        match scaled.cmp(&edge) {
            std::cmp::Ordering::Less => Fit::Pad,
            std::cmp::Ordering::Equal => Fit::Exact,
            std::cmp::Ordering::Greater => Fit::Crop,
        }
    }
}

/// Complete plan for turning a source of some size into an `edge`×`edge` square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailPlan {
    pub edge: u32,
    /// Dimensions after the aspect-preserving resize.
    pub scaled: (u32, u32),
    /// Where the scaled image's top-left lands on the square. Negative values
    /// crop that many pixels off the leading edge.
    pub offset: (i64, i64),
    pub fit: (Fit, Fit),
}

impl ThumbnailPlan {
    pub fn needs_resize(&self, source: (u32, u32)) -> bool {
        self.scaled != source
    }
}

/// Scale `source` so its longer side becomes exactly `edge`.
///
/// The shorter side is truncated, never below 1 pixel.
///
/// # Examples
/// ```
/// # use contact_sheet::imaging::fit_dimensions;
/// assert_eq!(fit_dimensions((512, 256), 256), (256, 128));
/// assert_eq!(fit_dimensions((100, 400), 256), (64, 256));
/// ```
pub fn fit_dimensions(source: (u32, u32), edge: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return (edge, edge);
    }

    if src_w > src_h {
        let h = (src_h as f64 * (edge as f64 / src_w as f64)) as u32;
        (edge, h.max(1))
    } else {
        let w = (src_w as f64 * (edge as f64 / src_h as f64)) as u32;
        (w.max(1), edge)
    }
}

/// Signed offset that centers `scaled` within `edge`.
///
/// Positive: pad before the image. Negative: crop that many pixels.
/// Odd remainders go to the trailing side in both cases.
pub fn center_offset(scaled: u32, edge: u32) -> i64 {
    (edge as i64 - scaled as i64) / 2
}

/// Plan placement of an already-scaled image on an `edge`×`edge` square.
pub fn plan_placement(scaled: (u32, u32), edge: u32) -> ThumbnailPlan {
    ThumbnailPlan {
        edge,
        scaled,
        offset: (center_offset(scaled.0, edge), center_offset(scaled.1, edge)),
        fit: (Fit::classify(scaled.0, edge), Fit::classify(scaled.1, edge)),
    }
}

/// Plan a thumbnail for a source of the given dimensions.
pub fn plan_thumbnail(source: (u32, u32), edge: u32) -> ThumbnailPlan {
    plan_placement(fit_dimensions(source, edge), edge)
}
