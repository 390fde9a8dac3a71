//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Rendered 5 of 6 images → contact-sheet.png (1568x1036)
//! Skipped
//!     001 broken.png
//!         Reason: Failed to decode photos/broken.png: ...
//! ```
//!
//! The summary line always comes first. The `Skipped` block only appears
//! when at least one file could not be decoded.
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::compose::ContactSheet;
use crate::imaging::SkippedItem;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Lines describing files that were found but could not be painted.
pub fn format_skipped(skipped: &[SkippedItem]) -> Vec<String> {
    if skipped.is_empty() {
        return Vec::new();
    }
    let mut lines = vec!["Skipped".to_string()];
    for (i, item) in skipped.iter().enumerate() {
        let name = item
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| item.path.display().to_string());
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), name));
        lines.push(format!("{}Reason: {}", indent(2), item.reason));
    }
    lines
}

/// Summary of a finished render written to `output`.
pub fn format_render_summary(sheet: &ContactSheet, output: &Path) -> Vec<String> {
    let (width, height) = sheet.image.dimensions();
    let mut lines = vec![format!(
        "Rendered {} of {} \u{2192} {} ({}x{})",
        sheet.painted,
        plural(sheet.discovered, "image"),
        output.display(),
        width,
        height
    )];
    lines.extend(format_skipped(&sheet.skipped));
    lines
}

pub fn print_render_summary(sheet: &ContactSheet, output: &Path) {
    for line in format_render_summary(sheet, output) {
        println!("{line}");
    }
}
