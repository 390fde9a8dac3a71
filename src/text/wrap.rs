//! Caption wrapping.
//!
//! Filenames have no spaces to break on, so wrapping is greedy per
//! character: a line grows one character at a time until the next one would
//! overflow, then a new line starts with that character.

/// Appended to the last kept line when a caption is cut short.
pub const ELLIPSIS: &str = "...";

/// Maximum caption lines under a thumbnail.
pub const MAX_CAPTION_LINES: usize = 2;

/// Split `text` into lines no wider than `max_width` according to `measure`.
///
/// A single character wider than `max_width` still gets a line of its own,
/// so the result never contains empty lines. Empty input yields no lines.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);

        if current.is_empty() || measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Keep at most [`MAX_CAPTION_LINES`] lines, marking truncation.
///
/// When lines are dropped, trailing dots on the last kept line are replaced
/// by a single [`ELLIPSIS`].
pub fn fit_caption(mut lines: Vec<String>) -> Vec<String> {
    if lines.len() > MAX_CAPTION_LINES {
        lines.truncate(MAX_CAPTION_LINES);
        if let Some(last) = lines.last_mut() {
            let kept = last.trim_end_matches('.').len();
            last.truncate(kept);
            last.push_str(ELLIPSIS);
        }
    }
    lines
}

/// Wrap and fit in one step.
pub fn caption_lines(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    fit_caption(wrap_text(text, max_width, measure))
}
