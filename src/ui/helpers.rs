//! Shared rendering utilities.
//!
//! Text is measured in terminal columns, so wide (CJK) characters count twice and titles
//! are always cut on character boundaries.

use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Positions the cursor at a specific row and column (1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Cuts `text` to at most `width` columns, ending in `...` when shortened.
///
/// ```rust
/// use moviedeck::ui::helpers::truncate;
///
/// assert_eq!(truncate("The Lord of the Rings", 10), "The Lor...");
/// assert_eq!(truncate("Heat", 10), "Heat");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    cut(text, width).0
}

/// [`truncate`] for highlighted text: ranges are cut back to the characters that remain,
/// so no highlight lands on the ellipsis.
///
/// ```rust
/// use moviedeck::ui::helpers::truncate_highlighted;
///
/// let (text, ranges) = truncate_highlighted("The Matrix Reloaded", &[(4, 10), (11, 19)], 12);
/// assert_eq!(text, "The Matri...");
/// assert_eq!(ranges, vec![(4, 9)]);
/// ```
#[must_use]
pub fn truncate_highlighted(
    text: &str,
    ranges: &[(usize, usize)],
    width: usize,
) -> (String, Vec<(usize, usize)>) {
    let (shown, kept) = cut(text, width);
    let ranges = ranges
        .iter()
        .map(|&(start, end)| (start, end.min(kept)))
        .filter(|(start, end)| start < end)
        .collect();
    (shown, ranges)
}

/// Display width of `text` in terminal columns.
#[must_use]
pub fn width_of(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Wraps `text` in an OSC 8 hyperlink to `url`. Terminals without hyperlink support show
/// the text alone.
#[must_use]
pub fn hyperlink(url: &str, text: &str) -> String {
    format!("\u{1b}]8;;{url}\u{1b}\\{text}\u{1b}]8;;\u{1b}\\")
}

/// The rightmost part of `text` that fits in `width` columns, for inputs that scroll as
/// they grow.
#[must_use]
pub fn tail(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    text[start..].to_string()
}

/// The shortened text and how many characters of the original it keeps.
fn cut(text: &str, width: usize) -> (String, usize) {
    if width_of(text) <= width {
        return (text.to_string(), text.chars().count());
    }

    let (room, ellipsis) = if width <= ELLIPSIS.len() {
        (width, "")
    } else {
        (width - ELLIPSIS.len(), ELLIPSIS)
    };

    let mut shown = String::new();
    let mut used = 0;
    let mut kept = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > room {
            break;
        }
        shown.push(c);
        used += w;
        kept += 1;
    }
    shown.push_str(ellipsis);
    (shown, kept)
}

/// Prints `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices with exclusive end, in ascending order.
/// After each highlighted section the `base` style is restored, so highlights work on
/// both normal and selected rows.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, base: &str) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}{base}", Theme::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
