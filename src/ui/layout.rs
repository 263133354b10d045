//! Pane geometry shared by the renderer and mouse hit-testing.
//!
//! Rows and columns are 1-indexed, matching [`position_cursor`](crate::ui::helpers::position_cursor).
//!
//! ```text
//! row 1       (blank)
//! row 2       header
//! row 3       border
//! rows 4-6    search bar
//! rows 7..    results | favorites   (suggestions dropdown overlays from row 7 down)
//! rows-2      border
//! rows-1      footer
//! ```
//!
//! Each panel has a title row followed by cards of [`CARD_HEIGHT`] rows: a gap row (where a
//! drop placeholder is drawn), the title row, a detail row, and the IMDb link row.

use crate::ui::helpers::width_of;
use std::ops::Range;

/// Rows per card, including the leading gap row.
pub const CARD_HEIGHT: usize = 4;

/// Horizontal margin around the search box.
pub const SEARCH_BOX_MARGIN: usize = 2;

const MIN_FAVORITES_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.height
            && col >= self.col
            && col < self.col + self.width
    }

    #[must_use]
    pub const fn bottom(&self) -> usize {
        self.row + self.height
    }
}

/// Where a point falls inside a card list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardHit {
    /// On a card. `upper` is true above the card's vertical midpoint.
    Card { index: usize, upper: bool, on_button: bool },
    /// In the panel's empty area below the last card.
    BelowLast,
    /// On the panel title row or outside the panel.
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    pub header_row: usize,
    pub search: Rect,
    pub results: Rect,
    pub favorites: Rect,
    pub border_row: usize,
    pub footer_row: usize,
}

impl Layout {
    #[must_use]
    pub fn compute(rows: usize, cols: usize) -> Self {
        let footer_row = rows.saturating_sub(1).max(1);
        let border_row = footer_row.saturating_sub(1);
        let panels_top = 7;
        let panels_height = border_row.saturating_sub(panels_top);

        let favorites_width = (cols * 2 / 5).max(MIN_FAVORITES_WIDTH).min(cols / 2);
        let results_width = cols - favorites_width;

        Self {
            rows,
            cols,
            header_row: 2,
            search: Rect {
                row: 4,
                col: SEARCH_BOX_MARGIN + 1,
                width: cols.saturating_sub(SEARCH_BOX_MARGIN * 2),
                height: 3,
            },
            results: Rect {
                row: panels_top,
                col: 1,
                width: results_width,
                height: panels_height,
            },
            favorites: Rect {
                row: panels_top,
                col: results_width + 1,
                width: favorites_width,
                height: panels_height,
            },
            border_row,
            footer_row,
        }
    }

    /// Dropdown area under the search bar for `entries` lines.
    #[must_use]
    pub fn dropdown(&self, entries: usize) -> Rect {
        let available = self.border_row.saturating_sub(self.search.bottom());
        Rect {
            row: self.search.bottom(),
            col: self.search.col,
            width: self.search.width,
            height: entries.min(available),
        }
    }
}

/// Number of whole cards a panel can show.
#[must_use]
pub const fn card_capacity(panel: &Rect) -> usize {
    panel.height.saturating_sub(1) / CARD_HEIGHT
}

/// First row of the card in visible slot `slot` (its gap row).
#[must_use]
pub const fn card_top(panel: &Rect, slot: usize) -> usize {
    panel.row + 1 + slot * CARD_HEIGHT
}

/// Range of list indices shown in a panel, keeping `selected` visible.
///
/// The selection is kept near the middle of the window, as far as the list allows.
#[must_use]
pub fn visible_window(len: usize, selected: usize, capacity: usize) -> Range<usize> {
    if capacity == 0 || len == 0 {
        return 0..0;
    }
    if len <= capacity {
        return 0..len;
    }

    let start = selected.saturating_sub(capacity / 2).min(len - capacity);
    start..start + capacity
}

/// Width of the toggle button drawn for `label`.
#[must_use]
pub fn button_width(label: &str) -> usize {
    width_of(label) + 2
}

/// Hit-tests a point against the cards of a panel.
///
/// `window` is the visible index range and `button` gives, per list index, the width of
/// the toggle button at the right edge of that card's title row.
#[must_use]
pub fn card_hit(
    panel: &Rect,
    window: &Range<usize>,
    button: impl Fn(usize) -> usize,
    row: usize,
    col: usize,
) -> CardHit {
    if !panel.contains(row, col) || row == panel.row {
        return CardHit::Outside;
    }

    let offset = row - card_top(panel, 0);
    let slot = offset / CARD_HEIGHT;
    let index = window.start + slot;

    if slot >= card_capacity(panel) || index >= window.end {
        return CardHit::BelowLast;
    }

    let within = offset % CARD_HEIGHT;
    let right_edge = panel.col + panel.width;
    CardHit::Card {
        index,
        upper: within * 2 < CARD_HEIGHT,
        on_button: within == 1 && col + button(index) >= right_edge,
    }
}
