//! Composable UI component renderers.
//!
//! Each component draws one region of the pane at coordinates taken from
//! [`Layout`](crate::ui::layout::Layout).
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`search`]: Search input box
//! - [`cards`]: Results and favorites card panels, including the drop placeholder
//! - [`suggestions`]: Typeahead dropdown overlaying the panels
//! - [`footer`]: Keybinding hints for the focused region
//! - [`empty`]: Failure screen and in-panel status messages

mod cards;
mod empty;
mod footer;
mod header;
mod search;
mod suggestions;

pub use empty::render_empty_state;

use crate::ui::helpers::position_cursor;
use crate::ui::layout::Layout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use cards::render_panel;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use suggestions::render_dropdown;

/// Renders a horizontal border line at the specified row and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the main screen.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Results panel | Favorites panel]   ← dropdown overlays here
/// [Border]
/// [Footer]
/// ```
pub fn render_main(vm: &UIViewModel, layout: &Layout, theme: &Theme) {
    let current_row = render_header(layout.header_row, &vm.header, theme, layout.cols);
    render_border(current_row, &theme.colors.border, layout.cols);
    render_search_bar(&layout.search, &vm.search_bar, theme);

    render_panel(&layout.results, &vm.results, theme);
    render_panel(&layout.favorites, &vm.favorites, theme);

    if let Some(dropdown) = &vm.dropdown {
        render_dropdown(&layout.dropdown(dropdown.line_count()), dropdown, theme);
    }

    render_border(layout.border_row, &theme.colors.border, layout.cols);
    render_footer(layout.footer_row, &vm.footer, theme, layout.cols);
}
