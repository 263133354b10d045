//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the view model from `AppState`, then hand it to the
//! components along with the layout for the current viewport.
//!
//! # Example
//!
//! ```rust
//! use moviedeck::app::AppState;
//! use moviedeck::favorites::FavoritesStore;
//! use moviedeck::search::SearchService;
//! use moviedeck::storage::MemoryStorage;
//! use moviedeck::ui::render;
//! use moviedeck::Theme;
//!
//! let store = FavoritesStore::open(Box::new(MemoryStorage::new()));
//! let mut state = AppState::new(store, SearchService::default(), Theme::default());
//! state.set_viewport(24, 80);
//! render(&state); // Renders to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the plugin UI to stdout for the state's current viewport.
///
/// Does not clear the screen; every region pads its rows to full width.
pub fn render(state: &AppState) {
    let viewmodel = state.compute_viewmodel();
    components::render_main(&viewmodel, &state.layout(), &state.theme);
}

/// Renders the generic failure screen shown when the plugin could not start.
pub fn render_failure(theme: &Theme, cols: usize) {
    let empty = EmptyState {
        message: "MovieDeck could not start.".to_string(),
        subtitle: "Check the plugin configuration and the log for details.".to_string(),
    };
    components::render_empty_state(&empty, theme, cols);
}
