//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for everything the host delivers: keys
//! (already mapped by focus in the plugin shim), mouse gestures, timer ticks, and web
//! responses. Each call mutates [`AppState`] and returns whether to re-render plus the
//! side effects to run, in order.
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `Submit`, `Escape`
//! - **Navigation**: `Up`, `Down`, `FocusNext`, `FocusPrev`, `FocusSearch`
//! - **Favorites**: `ToggleFavorite`, `MoveFavoriteUp`, `MoveFavoriteDown`
//! - **Mouse**: `MousePress`, `MouseHold`, `MouseRelease`
//! - **Host**: `Timer`, `WebResponse`, `PermissionsResult`
//!
//! # Example
//!
//! ```rust
//! use moviedeck::app::{handle_event, Action, AppState, Event};
//! use moviedeck::favorites::FavoritesStore;
//! use moviedeck::search::SearchService;
//! use moviedeck::storage::MemoryStorage;
//! use moviedeck::Theme;
//!
//! let store = FavoritesStore::open(Box::new(MemoryStorage::new()));
//! let mut state = AppState::new(store, SearchService::default(), Theme::default());
//!
//! for c in "matrix".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::WebRequest { .. }]));
//! # Ok::<(), moviedeck::MovieDeckError>(())
//! ```

use super::drag::{DragOutcome, DragState};
use super::modes::Focus;
use super::state::ResultsState;
use super::typeahead::{is_suggestible, DEBOUNCE_SECS};
use crate::app::{Action, AppState};
use crate::domain::error::{MovieDeckError, Result};
use crate::domain::MovieRecord;
use crate::search::{parse_response, prioritize, RequestKind, RequestTicket};
use crate::storage::SelectionMarker;
use crate::ui::layout::{button_width, card_hit, CardHit};
use std::collections::BTreeMap;

/// Events the application reacts to.
///
/// Mouse coordinates are 1-indexed pane rows and columns, matching the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// `Enter` in the search input: select the active suggestion or run a full search.
    Submit,
    /// Cancels a drag, closes the dropdown, or leaves a list, whichever applies first.
    Escape,
    Up,
    Down,
    FocusNext,
    FocusPrev,
    /// Jumps to the search input.
    FocusSearch,
    /// Adds or removes the selected card's movie.
    ToggleFavorite,
    /// Moves the selected favorite one slot up.
    MoveFavoriteUp,
    /// Moves the selected favorite one slot down.
    MoveFavoriteDown,
    /// Hides the plugin pane.
    CloseFocus,

    MousePress {
        row: usize,
        col: usize,
    },
    /// Pointer moved with the button down.
    MouseHold {
        row: usize,
        col: usize,
    },
    MouseRelease {
        row: usize,
        col: usize,
    },

    /// A host timer elapsed.
    Timer,

    /// A web request completed. `context` is the context the request was sent with.
    WebResponse {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },

    PermissionsResult {
        granted: bool,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the visible state changed and the pane should re-render.
///
/// # Errors
///
/// Currently every failure is absorbed here: service errors become inline messages,
/// persistence faults are logged. The `Result` leaves room for fatal conditions.
///
/// # Tracing
///
/// Each call runs inside a debug-level `handle_event` span.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Char(c) => {
            if state.focus != Focus::SearchInput {
                return Ok((false, vec![]));
            }
            state.query.push(*c);
            tracing::trace!(query = %state.query, "query edited");
            Ok((true, edit_query(state)))
        }
        Event::Backspace => {
            if state.focus != Focus::SearchInput || state.query.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, edit_query(state)))
        }
        Event::Submit => match state.focus {
            Focus::SearchInput => {
                if let Some(movie) = state.typeahead.active_suggestion().cloned() {
                    Ok((true, select_suggestion(state, &movie)))
                } else {
                    Ok((true, run_search(state)))
                }
            }
            Focus::Results | Focus::Favorites => Ok((toggle_selected(state), vec![])),
        },
        Event::Escape => {
            if state.drag.cancel() {
                return Ok((true, vec![]));
            }
            if state.typeahead.is_visible() {
                dismiss_suggestions(state);
                return Ok((true, vec![]));
            }
            if state.focus.is_list() {
                state.focus = Focus::SearchInput;
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::Up | Event::Down => {
            let down = *event == Event::Down;
            if state.focus == Focus::SearchInput {
                return Ok((navigate_suggestions(state, down), vec![]));
            }
            if down {
                state.move_selection_down();
            } else {
                state.move_selection_up();
            }
            Ok((true, vec![]))
        }
        Event::FocusNext => {
            let next = state.focus.next();
            set_focus(state, next);
            Ok((true, vec![]))
        }
        Event::FocusPrev => {
            let prev = state.focus.prev();
            set_focus(state, prev);
            Ok((true, vec![]))
        }
        Event::FocusSearch => {
            set_focus(state, Focus::SearchInput);
            Ok((true, vec![]))
        }
        Event::ToggleFavorite => Ok((toggle_selected(state), vec![])),
        Event::MoveFavoriteUp => Ok((move_selected_favorite(state, -1), vec![])),
        Event::MoveFavoriteDown => Ok((move_selected_favorite(state, 1), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::MousePress { row, col } => Ok(mouse_press(state, *row, *col)),
        Event::MouseHold { row, col } => Ok((mouse_hold(state, *row, *col), vec![])),
        Event::MouseRelease { row, col } => Ok((mouse_release(state, *row, *col), vec![])),
        Event::Timer => {
            let Some(query) = state.typeahead.debouncer.on_timer() else {
                return Ok((false, vec![]));
            };
            if !is_suggestible(&query) {
                return Ok((false, vec![]));
            }

            let ticket = state.requests.issue(RequestKind::Suggest, &query);
            tracing::debug!(query = %query, request = ticket.id, "issuing suggestion lookup");
            state.typeahead.show_loading(&query);
            Ok((true, vec![web_request(state, &ticket)]))
        }
        Event::WebResponse {
            status,
            body,
            context,
        } => Ok((handle_response(state, *status, body, context), vec![])),
        Event::PermissionsResult { granted } => {
            if !granted {
                tracing::warn!("web access denied; searches will fail");
            }
            Ok((false, vec![]))
        }
    }
}

/// Re-evaluates typeahead after the query changed.
fn edit_query(state: &mut AppState) -> Vec<Action> {
    if !is_suggestible(&state.query) {
        dismiss_suggestions(state);
        return vec![];
    }

    state.typeahead.debouncer.arm(state.query.clone());
    vec![Action::SetTimeout {
        seconds: DEBOUNCE_SECS,
    }]
}

/// Closes the dropdown and invalidates any lookup still in flight.
fn dismiss_suggestions(state: &mut AppState) {
    state.typeahead.dismiss();
    if state.requests.is_pending(RequestKind::Suggest) {
        tracing::debug!("suggestion lookup abandoned");
        state.requests.cancel(RequestKind::Suggest);
    }
}

fn set_focus(state: &mut AppState, focus: Focus) {
    dismiss_suggestions(state);
    state.drag.cancel();
    state.focus = focus;
}

fn navigate_suggestions(state: &mut AppState, down: bool) -> bool {
    let Some(title) = state.typeahead.navigate(down).map(|m| m.title.clone()) else {
        return false;
    };
    state.typeahead.debouncer.cancel();
    state.query = title;
    true
}

fn web_request(state: &AppState, ticket: &RequestTicket) -> Action {
    Action::WebRequest {
        url: state.service.request_url(&ticket.query),
        context: ticket.to_context(),
    }
}

/// Starts a full search for the current query.
fn run_search(state: &mut AppState) -> Vec<Action> {
    dismiss_suggestions(state);

    let query = state.query.trim().to_string();
    if query.is_empty() {
        state.requests.cancel(RequestKind::Search);
        state.results = ResultsState::NeedsQuery;
        return vec![];
    }

    let ticket = state.requests.issue(RequestKind::Search, &query);
    tracing::debug!(query = %query, request = ticket.id, "issuing search");
    state.results = ResultsState::Searching;
    vec![web_request(state, &ticket)]
}

/// Remembers the picked suggestion and searches for its title.
fn select_suggestion(state: &mut AppState, movie: &MovieRecord) -> Vec<Action> {
    tracing::debug!(id = %movie.id, title = %movie.title, "suggestion selected");

    if let Some(storage) = state.favorites.storage_mut() {
        if let Err(e) = SelectionMarker::new(&movie.id, &movie.title).save(storage) {
            tracing::warn!(error = %e, "failed to store selection marker");
        }
    }

    state.query.clone_from(&movie.title);
    run_search(state)
}

fn handle_response(
    state: &mut AppState,
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> bool {
    let Some(ticket) = RequestTicket::from_context(context) else {
        tracing::debug!("ignoring web response without a request ticket");
        return false;
    };
    if !state.requests.accept(&ticket) {
        tracing::debug!(request = ticket.id, kind = ?ticket.kind, "dropping stale response");
        return false;
    }

    match ticket.kind {
        RequestKind::Search => {
            state.results = match parse_response(status, body) {
                Ok(mut movies) => {
                    apply_selection_marker(state, &mut movies);
                    ResultsState::Loaded(movies)
                }
                Err(e) => {
                    tracing::warn!(error = %e, query = %ticket.query, "search failed");
                    ResultsState::Failed(failure_reason(e))
                }
            };
            state.results_selected = 0;
            true
        }
        RequestKind::Suggest => {
            if !is_suggestible(&state.query) {
                return false;
            }
            match parse_response(status, body) {
                Ok(movies) => state.typeahead.show_results(movies),
                Err(e) => {
                    tracing::warn!(error = %e, query = %ticket.query, "suggestion lookup failed");
                    state.typeahead.show_error();
                }
            }
            true
        }
    }
}

/// Consumes the selection marker, moving the picked movie to the front.
fn apply_selection_marker(state: &mut AppState, movies: &mut [MovieRecord]) {
    let Some(storage) = state.favorites.storage_mut() else {
        return;
    };
    match SelectionMarker::take(storage) {
        Ok(Some(marker)) => {
            if prioritize(movies, &marker.id) {
                tracing::debug!(id = %marker.id, "selected suggestion moved to front");
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "failed to clear selection marker"),
    }
}

fn failure_reason(error: MovieDeckError) -> String {
    match error {
        MovieDeckError::Service(reason) => reason,
        other => other.to_string(),
    }
}

/// Adds the movie to favorites, or removes it if already there.
fn toggle_favorite(state: &mut AppState, movie: MovieRecord) -> bool {
    let changed = if state.favorites.contains(&movie.id) {
        state.favorites.remove(&movie.id)
    } else {
        match state.favorites.add(movie) {
            Ok(added) => added,
            Err(e) => {
                tracing::warn!(error = %e, "cannot add movie to favorites");
                false
            }
        }
    };
    state.clamp_selection();
    changed
}

fn toggle_selected(state: &mut AppState) -> bool {
    match state.selected_movie().cloned() {
        Some(movie) => toggle_favorite(state, movie),
        None => false,
    }
}

fn move_selected_favorite(state: &mut AppState, offset: isize) -> bool {
    if state.focus != Focus::Favorites {
        return false;
    }
    let Some(id) = state.selected_movie().map(|m| m.id.clone()) else {
        return false;
    };
    if !state.favorites.move_by(&id, offset) {
        return false;
    }
    if let Some(position) = state.favorites.position(&id) {
        state.favorites_selected = position;
    }
    true
}

fn mouse_press(state: &mut AppState, row: usize, col: usize) -> (bool, Vec<Action>) {
    let layout = state.layout();

    if let Some(area) = state.dropdown_area() {
        if area.contains(row, col) {
            let picked = state.typeahead.suggestions().get(row - area.row).cloned();
            return match picked {
                Some(movie) => {
                    state.focus = Focus::SearchInput;
                    (true, select_suggestion(state, &movie))
                }
                None => (false, vec![]),
            };
        }
        if !layout.search.contains(row, col) {
            dismiss_suggestions(state);
        }
    }

    if layout.search.contains(row, col) {
        state.focus = Focus::SearchInput;
        return (true, vec![]);
    }

    let results_hit = card_hit(
        &layout.results,
        &state.results_window(),
        |idx| results_button(state, idx),
        row,
        col,
    );
    if let CardHit::Card {
        index, on_button, ..
    } = results_hit
    {
        state.focus = Focus::Results;
        state.results_selected = index;
        if on_button {
            if let Some(movie) = state.results.movies().get(index).cloned() {
                toggle_favorite(state, movie);
            }
        }
        return (true, vec![]);
    }

    let favorites_hit = card_hit(
        &layout.favorites,
        &state.favorites_window(),
        |idx| favorites_button(state, idx),
        row,
        col,
    );
    if let CardHit::Card {
        index, on_button, ..
    } = favorites_hit
    {
        state.focus = Focus::Favorites;
        state.favorites_selected = index;
        let Some(movie) = state.favorites.list().get(index).cloned() else {
            return (true, vec![]);
        };
        if on_button {
            toggle_favorite(state, movie);
        } else {
            state.drag.press(index, movie.id);
        }
        return (true, vec![]);
    }

    (true, vec![])
}

fn mouse_hold(state: &mut AppState, row: usize, col: usize) -> bool {
    if state.drag == DragState::Idle {
        return false;
    }
    let layout = state.layout();
    let hit = card_hit(
        &layout.favorites,
        &state.favorites_window(),
        |idx| favorites_button(state, idx),
        row,
        col,
    );
    let len = state.favorites.len();
    state.drag.hover(hit, len)
}

fn mouse_release(state: &mut AppState, row: usize, col: usize) -> bool {
    let inside = state.layout().favorites.contains(row, col);
    let order: Vec<String> = state.favorites.list().iter().map(|m| m.id.clone()).collect();

    match state.drag.release(inside, &order) {
        DragOutcome::Click => false,
        DragOutcome::Cancelled => true,
        DragOutcome::Dropped { id, order } => {
            state.favorites.reorder(order.as_slice());
            if let Some(position) = state.favorites.position(&id) {
                state.favorites_selected = position;
            }
            true
        }
    }
}

fn results_button(state: &AppState, index: usize) -> usize {
    state
        .results
        .movies()
        .get(index)
        .map_or(0, |m| button_width(state.toggle_label(&m.id)))
}

fn favorites_button(state: &AppState, index: usize) -> usize {
    state
        .favorites
        .list()
        .get(index)
        .map_or(0, |m| button_width(state.toggle_label(&m.id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoritesStore;
    use crate::search::SearchService;
    use crate::storage::{MemoryStorage, Storage, SELECTION_KEY};
    use crate::ui::layout::card_top;
    use crate::ui::theme::Theme;

    fn state_with(storage: &MemoryStorage) -> AppState {
        let store = FavoritesStore::open(Box::new(storage.clone()));
        AppState::new(store, SearchService::new("https://api.test/search"), Theme::default())
    }

    fn state() -> AppState {
        state_with(&MemoryStorage::new())
    }

    fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
        let mut actions = vec![];
        for c in text.chars() {
            actions.extend(handle_event(state, &Event::Char(c)).unwrap().1);
        }
        actions
    }

    fn context_of(action: &Action) -> BTreeMap<String, String> {
        match action {
            Action::WebRequest { context, .. } => context.clone(),
            other => panic!("expected web request, got {other:?}"),
        }
    }

    fn respond(state: &mut AppState, context: BTreeMap<String, String>, body: &str) -> bool {
        let event = Event::WebResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
            context,
        };
        handle_event(state, &event).unwrap().0
    }

    fn movies_body(ids: &[&str]) -> String {
        let entries: Vec<String> = ids
            .iter()
            .map(|id| format!(r##"{{"#IMDB_ID":"{id}","#TITLE":"Title {id}"}}"##))
            .collect();
        format!(r#"{{"ok":true,"description":[{}]}}"#, entries.join(","))
    }

    #[test]
    fn blank_submit_asks_for_a_term() {
        let mut state = state();
        type_text(&mut state, "   ");
        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.results, ResultsState::NeedsQuery);
    }

    #[test]
    fn stale_search_response_is_dropped() {
        let mut state = state();
        type_text(&mut state, "heat");
        let first = context_of(&handle_event(&mut state, &Event::Submit).unwrap().1[0]);
        let second = context_of(&handle_event(&mut state, &Event::Submit).unwrap().1[0]);

        assert!(!respond(&mut state, first, &movies_body(&["tt1"])));
        assert_eq!(state.results, ResultsState::Searching);

        assert!(respond(&mut state, second, &movies_body(&["tt2"])));
        assert_eq!(state.results.movies()[0].id, "tt2");
    }

    #[test]
    fn search_failure_shows_reason() {
        let mut state = state();
        type_text(&mut state, "heat");
        let context = context_of(&handle_event(&mut state, &Event::Submit).unwrap().1[0]);
        let event = Event::WebResponse {
            status: 503,
            body: vec![],
            context,
        };
        handle_event(&mut state, &event).unwrap();
        assert_eq!(
            state.results,
            ResultsState::Failed("HTTP error! status: 503".to_string())
        );
    }

    #[test]
    fn selected_suggestion_is_prioritized_once() {
        let storage = MemoryStorage::new();
        let mut state = state_with(&storage);

        type_text(&mut state, "mat");
        let (_, actions) = handle_event(&mut state, &Event::Timer).unwrap();
        respond(&mut state, context_of(&actions[0]), &movies_body(&["tt1", "tt2", "tt3"]));

        handle_event(&mut state, &Event::Down).unwrap();
        handle_event(&mut state, &Event::Up).unwrap();
        assert_eq!(state.query, "Title tt3");

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(!state.typeahead.is_visible());
        assert!(storage.get_item(SELECTION_KEY).unwrap().is_some());

        respond(&mut state, context_of(&actions[0]), &movies_body(&["tt1", "tt2", "tt3"]));
        let ids: Vec<&str> = state.results.movies().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["tt3", "tt1", "tt2"]);
        assert!(storage.get_item(SELECTION_KEY).unwrap().is_none());
    }

    #[test]
    fn escape_unwinds_in_order() {
        let mut state = state();
        type_text(&mut state, "mat");
        handle_event(&mut state, &Event::Timer).unwrap();
        assert!(state.typeahead.is_visible());

        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(!state.typeahead.is_visible());

        state.focus = Focus::Results;
        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.focus, Focus::SearchInput);
        assert!(!handle_event(&mut state, &Event::Escape).unwrap().0);
    }

    #[test]
    fn dismissed_lookup_response_is_ignored() {
        let mut state = state();
        type_text(&mut state, "mat");
        let (_, actions) = handle_event(&mut state, &Event::Timer).unwrap();
        handle_event(&mut state, &Event::Escape).unwrap();

        assert!(!respond(&mut state, context_of(&actions[0]), &movies_body(&["tt1"])));
        assert!(!state.typeahead.is_visible());
    }

    #[test]
    fn clicking_a_result_closes_suggestions() {
        let mut state = state();
        state.set_viewport(40, 100);
        state.results = ResultsState::Loaded(vec![MovieRecord::new("tt1", "Heat")]);

        type_text(&mut state, "mat");
        let (_, actions) = handle_event(&mut state, &Event::Timer).unwrap();
        assert!(state.typeahead.is_visible());
        assert!(state.requests.is_pending(RequestKind::Suggest));

        let layout = state.layout();
        let row = card_top(&layout.results, 0) + 1;
        assert!(!state.dropdown_area().unwrap().contains(row, layout.results.col + 1));

        let (render, actions_after) = handle_event(
            &mut state,
            &Event::MousePress {
                row,
                col: layout.results.col + 1,
            },
        )
        .unwrap();
        assert!(render);
        assert!(actions_after.is_empty());
        assert!(!state.typeahead.is_visible());
        assert!(!state.requests.is_pending(RequestKind::Suggest));
        assert_eq!(state.focus, Focus::Results);

        assert!(!respond(&mut state, context_of(&actions[0]), &movies_body(&["tt2"])));
        assert!(!state.typeahead.is_visible());
    }

    #[test]
    fn clicking_the_search_bar_keeps_suggestions() {
        let mut state = state();
        state.set_viewport(40, 100);
        type_text(&mut state, "mat");
        handle_event(&mut state, &Event::Timer).unwrap();

        let search = state.layout().search;
        handle_event(
            &mut state,
            &Event::MousePress {
                row: search.row + 1,
                col: search.col + 2,
            },
        )
        .unwrap();
        assert!(state.typeahead.is_visible());
        assert!(state.requests.is_pending(RequestKind::Suggest));
    }

    #[test]
    fn keyboard_move_keeps_selection_on_moved_favorite() {
        let mut state = state();
        for id in ["a", "b", "c"] {
            state.favorites.add(MovieRecord::new(id, id)).unwrap();
        }
        state.focus = Focus::Favorites;

        handle_event(&mut state, &Event::MoveFavoriteDown).unwrap();
        assert_eq!(state.favorites_selected, 1);
        assert_eq!(state.favorites.list()[1].id, "a");

        handle_event(&mut state, &Event::MoveFavoriteUp).unwrap();
        assert_eq!(state.favorites_selected, 0);
        assert!(!handle_event(&mut state, &Event::MoveFavoriteUp).unwrap().0);
    }

    #[test]
    fn clicking_result_button_toggles_favorite() {
        let mut state = state();
        state.set_viewport(40, 100);
        state.results = ResultsState::Loaded(vec![MovieRecord::new("tt1", "Heat")]);

        let layout = state.layout();
        let row = card_top(&layout.results, 0) + 1;
        let col = layout.results.col + layout.results.width - 2;

        handle_event(&mut state, &Event::MousePress { row, col }).unwrap();
        assert!(state.favorites.contains("tt1"));
        assert_eq!(state.focus, Focus::Results);

        handle_event(&mut state, &Event::MouseRelease { row, col }).unwrap();
        handle_event(&mut state, &Event::MousePress { row, col }).unwrap();
        assert!(!state.favorites.contains("tt1"));
    }
}
