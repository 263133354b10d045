//! Reordering favorites with the mouse.

use moviedeck::favorites::FavoritesStore;
use moviedeck::search::SearchService;
use moviedeck::storage::{load_json, MemoryStorage, FAVORITES_KEY};
use moviedeck::ui::layout::card_top;
use moviedeck::{handle_event, AppState, Event, Focus, MovieRecord, Theme};

fn state_with(storage: &MemoryStorage, ids: &[&str]) -> AppState {
    let mut store = FavoritesStore::open(Box::new(storage.clone()));
    for id in ids {
        store.add(MovieRecord::new(*id, format!("Movie {id}"))).unwrap();
    }
    let mut state = AppState::new(store, SearchService::default(), Theme::default());
    state.set_viewport(40, 120);
    state
}

fn order(state: &AppState) -> Vec<&str> {
    state.favorites.list().iter().map(|m| m.id.as_str()).collect()
}

/// Row and column on the title row of favorites card `slot`, away from its button.
fn on_card(state: &AppState, slot: usize) -> (usize, usize) {
    let panel = state.layout().favorites;
    (card_top(&panel, slot) + 1, panel.col + 2)
}

/// A point in the lower half of favorites card `slot`.
fn lower_half(state: &AppState, slot: usize) -> (usize, usize) {
    let panel = state.layout().favorites;
    (card_top(&panel, slot) + 2, panel.col + 2)
}

fn press(state: &mut AppState, (row, col): (usize, usize)) {
    handle_event(state, &Event::MousePress { row, col }).unwrap();
}

fn hold(state: &mut AppState, (row, col): (usize, usize)) -> bool {
    handle_event(state, &Event::MouseHold { row, col }).unwrap().0
}

fn release(state: &mut AppState, (row, col): (usize, usize)) -> bool {
    handle_event(state, &Event::MouseRelease { row, col }).unwrap().0
}

#[test]
fn drop_below_a_card_moves_and_persists() {
    let storage = MemoryStorage::new();
    let mut state = state_with(&storage, &["a", "b", "c", "d"]);

    let start = on_card(&state, 0);
    press(&mut state, start);
    assert_eq!(state.focus, Focus::Favorites);

    let target = lower_half(&state, 2);
    assert!(hold(&mut state, target));
    let panel = state.compute_viewmodel().favorites;
    assert_eq!(panel.placeholder, Some(3));
    assert!(panel.cards[0].is_dragged);

    assert!(release(&mut state, target));
    assert_eq!(order(&state), vec!["b", "c", "a", "d"]);
    assert_eq!(state.favorites_selected, 2);
    assert!(!state.drag.is_dragging());

    let stored: Vec<MovieRecord> = load_json(&storage, FAVORITES_KEY).unwrap().unwrap();
    let stored: Vec<&str> = stored.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(stored, vec!["b", "c", "a", "d"]);
}

#[test]
fn drop_in_empty_area_moves_to_end() {
    let mut state = state_with(&MemoryStorage::new(), &["a", "b", "c"]);

    let start = on_card(&state, 1);
    press(&mut state, start);
    let below = on_card(&state, 5);
    hold(&mut state, below);
    assert_eq!(state.drag.placeholder(), Some(3));

    release(&mut state, below);
    assert_eq!(order(&state), vec!["a", "c", "b"]);
}

#[test]
fn escape_cancels_without_reordering() {
    let mut state = state_with(&MemoryStorage::new(), &["a", "b", "c"]);

    let start = on_card(&state, 0);
    press(&mut state, start);
    let target = lower_half(&state, 2);
    hold(&mut state, target);
    assert!(state.drag.is_dragging());

    assert!(handle_event(&mut state, &Event::Escape).unwrap().0);
    assert!(!state.drag.is_dragging());
    assert!(state.compute_viewmodel().favorites.placeholder.is_none());

    assert!(!release(&mut state, target));
    assert_eq!(order(&state), vec!["a", "b", "c"]);
}

#[test]
fn release_outside_the_panel_cancels() {
    let mut state = state_with(&MemoryStorage::new(), &["a", "b", "c"]);

    let start = on_card(&state, 2);
    press(&mut state, start);
    let target = on_card(&state, 0);
    hold(&mut state, target);

    let results = state.layout().results;
    assert!(release(&mut state, (card_top(&results, 0) + 1, results.col + 1)));
    assert_eq!(order(&state), vec!["a", "b", "c"]);
}

#[test]
fn drop_next_to_itself_keeps_order() {
    let mut state = state_with(&MemoryStorage::new(), &["a", "b", "c"]);

    let start = on_card(&state, 1);
    press(&mut state, start);
    let own_lower = lower_half(&state, 1);
    hold(&mut state, own_lower);
    assert_eq!(state.drag.placeholder(), None);

    assert!(release(&mut state, own_lower));
    assert_eq!(order(&state), vec!["a", "b", "c"]);
    assert_eq!(state.favorites_selected, 1);
}

#[test]
fn hovering_outside_keeps_the_last_placeholder() {
    let mut state = state_with(&MemoryStorage::new(), &["a", "b", "c"]);

    let start = on_card(&state, 2);
    press(&mut state, start);
    let target = on_card(&state, 0);
    hold(&mut state, target);
    assert_eq!(state.drag.placeholder(), Some(0));

    let results = state.layout().results;
    assert!(!hold(&mut state, (card_top(&results, 0), results.col + 1)));
    assert_eq!(state.drag.placeholder(), Some(0));

    release(&mut state, target);
    assert_eq!(order(&state), vec!["c", "a", "b"]);
}

#[test]
fn pressing_the_button_removes_instead_of_dragging() {
    let mut state = state_with(&MemoryStorage::new(), &["a", "b"]);
    let panel = state.layout().favorites;
    let row = card_top(&panel, 1) + 1;
    let col = panel.col + panel.width - 2;

    press(&mut state, (row, col));
    assert_eq!(order(&state), vec!["a"]);

    assert!(!hold(&mut state, (row, col)));
    assert!(!release(&mut state, (row, col)));
    assert_eq!(order(&state), vec!["a"]);
}
