//! Zellij plugin wrapper and entry point.
//!
//! The thin layer between the MovieDeck library and the Zellij plugin API: it maps host
//! events to library [`Event`]s, runs the resulting [`Action`]s against the host, and
//! delegates rendering. Everything here only builds for `wasm32`; natively the library
//! and its tests build on their own.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse and validate config, initialize tracing, request permissions,
//!    subscribe to events
//! 2. **Permissions**: Build the application state once access is settled, so the data
//!    directory under `/host` is reachable
//! 3. **Update**: Map host events, run `handle_event`, execute actions
//! 4. **Render**: Draw the UI, or the failure screen if startup failed
//!
//! # Keybindings
//!
//! Everywhere:
//! - `Tab` / `Shift+Tab`: Cycle focus (search, results, favorites)
//! - `Ctrl+n` / `Ctrl+p`, `Down` / `Up`: Navigate
//! - `Esc`: Cancel drag, close suggestions, or return to the search input
//!
//! In the search input:
//! - Characters and `Backspace`: Edit the query
//! - `Enter`: Select the active suggestion, or search
//!
//! In the results and favorites lists:
//! - `j` / `k`: Move selection
//! - `Enter` / `f` / `Space`: Toggle favorite
//! - `J` / `K`: Move the selected favorite down / up
//! - `/`: Focus the search input
//! - `q`: Close plugin

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_arch = "wasm32")]
use moviedeck::app::Phase;
#[cfg(target_arch = "wasm32")]
use moviedeck::{handle_event, Action, Config, Event, Focus};
#[cfg(target_arch = "wasm32")]
use std::collections::BTreeMap;
#[cfg(target_arch = "wasm32")]
use zellij_tile::prelude::*;

#[cfg(target_arch = "wasm32")]
register_plugin!(State);

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("moviedeck is a Zellij plugin; build it for wasm32-wasip1 and load it in Zellij");
}

#[cfg(target_arch = "wasm32")]
struct State {
    phase: Phase,
}

#[cfg(target_arch = "wasm32")]
impl Default for State {
    fn default() -> Self {
        Self {
            phase: Phase::Pending(Config::default()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl ZellijPlugin for State {
    /// Parses configuration, starts tracing, requests permissions, and subscribes.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Search requests
    /// - `FullHdAccess`: The favorites store under the data directory
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        moviedeck::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(api_url = %config.api_url, data_dir = ?config.data_dir, "parsed configuration");

        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        self.phase = Phase::new(config);
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!("plugin_update", event_type = %event_name).entered();

        let mut started = false;
        if let zellij_tile::prelude::Event::PermissionRequestResult(status) = &event {
            tracing::debug!(
                granted = matches!(status, PermissionStatus::Granted),
                "permissions settled"
            );
            started = self.phase.settle();
        }

        let failed = self.phase.is_failed();
        let Some(app) = self.phase.app_mut() else {
            return started || failed;
        };

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match map_key_event(app.focus, key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::Timer,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Event::WebResponse {
                    status,
                    body,
                    context,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                }
            }
            _ => return false,
        };

        match handle_event(app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                for action in &actions {
                    execute_action(action);
                }
                should_render || started
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                started
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        match &mut self.phase {
            Phase::Ready(app) => {
                app.set_viewport(rows, cols);
                moviedeck::ui::render(app);
            }
            Phase::Failed(theme) => moviedeck::ui::render_failure(theme, cols),
            Phase::Pending(_) => {}
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }
}

/// Maps a key press to an application event, according to focus.
#[cfg(target_arch = "wasm32")]
fn map_key_event(focus: Focus, key: &KeyWithModifier) -> Option<Event> {
    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match key.bare_key {
            BareKey::Char('n') => Some(Event::Down),
            BareKey::Char('p') => Some(Event::Up),
            _ => None,
        };
    }

    match key.bare_key {
        BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => return Some(Event::FocusPrev),
        BareKey::Tab => return Some(Event::FocusNext),
        BareKey::Esc => return Some(Event::Escape),
        BareKey::Down => return Some(Event::Down),
        BareKey::Up => return Some(Event::Up),
        _ => {}
    }

    if focus == Focus::SearchInput {
        return match key.bare_key {
            BareKey::Enter => Some(Event::Submit),
            BareKey::Backspace => Some(Event::Backspace),
            BareKey::Char(c) => Some(Event::Char(c)),
            _ => None,
        };
    }

    Some(match key.bare_key {
        BareKey::Char('j') => Event::Down,
        BareKey::Char('k') => Event::Up,
        BareKey::Enter | BareKey::Char('f' | ' ') => Event::ToggleFavorite,
        BareKey::Char('J') => Event::MoveFavoriteDown,
        BareKey::Char('K') => Event::MoveFavoriteUp,
        BareKey::Char('/') => Event::FocusSearch,
        BareKey::Char('q') => Event::CloseFocus,
        _ => return None,
    })
}

/// Maps host mouse events (0-based line and column) to 1-based pane coordinates.
#[cfg(target_arch = "wasm32")]
fn map_mouse_event(mouse: Mouse) -> Option<Event> {
    let point = |line: isize, col: usize| usize::try_from(line).ok().map(|l| (l + 1, col + 1));

    match mouse {
        Mouse::LeftClick(line, col) => {
            point(line, col).map(|(row, col)| Event::MousePress { row, col })
        }
        Mouse::Hold(line, col) => point(line, col).map(|(row, col)| Event::MouseHold { row, col }),
        Mouse::Release(line, col) => {
            point(line, col).map(|(row, col)| Event::MouseRelease { row, col })
        }
        _ => None,
    }
}

/// Runs an action against the Zellij host API.
#[cfg(target_arch = "wasm32")]
fn execute_action(action: &Action) {
    match action {
        Action::CloseFocus => {
            tracing::debug!("closing plugin focus");
            hide_self();
        }
        Action::WebRequest { url, context } => {
            tracing::debug!(url = %url, "issuing web request");
            web_request(
                url,
                HttpVerb::Get,
                BTreeMap::new(),
                Vec::new(),
                context.clone(),
            );
        }
        Action::SetTimeout { seconds } => set_timeout(*seconds),
    }
}
