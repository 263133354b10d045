//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (main.rs) and the favorites, search, and storage layers.
//!
//! ```text
//! Host Event → Event → handle_event → State Mutations → Actions → Host API
//!                          ↑                                  ↓
//!                          └──────── Web Responses / Timers ──┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Keyboard focus regions
//! - [`startup`]: Plugin startup phases
//! - [`state`]: Central state container and view model computation
//! - [`typeahead`]: Debounced suggestion lookups and highlighting
//! - [`drag`]: Drag-to-reorder state machine for the favorites panel

pub mod actions;
pub mod drag;
pub mod handler;
pub mod modes;
pub mod startup;
pub mod state;
pub mod typeahead;

pub use actions::Action;
pub use drag::{DragOutcome, DragState};
pub use handler::{handle_event, Event};
pub use modes::Focus;
pub use startup::Phase;
pub use state::{AppState, ResultsState, ADD_LABEL, REMOVE_LABEL};
pub use typeahead::{SuggestionState, Typeahead};
