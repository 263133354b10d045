//! Storage layer for persistent plugin data.
//!
//! A small key-value abstraction modeled on browser local storage. Values are JSON
//! documents; the favorites list and the typeahead selection marker each get a key.
//!
//! # Modules
//!
//! - `backend`: Storage trait and JSON helpers
//! - `file`: One-file-per-key storage with atomic writes
//! - `memory`: Shared in-memory map
//! - `models`: Storage keys and the selection marker record

pub mod backend;
pub mod file;
pub mod memory;
pub mod models;

pub use backend::{load_json, save_json, Storage};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use models::{SelectionMarker, FAVORITES_KEY, SELECTION_KEY};
