//! Persisted favorites list.
//!
//! - [`store`]: The [`FavoritesStore`] owning the ordered list and its persistence

pub mod store;

pub use store::FavoritesStore;
