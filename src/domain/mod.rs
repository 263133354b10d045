//! Domain layer for the MovieDeck plugin.
//!
//! Core types independent of Zellij APIs or storage details.
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`movie`]: The normalized [`MovieRecord`] and its poster fallback chain

pub mod error;
pub mod movie;

pub use error::{MovieDeckError, Result};
pub use movie::{MovieRecord, PosterSource, LOCAL_PLACEHOLDER_IMAGE, REMOTE_PLACEHOLDER_URL};
