//! Infrastructure layer for the Zellij plugin sandbox.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
