//! Movie lookup against the remote search endpoint.
//!
//! - [`normalize`]: Provider entry to [`MovieRecord`](crate::MovieRecord) mapping
//! - [`service`]: Request URLs, response parsing, and last-request-wins sequencing

pub mod normalize;
pub mod service;

pub use normalize::normalize_entry;
pub use service::{
    parse_response, prioritize, RequestKind, RequestTicket, RequestTracker, SearchService,
    DEFAULT_API_URL,
};
