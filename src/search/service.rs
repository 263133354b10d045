//! Remote search service.
//!
//! Builds lookup requests and turns raw responses into normalized records. The HTTP call
//! itself is made by the host (`web_request`); the response comes back later as an event,
//! so this module is split into a pure request builder and a pure response parser.
//!
//! # Response format
//!
//! ```json
//! { "ok": true, "description": [ { "#IMDB_ID": "tt0133093", "#TITLE": "The Matrix" } ] }
//! ```
//!
//! The OMDb-style `Search` collection is accepted when `description` is absent.

use crate::domain::error::{MovieDeckError, Result};
use crate::domain::MovieRecord;
use crate::search::normalize::normalize_entry;
use serde_json::Value;
use std::collections::BTreeMap;

/// Default lookup endpoint.
pub const DEFAULT_API_URL: &str = "https://imdb.iamidiotareyoutoo.com/search";

/// Request builder bound to a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchService {
    base_url: String,
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl SearchService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Lookup URL for `query`, with the query percent-encoded.
    ///
    /// ```
    /// use moviedeck::search::SearchService;
    ///
    /// let service = SearchService::new("https://api.test/search");
    /// assert_eq!(service.request_url("the matrix"), "https://api.test/search?q=the%20matrix");
    /// ```
    #[must_use]
    pub fn request_url(&self, query: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}q={}",
            self.base_url,
            urlencoding::encode(query.trim())
        )
    }
}

/// Parses a lookup response into records.
///
/// Entries that fail normalization are skipped with a warning; the rest of the batch is
/// returned.
///
/// # Errors
///
/// Returns [`MovieDeckError::Service`] if the status is not 2xx, the body is not a JSON
/// object, the `ok` flag is absent or false, or the result collection is missing or not an
/// array. A missing collection is never reported as an empty success.
pub fn parse_response(status: u16, body: &[u8]) -> Result<Vec<MovieRecord>> {
    let _span = tracing::debug_span!("parse_response", status, bytes = body.len()).entered();

    if !(200..300).contains(&status) {
        return Err(MovieDeckError::Service(format!("HTTP error! status: {status}")));
    }

    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| MovieDeckError::Service(format!("Invalid API response: {e}")))?;

    let Some(fields) = payload.as_object() else {
        return Err(MovieDeckError::Service(
            "Invalid API response: expected an object".to_string(),
        ));
    };

    if fields.get("ok").and_then(Value::as_bool) != Some(true) {
        return Err(MovieDeckError::Service(
            "Invalid API response: request not ok".to_string(),
        ));
    }

    let entries = fields
        .get("description")
        .or_else(|| fields.get("Search"))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            MovieDeckError::Service("Invalid API response: missing result list".to_string())
        })?;

    let movies: Vec<MovieRecord> = entries
        .iter()
        .filter_map(|entry| match normalize_entry(entry) {
            Ok(movie) => Some(movie),
            Err(e) => {
                tracing::warn!(error = %e, "skipping result entry");
                None
            }
        })
        .collect();

    tracing::debug!(
        received = entries.len(),
        kept = movies.len(),
        "search response parsed"
    );

    Ok(movies)
}

/// Moves the record with `id` to the front, keeping the others in order.
///
/// Returns whether a record was moved.
pub fn prioritize(movies: &mut [MovieRecord], id: &str) -> bool {
    match movies.iter().position(|m| m.id == id) {
        Some(idx) => {
            movies[..=idx].rotate_right(1);
            true
        }
        None => false,
    }
}

/// What a request is for. Each kind keeps its own last-request-wins sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Search,
    Suggest,
}

impl RequestKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Suggest => "suggest",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "search" => Some(Self::Search),
            "suggest" => Some(Self::Suggest),
            _ => None,
        }
    }
}

/// Identity of one in-flight request, round-tripped through the host request context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: RequestKind,
    pub id: u64,
    pub query: String,
}

const CONTEXT_KIND: &str = "moviedeck_kind";
const CONTEXT_ID: &str = "moviedeck_request";
const CONTEXT_QUERY: &str = "moviedeck_query";

impl RequestTicket {
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CONTEXT_KIND.to_string(), self.kind.as_str().to_string()),
            (CONTEXT_ID.to_string(), self.id.to_string()),
            (CONTEXT_QUERY.to_string(), self.query.clone()),
        ])
    }

    /// Recovers a ticket from a response context. `None` if the response is not ours.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            kind: RequestKind::parse(context.get(CONTEXT_KIND)?)?,
            id: context.get(CONTEXT_ID)?.parse().ok()?,
            query: context.get(CONTEXT_QUERY).cloned().unwrap_or_default(),
        })
    }
}

/// Issues request ids and decides which responses are still current.
///
/// Only the most recently issued request of each kind is accepted; anything older is
/// stale and dropped.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    next_id: u64,
    latest_search: Option<u64>,
    latest_suggest: Option<u64>,
}

impl RequestTracker {
    pub fn issue(&mut self, kind: RequestKind, query: &str) -> RequestTicket {
        self.next_id += 1;
        *self.slot(kind) = Some(self.next_id);
        RequestTicket {
            kind,
            id: self.next_id,
            query: query.to_string(),
        }
    }

    /// Whether `ticket` is the latest request of its kind. Accepting a ticket retires it.
    pub fn accept(&mut self, ticket: &RequestTicket) -> bool {
        let slot = self.slot(ticket.kind);
        if *slot == Some(ticket.id) {
            *slot = None;
            true
        } else {
            false
        }
    }

    /// Invalidates the in-flight request of `kind`, if any.
    pub fn cancel(&mut self, kind: RequestKind) {
        *self.slot(kind) = None;
    }

    #[must_use]
    pub const fn is_pending(&self, kind: RequestKind) -> bool {
        match kind {
            RequestKind::Search => self.latest_search.is_some(),
            RequestKind::Suggest => self.latest_suggest.is_some(),
        }
    }

    fn slot(&mut self, kind: RequestKind) -> &mut Option<u64> {
        match kind {
            RequestKind::Search => &mut self.latest_search,
            RequestKind::Suggest => &mut self.latest_suggest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_status_is_service_error() {
        let err = parse_response(503, b"{}").unwrap_err();
        assert_eq!(err.to_string(), "Search service error: HTTP error! status: 503");
    }

    #[test]
    fn missing_collection_is_not_empty_success() {
        assert!(matches!(
            parse_response(200, br#"{"ok":true}"#),
            Err(MovieDeckError::Service(_))
        ));
        assert!(matches!(
            parse_response(200, br#"{"ok":true,"description":"nope"}"#),
            Err(MovieDeckError::Service(_))
        ));
    }

    #[test]
    fn not_ok_is_service_error() {
        assert!(parse_response(200, br#"{"ok":false,"description":[]}"#).is_err());
        assert!(parse_response(200, br#"{"description":[]}"#).is_err());
        assert!(parse_response(200, b"<html>").is_err());
        assert!(parse_response(200, b"[]").is_err());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let body = br##"{"ok":true,"description":[
            {"#IMDB_ID":"tt0133093","#TITLE":"The Matrix"},
            {"#TITLE":"No id"},
            42
        ]}"##;

        let movies = parse_response(200, body).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "The Matrix");
    }

    #[test]
    fn search_collection_fallback() {
        let body = br#"{"ok":true,"Search":[{"imdbID":"tt1","Title":"Heat"}]}"#;
        assert_eq!(parse_response(200, body).unwrap()[0].id, "tt1");
    }

    #[test]
    fn empty_collection_is_success() {
        assert!(parse_response(200, br#"{"ok":true,"description":[]}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn prioritize_keeps_relative_order() {
        let mut movies: Vec<MovieRecord> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| MovieRecord::new(*id, id.to_uppercase()))
            .collect();

        assert!(prioritize(&mut movies, "c"));
        let ids: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b", "d"]);

        assert!(!prioritize(&mut movies, "zzz"));
    }

    #[test]
    fn request_url_encodes_and_appends() {
        let service = SearchService::new("https://api.test/search?lang=en");
        assert_eq!(
            service.request_url(" Amélie & co "),
            "https://api.test/search?lang=en&q=Am%C3%A9lie%20%26%20co"
        );
    }

    #[test]
    fn only_latest_request_is_accepted() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue(RequestKind::Search, "mat");
        let second = tracker.issue(RequestKind::Search, "matrix");
        let suggest = tracker.issue(RequestKind::Suggest, "mat");

        assert!(!tracker.accept(&first));
        assert!(tracker.accept(&suggest));
        assert!(tracker.accept(&second));
        assert!(!tracker.accept(&second));
    }

    #[test]
    fn ticket_survives_context_round_trip() {
        let ticket = RequestTicket {
            kind: RequestKind::Suggest,
            id: 7,
            query: "alien".to_string(),
        };
        assert_eq!(RequestTicket::from_context(&ticket.to_context()), Some(ticket));
        assert_eq!(RequestTicket::from_context(&BTreeMap::new()), None);
    }
}
