//! Provider entry normalization.
//!
//! The lookup service has shipped several field spellings over time (`#TITLE` from the
//! IMDb scraper, `Title`/`imdbID` from the OMDb shape, plain lower-case names from others).
//! [`normalize_entry`] maps any of them onto a [`MovieRecord`]. For each field the first
//! present, non-empty value in the precedence list wins. Strings and numbers are accepted.

use crate::domain::error::{MovieDeckError, Result};
use crate::domain::movie::{default_imdb_url, LOCAL_PLACEHOLDER_IMAGE};
use crate::domain::MovieRecord;
use serde_json::{Map, Value};

const ID_KEYS: &[&str] = &["#IMDB_ID", "imdbID", "id"];
const TITLE_KEYS: &[&str] = &["#TITLE", "Title", "title", "name"];
const YEAR_KEYS: &[&str] = &["#YEAR", "Year", "year", "release_date"];
const RANK_KEYS: &[&str] = &["#RANK", "Rank", "rank"];
const ACTORS_KEYS: &[&str] = &["#ACTORS", "Actors", "actors"];
const URL_KEYS: &[&str] = &["#IMDB_URL", "imdb_url", "imdbUrl"];
const POSTER_KEYS: &[&str] = &["#IMG_POSTER", "Poster", "image", "posterImage"];

/// Converts one raw provider entry into a [`MovieRecord`].
///
/// # Errors
///
/// Returns [`MovieDeckError::MalformedRecord`] if the entry is not an object or has no
/// usable id or title.
///
/// # Examples
///
/// ```
/// use moviedeck::search::normalize_entry;
/// use serde_json::json;
///
/// let movie = normalize_entry(&json!({
///     "#IMDB_ID": "tt0133093",
///     "#TITLE": "The Matrix",
///     "#YEAR": 1999,
/// }))?;
/// assert_eq!(movie.year, "1999");
/// assert_eq!(movie.imdb_url, "https://www.imdb.com/title/tt0133093");
/// # Ok::<(), moviedeck::MovieDeckError>(())
/// ```
pub fn normalize_entry(entry: &Value) -> Result<MovieRecord> {
    let Some(fields) = entry.as_object() else {
        return Err(MovieDeckError::MalformedRecord(format!(
            "expected an object, got {}",
            kind_of(entry)
        )));
    };

    let id = first_text(fields, ID_KEYS)
        .ok_or_else(|| MovieDeckError::MalformedRecord("entry has no identifier".to_string()))?;
    let title = first_text(fields, TITLE_KEYS)
        .ok_or_else(|| MovieDeckError::MalformedRecord(format!("entry '{id}' has no title")))?;

    Ok(MovieRecord {
        imdb_url: first_text(fields, URL_KEYS).unwrap_or_else(|| default_imdb_url(&id)),
        poster_image: first_text(fields, POSTER_KEYS)
            .unwrap_or_else(|| LOCAL_PLACEHOLDER_IMAGE.to_string()),
        year: first_text(fields, YEAR_KEYS).unwrap_or_default(),
        rank: first_text(fields, RANK_KEYS),
        actors: first_text(fields, ACTORS_KEYS),
        id,
        title,
    })
}

fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match fields.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scraper_fields_take_precedence() {
        let movie = normalize_entry(&json!({
            "#IMDB_ID": "tt0133093",
            "imdbID": "tt9999999",
            "#TITLE": "The Matrix",
            "Title": "Wrong",
            "#RANK": 1234,
            "#ACTORS": "Keanu Reeves, Laurence Fishburne",
            "#IMDB_URL": "https://www.imdb.com/title/tt0133093/",
            "#IMG_POSTER": "https://m.media-amazon.com/images/M/matrix.jpg",
        }))
        .unwrap();

        assert_eq!(movie.id, "tt0133093");
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.rank.as_deref(), Some("1234"));
        assert_eq!(movie.actors.as_deref(), Some("Keanu Reeves, Laurence Fishburne"));
        assert_eq!(movie.imdb_url, "https://www.imdb.com/title/tt0133093/");
        assert_eq!(movie.poster_image, "https://m.media-amazon.com/images/M/matrix.jpg");
    }

    #[test]
    fn omdb_shape_is_accepted() {
        let movie = normalize_entry(&json!({
            "imdbID": "tt0078748",
            "Title": "Alien",
            "Year": "1979",
            "Poster": "https://example.test/alien.jpg",
        }))
        .unwrap();

        assert_eq!(movie.id, "tt0078748");
        assert_eq!(movie.year, "1979");
        assert_eq!(movie.rank, None);
        assert_eq!(movie.imdb_url, "https://www.imdb.com/title/tt0078748");
    }

    #[test]
    fn empty_values_fall_through() {
        let movie = normalize_entry(&json!({
            "#IMDB_ID": "",
            "id": "tt1",
            "#TITLE": "   ",
            "name": "Fallback",
            "release_date": "2001-05-01",
        }))
        .unwrap();

        assert_eq!(movie.id, "tt1");
        assert_eq!(movie.title, "Fallback");
        assert_eq!(movie.year, "2001-05-01");
        assert_eq!(movie.poster_image, LOCAL_PLACEHOLDER_IMAGE);
    }

    #[test]
    fn missing_required_fields_are_malformed() {
        assert!(matches!(
            normalize_entry(&json!({ "#TITLE": "No id" })),
            Err(MovieDeckError::MalformedRecord(_))
        ));
        assert!(matches!(
            normalize_entry(&json!({ "#IMDB_ID": "tt1" })),
            Err(MovieDeckError::MalformedRecord(_))
        ));
        assert!(matches!(
            normalize_entry(&json!("tt1")),
            Err(MovieDeckError::MalformedRecord(_))
        ));
    }
}
