//! Movie record domain model.
//!
//! [`MovieRecord`] is the normalized representation of one title returned by the search
//! provider and the unit stored in the favorites list. Identity is the provider's catalog
//! identifier; two records with the same `id` are the same movie for favorites purposes,
//! whatever their other fields say.

use crate::domain::error::{MovieDeckError, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Embedded poster placeholder used when the provider has no poster.
pub const LOCAL_PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdCb3g9IjAgMCAxMDAgMTUwIiBmaWxsPSIjODg4ODg4Ij48cmVjdCB3aWR0aD0iMTAwIiBoZWlnaHQ9IjE1MCIgZmlsbD0iI2VlZWVlZSIvPjx0ZXh0IHg9IjUwIiB5PSI0NSIgZm9udC1mYW1pbHk9IkFyaWFsIiBmb250LXNpemU9IjEwIiB0ZXh0LWFuY2hvcj0ibWlkZGxlIj5Nb3ZpZTwvdGV4dD48L3N2Zz4=";

/// Remote placeholder used once the embedded placeholder has failed too.
pub const REMOTE_PLACEHOLDER_URL: &str = "https://via.placeholder.com/100x150?text=Movie";

/// A normalized movie.
///
/// Serialized with the field names of the persisted favorites format
/// (`imdb_url`, `image`); the camel-case spellings are accepted when loading, and `year`
/// and `rank` may be stored as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Remote catalog identifier (e.g. `tt0133093`).
    pub id: String,

    pub title: String,

    /// Release year, display only. Empty when the provider has none.
    #[serde(default, deserialize_with = "text_or_number")]
    pub year: String,

    #[serde(
        default,
        deserialize_with = "optional_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rank: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,

    #[serde(default, alias = "imdbUrl")]
    pub imdb_url: String,

    /// Poster URL or embedded placeholder.
    #[serde(default, rename = "image", alias = "posterImage")]
    pub poster_image: String,
}

impl MovieRecord {
    /// Creates a record with the given identity and defaults for everything else.
    ///
    /// The detail URL points at the IMDb title page and the poster at the embedded
    /// placeholder.
    ///
    /// ```
    /// use moviedeck::MovieRecord;
    ///
    /// let movie = MovieRecord::new("tt0133093", "The Matrix");
    /// assert_eq!(movie.imdb_url, "https://www.imdb.com/title/tt0133093");
    /// ```
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            imdb_url: default_imdb_url(&id),
            id,
            title: title.into(),
            year: String::new(),
            rank: None,
            actors: None,
            poster_image: LOCAL_PLACEHOLDER_IMAGE.to_string(),
        }
    }

    /// Sets the display year.
    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// Checks the fields required for a record to be stored or displayed.
    ///
    /// # Errors
    ///
    /// Returns [`MovieDeckError::MalformedRecord`] if the identifier or title is blank.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(MovieDeckError::MalformedRecord(format!(
                "record '{}' has no identifier",
                self.title
            )));
        }
        if self.title.trim().is_empty() {
            return Err(MovieDeckError::MalformedRecord(format!(
                "record '{}' has no title",
                self.id
            )));
        }
        Ok(())
    }

    /// Year for display, with the fallback text used on cards.
    #[must_use]
    pub fn display_year(&self) -> &str {
        if self.year.is_empty() {
            "Year not available"
        } else {
            &self.year
        }
    }

    /// Rank for display, with the fallback text used on cards.
    #[must_use]
    pub fn display_rank(&self) -> &str {
        self.rank.as_deref().filter(|r| !r.is_empty()).unwrap_or("Not ranked")
    }
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_text_or_number(deserializer)?.unwrap_or_default())
}

fn optional_text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a string or a number, got {other}"
        ))),
    }
}

/// IMDb title page for an identifier.
#[must_use]
pub fn default_imdb_url(id: &str) -> String {
    format!("https://www.imdb.com/title/{id}")
}

/// Position of a card's poster in the image fallback chain.
///
/// The chain is provider poster, then the embedded placeholder, then the remote
/// placeholder, then nothing. Once [`PosterSource::Unavailable`] is reached no further
/// attempt is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterSource {
    Provider(String),
    LocalPlaceholder,
    RemotePlaceholder,
    Unavailable,
}

impl PosterSource {
    /// Resolves the first usable source for a poster value, walking the chain past
    /// values that cannot be displayed.
    ///
    /// ```
    /// use moviedeck::PosterSource;
    ///
    /// assert_eq!(PosterSource::resolve(""), PosterSource::LocalPlaceholder);
    /// assert_eq!(
    ///     PosterSource::resolve("https://m.media-amazon.com/images/M/x.jpg"),
    ///     PosterSource::Provider("https://m.media-amazon.com/images/M/x.jpg".to_string()),
    /// );
    /// ```
    #[must_use]
    pub fn resolve(poster: &str) -> Self {
        let mut source = if poster == LOCAL_PLACEHOLDER_IMAGE {
            Self::LocalPlaceholder
        } else {
            Self::Provider(poster.to_string())
        };
        while !source.is_usable() {
            source = source.fallback();
        }
        source
    }

    /// The next source to try after this one failed.
    #[must_use]
    pub fn fallback(&self) -> Self {
        match self {
            Self::Provider(_) => Self::LocalPlaceholder,
            Self::LocalPlaceholder => Self::RemotePlaceholder,
            Self::RemotePlaceholder | Self::Unavailable => Self::Unavailable,
        }
    }

    /// URL to load for this source, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Provider(url) => Some(url),
            Self::LocalPlaceholder => Some(LOCAL_PLACEHOLDER_IMAGE),
            Self::RemotePlaceholder => Some(REMOTE_PLACEHOLDER_URL),
            Self::Unavailable => None,
        }
    }

    /// Short label shown on a card in place of the image.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Provider(url) => format!("poster: {}", url_host(url).unwrap_or("embedded")),
            Self::LocalPlaceholder => "poster: placeholder".to_string(),
            Self::RemotePlaceholder => format!(
                "poster: {}",
                url_host(REMOTE_PLACEHOLDER_URL).unwrap_or("placeholder")
            ),
            Self::Unavailable => "no poster".to_string(),
        }
    }

    fn is_usable(&self) -> bool {
        self.url().map_or(true, is_displayable_url)
    }
}

fn is_displayable_url(url: &str) -> bool {
    url.starts_with("data:image/")
        || ((url.starts_with("https://") || url.starts_with("http://"))
            && url_host(url).is_some_and(|host| !host.is_empty()))
}

fn url_host(url: &str) -> Option<&str> {
    let rest = url.split_once("://")?.1;
    rest.split(['/', '?', '#']).next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_blank_identity() {
        assert!(MovieRecord::new("", "Heat").validate().is_err());
        assert!(MovieRecord::new("tt0113277", "  ").validate().is_err());
        assert!(MovieRecord::new("tt0113277", "Heat").validate().is_ok());
    }

    #[test]
    fn persisted_shape_uses_storage_field_names() {
        let movie = MovieRecord::new("tt0133093", "The Matrix").with_year("1999");
        let json = serde_json::to_value(&movie).unwrap();

        assert_eq!(json["image"], LOCAL_PLACEHOLDER_IMAGE);
        assert_eq!(json["imdb_url"], "https://www.imdb.com/title/tt0133093");
        assert!(json.get("rank").is_none());
    }

    #[test]
    fn camel_case_fields_are_accepted_on_load() {
        let movie: MovieRecord = serde_json::from_str(
            r#"{"id":"tt1","title":"Alien","imdbUrl":"https://x.test/tt1","posterImage":"https://x.test/p.jpg"}"#,
        )
        .unwrap();

        assert_eq!(movie.imdb_url, "https://x.test/tt1");
        assert_eq!(movie.poster_image, "https://x.test/p.jpg");
        assert_eq!(movie.display_year(), "Year not available");
        assert_eq!(movie.display_rank(), "Not ranked");
    }

    #[test]
    fn numeric_year_and_rank_load_as_text() {
        let movie: MovieRecord = serde_json::from_str(
            r#"{"id":"tt0133093","title":"The Matrix","year":1999,"rank":120}"#,
        )
        .unwrap();
        assert_eq!(movie.year, "1999");
        assert_eq!(movie.display_rank(), "120");

        let movie: MovieRecord =
            serde_json::from_str(r#"{"id":"tt1","title":"Heat","year":null,"rank":null}"#).unwrap();
        assert_eq!(movie.display_year(), "Year not available");
        assert!(movie.rank.is_none());

        assert!(serde_json::from_str::<MovieRecord>(r#"{"id":"a","title":"A","year":[1]}"#).is_err());
    }

    #[test]
    fn poster_chain_degrades_then_stops() {
        let broken = PosterSource::resolve("not a url");
        assert_eq!(broken, PosterSource::LocalPlaceholder);

        let remote = broken.fallback();
        assert_eq!(remote.url(), Some(REMOTE_PLACEHOLDER_URL));

        let exhausted = remote.fallback();
        assert_eq!(exhausted, PosterSource::Unavailable);
        assert_eq!(exhausted.fallback(), PosterSource::Unavailable);
        assert_eq!(exhausted.label(), "no poster");
    }

    #[test]
    fn poster_label_shows_host() {
        let source = PosterSource::resolve("https://m.media-amazon.com/images/M/abc.jpg");
        assert_eq!(source.label(), "poster: m.media-amazon.com");
    }
}
