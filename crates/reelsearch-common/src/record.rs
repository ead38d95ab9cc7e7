//! The normalized search record and IMDB identifier helpers.
//!
//! Every provider maps its own response schema into [`SearchRecord`]. The
//! serialized field names (`id`, `name`, `plot`, `imdbId`, `actors`,
//! `banners`, `stream`) form the JSON array shape handed to callers.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the normalized IMDB id in stream links.
pub const IMDB_ID_PLACEHOLDER: &str = "{imdb_id}";

/// Default streaming-availability link template.
pub const DEFAULT_STREAM_URL_TEMPLATE: &str =
    "http://www.canistream.it/external/imdb/{imdb_id}?l=default";

/// A provider-agnostic representation of one matched title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Provider-local identifier; not unique across providers.
    #[serde(rename = "id")]
    pub external_id: String,
    #[serde(rename = "name")]
    pub title: String,
    #[serde(default)]
    pub plot: String,
    /// Cross-provider identity key, always in `tt`-prefixed form.
    #[serde(rename = "imdbId")]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub banners: Vec<String>,
    #[serde(rename = "stream")]
    pub stream_url: Option<String>,
}

impl SearchRecord {
    /// Create a record with only an id and a title.
    pub fn new(external_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            title: title.into(),
            plot: String::new(),
            imdb_id: None,
            actors: Vec::new(),
            banners: Vec::new(),
            stream_url: None,
        }
    }

    /// Set the plot; `None` leaves it empty.
    pub fn with_plot(mut self, plot: Option<String>) -> Self {
        self.plot = plot.unwrap_or_default();
        self
    }

    /// Set the IMDB id (normalized) and derive the stream link from it.
    ///
    /// An empty or missing id clears both fields.
    pub fn with_imdb_id(mut self, imdb_id: Option<&str>, template: &StreamLinkTemplate) -> Self {
        self.imdb_id = imdb_id.and_then(normalize_imdb_id);
        self.stream_url = self.imdb_id.as_deref().map(|id| template.render(id));
        self
    }

    pub fn with_actors(mut self, actors: Vec<String>) -> Self {
        self.actors = actors;
        self
    }

    pub fn with_banners(mut self, banners: Vec<String>) -> Self {
        self.banners = banners;
        self
    }

    /// The dedup key, if this record has one.
    pub fn dedup_key(&self) -> Option<&str> {
        self.imdb_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Normalize an IMDB identifier to its `tt`-prefixed form.
///
/// Some providers report only the numeric part (`"0372588"`). Whitespace is
/// trimmed, an all-digit id gains the `tt` prefix, and an empty id is `None`.
pub fn normalize_imdb_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Some(format!("tt{trimmed}"));
    }
    Some(trimmed.to_string())
}

/// Template for the external streaming-availability link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamLinkTemplate(String);

impl StreamLinkTemplate {
    /// Wrap a template string containing [`IMDB_ID_PLACEHOLDER`].
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Returns `true` if the template references the IMDB id.
    pub fn is_valid(&self) -> bool {
        self.0.contains(IMDB_ID_PLACEHOLDER)
    }

    /// Substitute `imdb_id` into the template.
    pub fn render(&self, imdb_id: &str) -> String {
        self.0.replace(IMDB_ID_PLACEHOLDER, imdb_id)
    }
}

impl Default for StreamLinkTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_STREAM_URL_TEMPLATE)
    }
}
