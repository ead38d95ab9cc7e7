//! Validated user search queries.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::QueryError;

/// A sanitized, non-empty search string.
///
/// Construction strips markup tags and control characters and trims
/// surrounding whitespace. URL encoding is left to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Sanitize `raw` and reject it if nothing remains.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let cleaned = sanitize(raw);
        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Complete `<...>` tags. A `<` with no closing `>` is kept as text.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<>]*>").unwrap());

static CONTROL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Cc}").unwrap());

/// Drop markup tags and turn control characters into spaces.
fn sanitize(raw: &str) -> String {
    let without_tags = TAG_PATTERN.replace_all(raw, "");
    CONTROL_PATTERN.replace_all(&without_tags, " ").into_owned()
}
