//! Rotten Tomatoes metadata provider.
//!
//! One call per search: `movies.json` already embeds the cast, posters, and
//! IMDB cross-reference, so no per-title enrichment is needed. The IMDB id is
//! reported without its `tt` prefix and is normalized on the way in.

use async_trait::async_trait;
use reelsearch_common::{ProviderError, ProviderId, SearchQuery, SearchRecord, StreamLinkTemplate};
use serde::Deserialize;

use super::http::{self, RawId};
use crate::config::RottenTomatoesConfig;
use crate::metadata::provider::SearchProvider;

// ---------------------------------------------------------------------------
// Rotten Tomatoes API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RtSearchResponse {
    #[serde(default)]
    movies: Vec<RtMovie>,
    /// Present instead of `movies` when the API rejects the request.
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RtMovie {
    id: RawId,
    #[serde(default)]
    title: String,
    synopsis: Option<String>,
    alternate_ids: Option<RtAlternateIds>,
    #[serde(default)]
    abridged_cast: Vec<RtCastMember>,
    posters: Option<RtPosters>,
}

#[derive(Debug, Deserialize)]
struct RtAlternateIds {
    imdb: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RtCastMember {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RtPosters {
    thumbnail: Option<String>,
    profile: Option<String>,
    detailed: Option<String>,
    original: Option<String>,
}

impl RtPosters {
    fn into_urls(self) -> Vec<String> {
        [self.thumbnail, self.profile, self.detailed, self.original]
            .into_iter()
            .flatten()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// Rotten Tomatoes search provider.
pub struct RottenTomatoesProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    stream: StreamLinkTemplate,
}

impl RottenTomatoesProvider {
    pub fn new(api_key: String, base_url: String, stream: StreamLinkTemplate) -> Self {
        Self {
            client: http::build_client(),
            api_key,
            base_url,
            stream,
        }
    }

    pub fn from_config(config: &RottenTomatoesConfig, stream: StreamLinkTemplate) -> Self {
        Self::new(config.api_key.clone(), config.base_url.clone(), stream)
    }

    fn to_record(&self, movie: RtMovie) -> SearchRecord {
        let imdb = movie.alternate_ids.and_then(|ids| ids.imdb);
        SearchRecord::new(movie.id.to_string(), movie.title)
            .with_plot(movie.synopsis)
            .with_imdb_id(imdb.as_deref(), &self.stream)
            .with_actors(movie.abridged_cast.into_iter().map(|c| c.name).collect())
            .with_banners(movie.posters.map(RtPosters::into_urls).unwrap_or_default())
    }
}

#[async_trait]
impl SearchProvider for RottenTomatoesProvider {
    fn id(&self) -> ProviderId {
        ProviderId::RottenTomatoes
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchRecord>, ProviderError> {
        let url = http::join_url(&self.base_url, "/movies.json");
        let body: RtSearchResponse = http::get_json(
            &self.client,
            self.id(),
            &url,
            &[("apikey", self.api_key.as_str()), ("q", query.as_str())],
            None,
        )
        .await?;

        if let Some(error) = body.error {
            return Err(ProviderError::decode(
                self.id(),
                format!("API reported an error: {error}"),
            ));
        }

        Ok(body.movies.into_iter().map(|m| self.to_record(m)).collect())
    }
}
