//! TMDB (The Movie Database) search provider.
//!
//! Implements [`SearchProvider`] by querying the TMDB v3 REST API.
//!
//! The search endpoint only returns ids and titles. Each match is enriched
//! with two further calls, made one after another:
//! - `/movie/{id}` for the IMDB id, overview, and poster.
//! - `/movie/{id}/credits` for the cast (crew entries are skipped).
//!
//! A failure in any of these calls fails the whole provider. Requests are
//! token-bucket rate limited via [`governor`].

use std::num::NonZeroU32;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use reelsearch_common::{ProviderError, ProviderId, SearchQuery, SearchRecord, StreamLinkTemplate};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use super::http;
use crate::config::TmdbConfig;
use crate::metadata::provider::SearchProvider;

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovieSearchResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieSearchResult {
    id: u64,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieDetail {
    imdb_id: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    cast: Vec<TmdbCastEntry>,
}

#[derive(Debug, Deserialize)]
struct TmdbCastEntry {
    /// Only set for acting credits.
    cast_id: Option<u64>,
    name: String,
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// TMDB search provider.
///
/// # Examples
///
/// ```no_run
/// use reelsearch::metadata::providers::TmdbProvider;
/// use reelsearch_common::StreamLinkTemplate;
///
/// let provider = TmdbProvider::new(
///     "your-api-key".into(),
///     "https://api.themoviedb.org/3".into(),
///     10,
///     StreamLinkTemplate::default(),
/// );
/// ```
pub struct TmdbProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    stream: StreamLinkTemplate,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl TmdbProvider {
    /// Create a new TMDB provider.
    ///
    /// `requests_per_second` below 1 is treated as 1.
    pub fn new(
        api_key: String,
        base_url: String,
        requests_per_second: u32,
        stream: StreamLinkTemplate,
    ) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Self {
            client: http::build_client(),
            api_key,
            base_url,
            stream,
            rate_limiter,
        }
    }

    pub fn from_config(config: &TmdbConfig, stream: StreamLinkTemplate) -> Self {
        Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.requests_per_second,
            stream,
        )
    }

    /// Rate-limited GET of `path` with the API key attached.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        self.rate_limiter.until_ready().await;

        let url = http::join_url(&self.base_url, path);
        let mut params: Vec<(&str, &str)> = vec![("api_key", self.api_key.as_str())];
        params.extend_from_slice(extra_params);

        http::get_json(&self.client, self.id(), &url, &params, None).await
    }

    /// Fetch detail and credits for one search hit.
    async fn enrich(&self, movie: TmdbMovieSearchResult) -> Result<SearchRecord, ProviderError> {
        debug!(tmdb_id = movie.id, "TMDB enrich movie");

        let detail: TmdbMovieDetail = self.get(&format!("/movie/{}", movie.id), &[]).await?;
        let credits: TmdbCredits = self
            .get(&format!("/movie/{}/credits", movie.id), &[])
            .await?;

        Ok(SearchRecord::new(movie.id.to_string(), movie.title.unwrap_or_default())
            .with_plot(detail.overview)
            .with_imdb_id(detail.imdb_id.as_deref(), &self.stream)
            .with_actors(cast_names(credits))
            .with_banners(detail.poster_path.into_iter().collect()))
    }
}

fn cast_names(credits: TmdbCredits) -> Vec<String> {
    credits
        .cast
        .into_iter()
        .filter(|c| c.cast_id.is_some())
        .map(|c| c.name)
        .collect()
}

#[async_trait]
impl SearchProvider for TmdbProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Tmdb
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchRecord>, ProviderError> {
        let body: TmdbSearchResponse = self
            .get("/search/movie", &[("query", query.as_str())])
            .await?;

        let mut records = Vec::with_capacity(body.results.len());
        for movie in body.results {
            records.push(self.enrich(movie).await?);
        }
        Ok(records)
    }
}
