//! TheTVDB metadata provider.
//!
//! Speaks the legacy XML API. `GetSeries.php` lists matching series with
//! their IMDB ids; each series is then completed with `actors.xml` and
//! `banners.xml`, fetched one after the other. Only banners whose
//! `BannerType` matches the configured type (normally `series`) are kept.

use async_trait::async_trait;
use reelsearch_common::{ProviderError, ProviderId, SearchQuery, SearchRecord, StreamLinkTemplate};
use serde::Deserialize;
use tracing::debug;

use super::http;
use crate::config::TvdbConfig;
use crate::metadata::provider::SearchProvider;

// ---------------------------------------------------------------------------
// TheTVDB XML documents (private)
// ---------------------------------------------------------------------------

/// `<Data><Series>...</Series></Data>`
#[derive(Debug, Default, Deserialize)]
struct TvdbSeriesList {
    #[serde(rename = "Series", default)]
    series: Vec<TvdbSeries>,
}

#[derive(Debug, Deserialize)]
struct TvdbSeries {
    /// Numeric, since it becomes a path segment of the follow-up requests.
    #[serde(rename = "seriesid")]
    series_id: u64,
    #[serde(rename = "SeriesName", default)]
    name: String,
    #[serde(rename = "Overview", default)]
    overview: Option<String>,
    #[serde(rename = "IMDB_ID", default)]
    imdb_id: Option<String>,
}

/// `<Actors><Actor>...</Actor></Actors>`
#[derive(Debug, Default, Deserialize)]
struct TvdbActorList {
    #[serde(rename = "Actor", default)]
    actors: Vec<TvdbActor>,
}

#[derive(Debug, Deserialize)]
struct TvdbActor {
    #[serde(rename = "Name", default)]
    name: String,
}

/// `<Banners><Banner>...</Banner></Banners>`
#[derive(Debug, Default, Deserialize)]
struct TvdbBannerList {
    #[serde(rename = "Banner", default)]
    banners: Vec<TvdbBanner>,
}

#[derive(Debug, Deserialize)]
struct TvdbBanner {
    #[serde(rename = "BannerPath", default)]
    path: String,
    #[serde(rename = "BannerType", default)]
    banner_type: String,
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// TheTVDB search provider.
pub struct TvdbProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    banner_type: String,
    stream: StreamLinkTemplate,
}

impl TvdbProvider {
    pub fn new(
        api_key: String,
        base_url: String,
        banner_type: String,
        stream: StreamLinkTemplate,
    ) -> Self {
        Self {
            client: http::build_client(),
            api_key,
            base_url,
            banner_type,
            stream,
        }
    }

    pub fn from_config(config: &TvdbConfig, stream: StreamLinkTemplate) -> Self {
        Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.banner_type.clone(),
            stream,
        )
    }

    /// Fetch actors and banners for one series.
    async fn enrich(&self, series: TvdbSeries) -> Result<SearchRecord, ProviderError> {
        let series_id = series.series_id;
        debug!(tvdb_id = series_id, "TVDB enrich series");

        let actors_url = http::join_url(
            &self.base_url,
            &format!("{}/series/{}/actors.xml", self.api_key, series_id),
        );
        let actors: TvdbActorList = http::get_xml(
            &self.client,
            self.id(),
            &actors_url,
            &[],
            Some(&self.api_key),
        )
        .await?;

        let banners_url = http::join_url(
            &self.base_url,
            &format!("{}/series/{}/banners.xml", self.api_key, series_id),
        );
        let banners: TvdbBannerList = http::get_xml(
            &self.client,
            self.id(),
            &banners_url,
            &[],
            Some(&self.api_key),
        )
        .await?;

        Ok(SearchRecord::new(series_id.to_string(), series.name.trim())
            .with_plot(series.overview.map(|o| o.trim().to_string()))
            .with_imdb_id(series.imdb_id.as_deref(), &self.stream)
            .with_actors(actor_names(actors))
            .with_banners(banner_paths(banners, &self.banner_type)))
    }
}

fn actor_names(list: TvdbActorList) -> Vec<String> {
    list.actors
        .into_iter()
        .map(|a| a.name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn banner_paths(list: TvdbBannerList, banner_type: &str) -> Vec<String> {
    list.banners
        .into_iter()
        .filter(|b| b.banner_type.trim() == banner_type)
        .map(|b| b.path.trim().to_string())
        .filter(|path| !path.is_empty())
        .collect()
}

#[async_trait]
impl SearchProvider for TvdbProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Tvdb
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchRecord>, ProviderError> {
        let url = http::join_url(&self.base_url, "/GetSeries.php");
        let list: TvdbSeriesList = http::get_xml(
            &self.client,
            self.id(),
            &url,
            &[("seriesname", query.as_str())],
            None,
        )
        .await?;

        let mut records = Vec::with_capacity(list.series.len());
        for series in list.series {
            records.push(self.enrich(series).await?);
        }
        Ok(records)
    }
}
