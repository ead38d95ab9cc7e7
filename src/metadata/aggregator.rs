//! Search aggregation façade over multiple [`SearchProvider`]s.
//!
//! The [`SearchAggregator`] validates a raw query, dispatches it to every
//! available provider concurrently, and merges the answers into one
//! deduplicated list. Provider failures and timeouts only shrink the result;
//! the call itself fails only on an invalid query.

use std::sync::Arc;
use std::time::Duration;

use reelsearch_common::{
    AggregationError, SearchQuery, SearchRecord, SourceState, SourceSummary,
};
use serde::Serialize;
use tracing::info;

use super::dispatcher::dispatch;
use super::merger::merge;
use super::provider::SearchProvider;
use super::providers::{RottenTomatoesProvider, TmdbProvider, TvdbProvider};
use crate::config::Config;

/// Merged records plus how each provider fared.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedResult {
    pub records: Vec<SearchRecord>,
    pub sources: Vec<SourceSummary>,
}

impl AggregatedResult {
    /// Returns `true` if any provider failed or timed out.
    pub fn is_partial(&self) -> bool {
        self.sources.iter().any(|s| s.state != SourceState::Ok)
    }
}

/// Aggregates search results across registered providers.
///
/// Providers are stored in registration order, which is also the merge
/// order: when two providers return the same IMDB id, the one registered
/// first supplies the record.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use std::time::Duration;
/// use reelsearch::metadata::SearchAggregator;
///
/// let mut aggregator = SearchAggregator::new(Duration::from_secs(20));
/// aggregator.register(Arc::new(my_provider));
///
/// let result = aggregator.aggregate("Interstellar").await?;
/// ```
pub struct SearchAggregator {
    providers: Vec<Arc<dyn SearchProvider>>,
    timeout: Duration,
}

impl SearchAggregator {
    /// Create an empty aggregator with the given batch timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            providers: Vec::new(),
            timeout,
        }
    }

    /// Build the standard Rotten Tomatoes → TMDB → TheTVDB aggregator.
    ///
    /// Disabled providers are skipped. An enabled provider without an API
    /// key, or no enabled provider at all, is a configuration error.
    pub fn from_config(config: &Config) -> Result<Self, AggregationError> {
        let providers = &config.providers;
        let required = [
            ("rotten_tomatoes", providers.rotten_tomatoes.enabled, &providers.rotten_tomatoes.api_key),
            ("tmdb", providers.tmdb.enabled, &providers.tmdb.api_key),
            ("tvdb", providers.tvdb.enabled, &providers.tvdb.api_key),
        ];
        for (name, enabled, key) in required {
            if enabled && key.trim().is_empty() {
                return Err(AggregationError::configuration_missing(format!(
                    "provider '{name}' is enabled but has no api_key"
                )));
            }
        }

        let stream = config.search.stream_template();
        let mut aggregator = Self::new(config.search.timeout());
        if providers.rotten_tomatoes.enabled {
            aggregator.register(Arc::new(RottenTomatoesProvider::from_config(
                &providers.rotten_tomatoes,
                stream.clone(),
            )));
        }
        if providers.tmdb.enabled {
            aggregator.register(Arc::new(TmdbProvider::from_config(
                &providers.tmdb,
                stream.clone(),
            )));
        }
        if providers.tvdb.enabled {
            aggregator.register(Arc::new(TvdbProvider::from_config(&providers.tvdb, stream)));
        }

        if aggregator.providers.is_empty() {
            return Err(AggregationError::configuration_missing(
                "no metadata providers are enabled",
            ));
        }

        Ok(aggregator)
    }

    /// Register a new search provider after those already registered.
    pub fn register(&mut self, provider: Arc<dyn SearchProvider>) {
        self.providers.push(provider);
    }

    /// Providers that are currently available, in registration order.
    pub fn available(&self) -> Vec<Arc<dyn SearchProvider>> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .cloned()
            .collect()
    }

    /// Look up a provider by its id string (e.g. `"tmdb"`).
    pub fn get(&self, name: &str) -> Option<&dyn SearchProvider> {
        self.providers
            .iter()
            .find(|p| p.id().as_str() == name)
            .map(|p| p.as_ref())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Search every available provider and merge the results.
    ///
    /// Returns [`AggregationError::InvalidQuery`] before any request is made
    /// if `raw_query` is empty after sanitization. A batch where every
    /// provider failed is `Ok` with no records.
    pub async fn aggregate(&self, raw_query: &str) -> Result<AggregatedResult, AggregationError> {
        let query = SearchQuery::parse(raw_query)?;
        let providers = self.available();

        let outcome = dispatch(&query, &providers, self.timeout).await;
        let records = merge(&outcome.results);
        let sources: Vec<SourceSummary> =
            outcome.results.iter().map(SourceSummary::from).collect();

        info!(
            query = %query,
            providers = providers.len(),
            timed_out = outcome.timed_out(),
            count = records.len(),
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "Search aggregated"
        );

        Ok(AggregatedResult { records, sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reelsearch_common::{ProviderError, ProviderId, QueryError};

    /// A minimal stub provider used for testing.
    struct StubProvider {
        id: ProviderId,
        available: bool,
        records: Vec<SearchRecord>,
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        fn id(&self) -> ProviderId {
            self.id
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn search(&self, _query: &SearchQuery) -> Result<Vec<SearchRecord>, ProviderError> {
            Ok(self.records.clone())
        }
    }

    fn stub(id: ProviderId, available: bool, ids: &[&str]) -> Arc<dyn SearchProvider> {
        Arc::new(StubProvider {
            id,
            available,
            records: ids.iter().map(|i| SearchRecord::new(*i, "Title")).collect(),
        })
    }

    fn config_with_keys() -> Config {
        let mut config = Config::default();
        config.providers.rotten_tomatoes.api_key = "rt".into();
        config.providers.tmdb.api_key = "tmdb".into();
        config.providers.tvdb.api_key = "tvdb".into();
        config
    }

    #[test]
    fn empty_aggregator() {
        let aggregator = SearchAggregator::new(Duration::from_secs(1));
        assert!(aggregator.available().is_empty());
        assert!(aggregator.get("tmdb").is_none());
    }

    #[test]
    fn register_and_lookup() {
        let mut aggregator = SearchAggregator::new(Duration::from_secs(1));
        aggregator.register(stub(ProviderId::Tmdb, true, &[]));
        aggregator.register(stub(ProviderId::Tvdb, false, &[]));

        assert_eq!(aggregator.available().len(), 1);
        assert!(aggregator.get("tmdb").is_some());
        assert!(aggregator.get("tvdb").is_some()); // registered but not available
        assert!(aggregator.get("nonexistent").is_none());
    }

    #[test]
    fn from_config_registers_in_fixed_order() {
        let aggregator = SearchAggregator::from_config(&config_with_keys()).unwrap();
        let ids: Vec<_> = aggregator.available().iter().map(|p| p.id()).collect();
        assert_eq!(ids, ProviderId::ALL.to_vec());
        assert_eq!(aggregator.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn from_config_skips_disabled_providers() {
        let mut config = config_with_keys();
        config.providers.tvdb.enabled = false;
        config.providers.tvdb.api_key.clear();

        let aggregator = SearchAggregator::from_config(&config).unwrap();
        assert_eq!(aggregator.available().len(), 2);
        assert!(aggregator.get("tvdb").is_none());
    }

    #[test]
    fn from_config_requires_keys() {
        let mut config = config_with_keys();
        config.providers.tmdb.api_key.clear();

        let err = SearchAggregator::from_config(&config).err().unwrap();
        assert!(matches!(err, AggregationError::ConfigurationMissing(ref m) if m.contains("tmdb")));
    }

    #[test]
    fn from_config_requires_one_provider() {
        let mut config = Config::default();
        config.providers.rotten_tomatoes.enabled = false;
        config.providers.tmdb.enabled = false;
        config.providers.tvdb.enabled = false;

        assert!(matches!(
            SearchAggregator::from_config(&config),
            Err(AggregationError::ConfigurationMissing(_))
        ));
    }

    #[tokio::test]
    async fn aggregate_skips_unavailable_providers() {
        let mut aggregator = SearchAggregator::new(Duration::from_secs(5));
        aggregator.register(stub(ProviderId::RottenTomatoes, false, &["ghost"]));
        aggregator.register(stub(ProviderId::Tmdb, true, &["real"]));

        let result = aggregator.aggregate("test").await.unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].external_id, "real");
        assert_eq!(result.sources.len(), 1);
        assert!(!result.is_partial());
    }

    #[tokio::test]
    async fn aggregate_rejects_blank_query() {
        let mut aggregator = SearchAggregator::new(Duration::from_secs(5));
        aggregator.register(stub(ProviderId::Tmdb, true, &["x"]));

        let err = aggregator.aggregate("   ").await.unwrap_err();
        assert_eq!(err, AggregationError::InvalidQuery(QueryError::Empty));
    }

    #[tokio::test]
    async fn aggregate_with_no_providers_is_empty_success() {
        let aggregator = SearchAggregator::new(Duration::from_secs(5));
        let result = aggregator.aggregate("anything").await.unwrap();
        assert!(result.records.is_empty());
    }
}
