//! Trait definition for search providers.
//!
//! This module defines the [`SearchProvider`] trait that every metadata
//! backend (Rotten Tomatoes, TMDB, TheTVDB) implements. Each implementation is
//! a normalization adapter: it speaks its provider's wire format and hands
//! back [`SearchRecord`]s, so the dispatcher and merger never need to know
//! which provider they are talking to.

use async_trait::async_trait;
use reelsearch_common::{ProviderError, ProviderId, SearchQuery, SearchRecord};

/// Async trait that all search providers must implement.
///
/// Providers are shared across tasks behind an `Arc` and must not keep state
/// between calls.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Identity of the provider, used to tag its dispatch slot.
    fn id(&self) -> ProviderId;

    /// Returns `true` when the provider has been configured with the
    /// credentials it needs.
    fn is_available(&self) -> bool;

    /// Search for titles matching `query`.
    ///
    /// Results keep the provider's own ordering. Zero matches is `Ok` with an
    /// empty vector; transport, status, and decoding failures are errors.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchRecord>, ProviderError>;
}
