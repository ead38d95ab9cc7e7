//! Error types shared across the search pipeline.
//!
//! Provider errors stay local to one provider slot. Aggregation errors are
//! the only ones a caller of the search façade ever sees.

use crate::types::ProviderId;

/// A single provider's search failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The request could not be sent or the connection failed.
    #[error("{provider}: request failed: {message}")]
    Request {
        provider: ProviderId,
        message: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("{provider}: HTTP {status}")]
    Status { provider: ProviderId, status: u16 },

    /// The response body could not be decoded.
    #[error("{provider}: undecodable response: {message}")]
    Decode {
        provider: ProviderId,
        message: String,
    },
}

impl ProviderError {
    /// Create a new Request error.
    pub fn request<S: Into<String>>(provider: ProviderId, msg: S) -> Self {
        Self::Request {
            provider,
            message: msg.into(),
        }
    }

    /// Create a new Decode error.
    pub fn decode<S: Into<String>>(provider: ProviderId, msg: S) -> Self {
        Self::Decode {
            provider,
            message: msg.into(),
        }
    }

    /// The provider that failed.
    pub fn provider(&self) -> ProviderId {
        match self {
            Self::Request { provider, .. }
            | Self::Status { provider, .. }
            | Self::Decode { provider, .. } => *provider,
        }
    }
}

/// A raw query was rejected before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("search query is empty")]
    Empty,
}

/// The aggregation call itself failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    /// The query was empty after sanitization.
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    /// Required provider credentials are not configured.
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),
}

impl AggregationError {
    /// Create a new ConfigurationMissing error.
    pub fn configuration_missing<S: Into<String>>(msg: S) -> Self {
        Self::ConfigurationMissing(msg.into())
    }
}

/// Queue storage failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The IMDB id to enqueue was empty.
    #[error("Invalid IMDB id: {0:?}")]
    InvalidImdbId(String),

    /// The storage backend failed.
    #[error("Queue storage error: {0}")]
    Storage(String),
}
