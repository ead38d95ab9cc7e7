//! Provider identity and per-provider outcome types.
//!
//! Enums here are serialized in snake_case so they read naturally in JSON
//! summaries and log output.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProviderError;
use crate::record::SearchRecord;

/// Identity of an external metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Rotten Tomatoes movie search API.
    RottenTomatoes,
    /// TheMovieDB v3 API.
    Tmdb,
    /// TheTVDB XML API.
    Tvdb,
}

impl ProviderId {
    /// All providers, in the fixed merge order.
    pub const ALL: [ProviderId; 3] = [Self::RottenTomatoes, Self::Tmdb, Self::Tvdb];

    /// Short, lowercase identifier used in logs and config keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RottenTomatoes => "rotten_tomatoes",
            Self::Tmdb => "tmdb",
            Self::Tvdb => "tvdb",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final state of one provider's slot after a dispatch.
#[derive(Debug, Clone)]
pub enum ProviderStatus {
    /// The provider answered; records are in provider order.
    Ok(Vec<SearchRecord>),
    /// The provider answered with an error.
    Failed(ProviderError),
    /// The provider did not answer before the batch timeout.
    TimedOut,
}

impl ProviderStatus {
    /// Records contributed by this slot; empty unless the provider succeeded.
    pub fn records(&self) -> &[SearchRecord] {
        match self {
            Self::Ok(records) => records,
            Self::Failed(_) | Self::TimedOut => &[],
        }
    }

    /// Returns `true` if the provider answered successfully.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

/// One provider's tagged contribution to a dispatch.
#[derive(Debug, Clone)]
pub struct ProviderResult {
    /// Which provider filled this slot.
    pub provider: ProviderId,
    /// What the provider reported.
    pub status: ProviderStatus,
}

impl ProviderResult {
    /// Create a successful result.
    pub fn ok(provider: ProviderId, records: Vec<SearchRecord>) -> Self {
        Self {
            provider,
            status: ProviderStatus::Ok(records),
        }
    }

    /// Create a failed result.
    pub fn failed(provider: ProviderId, error: ProviderError) -> Self {
        Self {
            provider,
            status: ProviderStatus::Failed(error),
        }
    }

    /// Create a timed-out result.
    pub fn timed_out(provider: ProviderId) -> Self {
        Self {
            provider,
            status: ProviderStatus::TimedOut,
        }
    }
}

/// Serializable outcome label for a provider slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceState {
    Ok,
    Failed,
    TimedOut,
}

impl fmt::Display for SourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Failed => write!(f, "failed"),
            Self::TimedOut => write!(f, "timed_out"),
        }
    }
}

/// Per-provider summary attached to an aggregated result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub provider: ProviderId,
    pub state: SourceState,
    /// Number of records the provider returned before deduplication.
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ProviderResult> for SourceSummary {
    fn from(result: &ProviderResult) -> Self {
        let (state, error) = match &result.status {
            ProviderStatus::Ok(_) => (SourceState::Ok, None),
            ProviderStatus::Failed(e) => (SourceState::Failed, Some(e.to_string())),
            ProviderStatus::TimedOut => (SourceState::TimedOut, None),
        };
        Self {
            provider: result.provider,
            state,
            count: result.status.records().len(),
            error,
        }
    }
}
