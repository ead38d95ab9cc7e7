//! Multi-provider movie and TV search.
//!
//! A query fans out to every registered [`SearchProvider`] at once. Results
//! come back into fixed per-provider slots, are merged by IMDB id in
//! registration order, and are returned as one list.
//!
//! # Module layout
//!
//! - [`provider`] -- Trait every external source implements.
//! - [`providers`] -- Rotten Tomatoes, TMDB and TheTVDB clients.
//! - [`dispatcher`] -- Concurrent fan-out with a batch deadline.
//! - [`merger`] -- IMDB-id deduplication across providers.
//! - [`aggregator`] -- Validates queries and ties the pieces together.

pub mod aggregator;
pub mod dispatcher;
pub mod merger;
pub mod provider;
pub mod providers;

pub use aggregator::{AggregatedResult, SearchAggregator};
pub use dispatcher::{dispatch, DispatchOutcome};
pub use merger::merge;
pub use provider::SearchProvider;
