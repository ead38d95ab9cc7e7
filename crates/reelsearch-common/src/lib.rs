//! Reelsearch-Common: shared types and errors for the search pipeline.
//!
//! This crate provides the vocabulary every other reelsearch component speaks:
//!
//! - **Records**: the normalized [`SearchRecord`] produced by all providers
//! - **Identifiers**: [`ProviderId`] and IMDB id normalization
//! - **Queries**: the validated [`SearchQuery`] newtype
//! - **Error Handling**: provider, aggregation, and queue error enums
//!
//! # Examples
//!
//! ```
//! use reelsearch_common::{SearchQuery, SearchRecord, StreamLinkTemplate};
//!
//! let query = SearchQuery::parse("  Inception ").unwrap();
//! assert_eq!(query.as_str(), "Inception");
//!
//! let template = StreamLinkTemplate::default();
//! let record = SearchRecord::new("27205", "Inception")
//!     .with_imdb_id(Some("tt1375666"), &template);
//! assert_eq!(record.imdb_id.as_deref(), Some("tt1375666"));
//! assert!(record.stream_url.is_some());
//! ```

pub mod error;
pub mod query;
pub mod record;
pub mod types;

pub use error::{AggregationError, ProviderError, QueryError, QueueError};
pub use query::SearchQuery;
pub use record::{normalize_imdb_id, SearchRecord, StreamLinkTemplate};
pub use types::*;
