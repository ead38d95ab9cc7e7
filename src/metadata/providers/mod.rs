//! Concrete search provider implementations.
//!
//! Each submodule wraps a single external API and implements the
//! [`SearchProvider`](super::SearchProvider) trait.

mod http;
pub mod rotten_tomatoes;
pub mod tmdb;
pub mod tvdb;

pub use rotten_tomatoes::RottenTomatoesProvider;
pub use tmdb::TmdbProvider;
pub use tvdb::TvdbProvider;
