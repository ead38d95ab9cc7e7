//! Named video queues that selected search results are written into.
//!
//! [`QueueStore`] is the storage seam; [`MemoryQueueStore`] is the
//! process-local implementation the server uses.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use reelsearch_common::{normalize_imdb_id, QueueError};
use serde::Serialize;
use tracing::{debug, info};

/// One video in a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedVideo {
    pub imdb_id: String,
    pub comment: String,
    pub added_at: DateTime<Utc>,
}

impl QueuedVideo {
    fn new(imdb_id: String, added_at: DateTime<Utc>) -> Self {
        Self {
            comment: format!("Video added at {}", added_at.format("%Y-%m-%d %H:%M:%S")),
            imdb_id,
            added_at,
        }
    }
}

/// Storage for named queues of videos keyed by IMDB id.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Add `imdb_id` to `queue`.
    ///
    /// The id is normalized first. Adding an id already in the queue leaves
    /// the queue unchanged and returns the existing entry.
    async fn add(&self, queue: &str, imdb_id: &str) -> Result<QueuedVideo, QueueError>;

    /// List the entries of `queue` in insertion order. Unknown queues are empty.
    async fn list(&self, queue: &str) -> Result<Vec<QueuedVideo>, QueueError>;
}

/// In-memory [`QueueStore`]. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryQueueStore {
    queues: DashMap<String, Vec<QueuedVideo>>,
}

impl MemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueueStore for MemoryQueueStore {
    async fn add(&self, queue: &str, imdb_id: &str) -> Result<QueuedVideo, QueueError> {
        let imdb_id = normalize_imdb_id(imdb_id)
            .ok_or_else(|| QueueError::InvalidImdbId(imdb_id.to_string()))?;

        let mut entries = self.queues.entry(queue.to_string()).or_default();
        if let Some(existing) = entries.iter().find(|v| v.imdb_id == imdb_id) {
            debug!(queue, imdb_id = %existing.imdb_id, "Video already queued");
            return Ok(existing.clone());
        }

        let video = QueuedVideo::new(imdb_id, Utc::now());
        entries.push(video.clone());
        info!(queue, imdb_id = %video.imdb_id, "Video queued");
        Ok(video)
    }

    async fn list(&self, queue: &str) -> Result<Vec<QueuedVideo>, QueueError> {
        Ok(self
            .queues
            .get(queue)
            .map(|entries| entries.value().clone())
            .unwrap_or_default())
    }
}
