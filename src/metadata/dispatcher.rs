//! Concurrent fan-out of one query to every provider.
//!
//! Each provider runs in its own Tokio task and reports back exactly once
//! over an mpsc channel, tagged with its slot index. The dispatcher is the
//! only writer of the slot vector. It stops waiting when every slot is filled
//! or the batch deadline passes. Tasks still running at the deadline are
//! aborted (best-effort) and their slots become [`ProviderStatus::TimedOut`];
//! anything they send afterwards goes to a closed receiver. A task that
//! panicked is reported as [`ProviderStatus::Failed`] whenever the batch ends.

use std::sync::Arc;
use std::time::Duration;

use reelsearch_common::{
    ProviderError, ProviderResult, ProviderStatus, SearchQuery, SearchRecord,
};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::provider::SearchProvider;

type SlotReport = (usize, Result<Vec<SearchRecord>, ProviderError>);

/// Per-provider outcomes of one dispatch, in provider order.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub results: Vec<ProviderResult>,
    /// Wall time spent waiting for providers.
    pub elapsed: Duration,
}

impl DispatchOutcome {
    /// Number of providers that did not report before the deadline.
    pub fn timed_out(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, ProviderStatus::TimedOut))
            .count()
    }
}

/// Run `query` against all `providers` concurrently, waiting at most `timeout`.
pub async fn dispatch(
    query: &SearchQuery,
    providers: &[Arc<dyn SearchProvider>],
    timeout: Duration,
) -> DispatchOutcome {
    let started = Instant::now();
    let deadline = started + timeout;

    let (tx, mut rx) = mpsc::channel::<SlotReport>(providers.len().max(1));
    let mut handles = Vec::with_capacity(providers.len());

    for (slot, provider) in providers.iter().enumerate() {
        let provider = Arc::clone(provider);
        let query = query.clone();
        let tx = tx.clone();
        handles.push(tokio::spawn(async move {
            let result = provider.search(&query).await;
            // A closed receiver means the batch already timed out.
            let _ = tx.send((slot, result)).await;
        }));
    }
    drop(tx);

    let mut slots: Vec<Option<Result<Vec<SearchRecord>, ProviderError>>> =
        (0..providers.len()).map(|_| None).collect();
    let mut pending = providers.len();
    let mut senders_gone = false;

    while pending > 0 {
        match tokio::time::timeout_at(deadline, rx.recv()).await {
            Ok(Some((slot, result))) => {
                match &result {
                    Ok(records) => debug!(
                        provider = %providers[slot].id(),
                        count = records.len(),
                        "Provider completed"
                    ),
                    Err(e) => warn!(
                        provider = %providers[slot].id(),
                        error = %e,
                        "Provider failed; continuing without it"
                    ),
                }
                slots[slot] = Some(result);
                pending -= 1;
            }
            // Every sender is gone; the remaining tasks ended without reporting.
            Ok(None) => {
                senders_gone = true;
                break;
            }
            Err(_) => {
                warn!(
                    pending,
                    timeout_ms = timeout.as_millis() as u64,
                    "Batch timeout reached; treating pending providers as absent"
                );
                break;
            }
        }
    }

    rx.close();

    let mut results = Vec::with_capacity(providers.len());
    for ((provider, slot), handle) in providers.iter().zip(slots).zip(handles) {
        let id = provider.id();
        let result = match slot {
            Some(Ok(records)) => ProviderResult::ok(id, records),
            Some(Err(e)) => ProviderResult::failed(id, e),
            // A finished task that never reported either panicked or sent
            // after the deadline. Once every sender is gone, all tasks are
            // ending and joining them cannot block.
            None if senders_gone || handle.is_finished() => match handle.await {
                Err(e) if e.is_panic() => {
                    warn!(provider = %id, "Provider task panicked");
                    let error = ProviderError::request(id, "provider task panicked");
                    ProviderResult::failed(id, error)
                }
                _ => ProviderResult::timed_out(id),
            },
            None => {
                handle.abort();
                ProviderResult::timed_out(id)
            }
        };
        results.push(result);
    }

    DispatchOutcome {
        results,
        elapsed: started.elapsed(),
    }
}
