//! Cross-component search state, published over an explicit channel.
//!
//! The header search box and the results dropdown are separate views; they
//! share state through a [`SearchFeed`] instead of ambient singletons.
//! Publishing goes through an explicit debounce so a keystroke burst settles
//! into a single notification.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use super::domain::EnrichedService;

/// Snapshot of the live search UI state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub query: String,
    pub results: Vec<EnrichedService>,
    pub visible: bool,
}

/// Watch-channel-backed publisher for [`SearchState`].
#[derive(Debug)]
pub struct SearchFeed {
    tx: watch::Sender<SearchState>,
    generation: AtomicU64,
    debounce: Duration,
}

impl SearchFeed {
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

    pub fn new(debounce: Duration) -> Self {
        let (tx, _) = watch::channel(SearchState::default());
        Self {
            tx,
            generation: AtomicU64::new(0),
            debounce,
        }
    }

    /// Receiver that observes every published state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.tx.borrow().clone()
    }

    /// Publish a query after the debounce window. Returns `false` when a
    /// newer query superseded this one while it was waiting.
    pub async fn publish_query(&self, query: String) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.debounce).await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        self.tx.send_modify(|state| {
            state.query = query;
            state.visible = true;
        });
        true
    }

    /// Replace the result list for the current query.
    pub fn set_results(&self, results: Vec<EnrichedService>) {
        self.tx.send_modify(|state| state.results = results);
    }

    pub fn set_visible(&self, visible: bool) {
        self.tx.send_modify(|state| state.visible = visible);
    }

    /// Reset query, results, and visibility in one notification.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.tx.send_replace(SearchState::default());
    }
}

impl Default for SearchFeed {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEBOUNCE)
    }
}
