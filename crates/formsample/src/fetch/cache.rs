// File: src/fetch/cache.rs
// Purpose: Keyed request cache with in-flight deduplication

use super::{FetchError, FetchState, Fetcher};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, trace};

type Slot<T> = Arc<OnceCell<Result<T, FetchError>>>;

/// Cache of remote resources keyed by URL.
///
/// Each key owns one slot; the first reader starts the fetch and every
/// concurrent reader awaits the same request. Results, failures included,
/// stay cached until [`ResourceCache::invalidate`] drops them.
pub struct ResourceCache<T> {
    fetcher: Arc<dyn Fetcher<T>>,
    slots: Arc<Mutex<HashMap<String, Slot<T>>>>,
}

impl<T> Clone for ResourceCache<T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<T> ResourceCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(fetcher: Arc<dyn Fetcher<T>>) -> Self {
        Self {
            fetcher,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn slot(&self, key: &str) -> Slot<T> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.to_string()).or_default())
    }

    /// Current state without waiting. A key that has not resolved yet gets a
    /// background fetch started and reads as `Pending`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn state(&self, key: &str) -> FetchState<T> {
        match self.slot(key).get() {
            Some(result) => {
                trace!(key, "cache hit");
                result.clone().into()
            }
            None => {
                self.prefetch(key);
                FetchState::Pending
            }
        }
    }

    /// Start loading `key` in the background
    pub fn prefetch(&self, key: &str) {
        let cache = self.clone();
        let key = key.to_string();
        tokio::spawn(async move {
            let _ = cache.resolve(&key).await;
        });
    }

    /// Wait for the value of `key`, fetching it at most once
    pub async fn resolve(&self, key: &str) -> Result<T, FetchError> {
        let slot = self.slot(key);
        let fetcher = Arc::clone(&self.fetcher);
        slot.get_or_init(|| async move {
            debug!(key, "cache miss, fetching");
            fetcher.fetch(key).await
        })
        .await
        .clone()
    }

    /// Drop the cached entry so the next read fetches again.
    /// Returns whether an entry existed.
    pub fn invalidate(&self, key: &str) -> bool {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.remove(key).is_some()
    }

    /// Number of keys with a slot (resolved or in flight)
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
