//! Per-key serialization for read-modify-write sequences.
//!
//! The backing store has no optimistic-concurrency guard, so two in-flight
//! payouts against one partner could both read a stale balance. Ledger
//! mutations take the partner's lock and booking transitions take the
//! booking's lock before reading.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Lazily-allocated map of per-key async mutexes.
#[derive(Debug, Default)]
pub struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the lock for `key`, creating it on first use. The guard is
    /// owned so it can be held across await points.
    pub async fn acquire(&self, key: &K) -> OwnedMutexGuard<()> {
        let lock = {
            let mut guard = self.locks.lock().expect("keyed lock mutex poisoned");
            guard.entry(key.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
