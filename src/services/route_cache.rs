//! Route cache: memoizes the last computed route per (worker, date) key.
//!
//! Locking is per key. The registry map sits behind a `parking_lot::Mutex`
//! that is only held long enough to find or create a key's slot. Each slot
//! is a `tokio::sync::Mutex` held for the whole build of that key's route,
//! so concurrent requests for the same key are serialized (the second one
//! waits and then sees the cached route) while other keys proceed freely.
//!
//! There is no expiry. Entries change only by recomputation or explicit
//! invalidation. A slot left empty (failed computation, invalidation) is
//! removed from the registry once no request holds it, so the map only
//! grows with cached routes and in-flight builds.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::types::{Route, RouteKey};

type Slot = Arc<tokio::sync::Mutex<Option<Route>>>;

/// How a route was obtained
#[derive(Debug, Clone, PartialEq)]
pub enum CacheOutcome {
    Hit(Route),
    Computed(Route),
}

impl CacheOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheOutcome::Hit(_))
    }

    pub fn route(&self) -> &Route {
        match self {
            CacheOutcome::Hit(route) | CacheOutcome::Computed(route) => route,
        }
    }

    pub fn into_route(self) -> Route {
        match self {
            CacheOutcome::Hit(route) | CacheOutcome::Computed(route) => route,
        }
    }
}

/// Thread-safe per-key route memo. Cheap to share via `Arc`.
#[derive(Default)]
pub struct RouteCache {
    slots: Mutex<HashMap<RouteKey, Slot>>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: RouteKey) -> Slot {
        self.slots.lock().entry(key).or_default().clone()
    }

    fn existing_slot(&self, key: &RouteKey) -> Option<Slot> {
        self.slots.lock().get(key).cloned()
    }

    /// Return the cached route for `key`, computing and storing it on a miss.
    ///
    /// A failed computation leaves the entry untouched.
    pub async fn get_or_compute<F, Fut, E>(&self, key: RouteKey, compute: F) -> Result<CacheOutcome, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Route, E>>,
    {
        let result = {
            let slot = self.slot(key);
            let mut entry = slot.lock().await;

            if let Some(route) = entry.as_ref() {
                return Ok(CacheOutcome::Hit(route.clone()));
            }

            compute().await.map(|route| {
                *entry = Some(route.clone());
                CacheOutcome::Computed(route)
            })
        };

        if result.is_err() {
            self.prune(&key);
        }
        result
    }

    /// Compute the route for `key` unconditionally and overwrite the entry.
    ///
    /// A failed computation keeps whatever was cached before.
    pub async fn recompute<F, Fut, E>(&self, key: RouteKey, compute: F) -> Result<Route, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Route, E>>,
    {
        let result = {
            let slot = self.slot(key);
            let mut entry = slot.lock().await;

            compute().await.map(|route| {
                *entry = Some(route.clone());
                route
            })
        };

        if result.is_err() {
            self.prune(&key);
        }
        result
    }

    /// Cached route for `key`, without computing. Waits for an in-flight
    /// computation of the same key.
    pub async fn get(&self, key: &RouteKey) -> Option<Route> {
        let slot = self.existing_slot(key)?;
        let entry = slot.lock().await;
        entry.clone()
    }

    /// Drop the entry for `key`. Returns whether a route was cached.
    pub async fn invalidate(&self, key: &RouteKey) -> bool {
        let Some(slot) = self.existing_slot(key) else {
            return false;
        };
        let was_cached = slot.lock().await.take().is_some();
        drop(slot);

        self.prune(key);
        was_cached
    }

    /// Drop every entry belonging to `worker_id`. Returns how many routes
    /// were cached.
    pub async fn invalidate_worker(&self, worker_id: Uuid) -> usize {
        let slots: Vec<(RouteKey, Slot)> = self
            .slots
            .lock()
            .iter()
            .filter(|(key, _)| key.worker_id == worker_id)
            .map(|(key, slot)| (*key, slot.clone()))
            .collect();

        let dropped = join_all(slots.iter().map(|(_, slot)| async move { slot.lock().await.take().is_some() })).await;
        let keys: Vec<RouteKey> = slots.into_iter().map(|(key, _)| key).collect();
        for key in &keys {
            self.prune(key);
        }

        dropped.into_iter().filter(|was_cached| *was_cached).count()
    }

    /// Number of keys that currently hold a route
    pub async fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots.lock().values().cloned().collect();
        let filled = join_all(slots.iter().map(|slot| async move { slot.lock().await.is_some() })).await;
        filled.into_iter().filter(|has_route| *has_route).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove `key` from the registry if its slot is empty and unshared.
    ///
    /// Callers must have dropped their own clone of the slot. A count of one
    /// under the registry lock means no request holds the slot and none can
    /// pick it up until the lock is released.
    fn prune(&self, key: &RouteKey) {
        let mut slots = self.slots.lock();
        let removable = slots.get(key).is_some_and(|slot| {
            Arc::strong_count(slot) == 1 && slot.try_lock().map(|entry| entry.is_none()).unwrap_or(false)
        });
        if removable {
            slots.remove(key);
        }
    }

    #[cfg(test)]
    fn registered_keys(&self) -> usize {
        self.slots.lock().len()
    }
}
