//! In-memory session store with per-id serialization.
//!
//! Sessions live in a `DashMap` of slots, one `tokio::sync::Mutex` per id.
//! Map shard locks are only held long enough to fetch a slot's `Arc`, so
//! turns on different ids never wait on each other. Turns on the same id
//! queue on the slot mutex in arrival order.
//!
//! A slot whose session is gone is retired and removed from the map when its
//! guard drops. A task that was queued on a retired slot notices the flag
//! and re-resolves the id, so it can never write into a slot that is no
//! longer reachable.
//!
//! Idle expiry is lazy: a session older than the idle timeout is discarded
//! when its slot is next locked, and `sweep_expired` drops idle slots that
//! nobody is currently using. No background task is involved.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;
use tracing::debug;

use crate::domain::session::Session;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("session {0} not found")]
    NotFound(String),
}

struct Slot {
    session: Option<Session>,
    touched: Instant,
    retired: bool,
}

impl Slot {
    fn vacant() -> Self {
        Self {
            session: None,
            touched: Instant::now(),
            retired: false,
        }
    }

    fn is_expired(&self, idle_timeout: Duration) -> bool {
        self.session.is_some() && self.touched.elapsed() >= idle_timeout
    }
}

pub struct SessionStore {
    slots: DashMap<String, Arc<Mutex<Slot>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            slots: DashMap::new(),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Acquire exclusive access to `id` for one read-modify-write.
    ///
    /// The returned guard exists whether or not a session is stored under
    /// `id`; callers inspect `session()` and may `put` one.
    pub async fn lock(&self, id: &str) -> SessionGuard<'_> {
        loop {
            let slot = self
                .slots
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Slot::vacant())))
                .value()
                .clone();

            let mut guard = slot.clone().lock_owned().await;
            if guard.retired {
                continue;
            }

            if guard.is_expired(self.idle_timeout) {
                debug!(session_id = %id, "session expired while idle");
                guard.session = None;
            }

            return SessionGuard {
                store: self,
                id: id.to_string(),
                slot,
                guard,
            };
        }
    }

    /// Snapshot of the session stored under `id`.
    ///
    /// The returned value is a copy; mutating it has no effect on the store.
    pub async fn get(&self, id: &str) -> Result<Session, StoreError> {
        self.lock(id)
            .await
            .session()
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Upsert with full replacement.
    pub async fn put(&self, id: &str, session: Session) {
        self.lock(id).await.put(session);
    }

    pub async fn delete(&self, id: &str) {
        self.lock(id).await.delete();
    }

    /// Number of slots currently in the map. Slots that are mid-turn count
    /// even if their turn is about to delete the session.
    pub fn active_sessions(&self) -> usize {
        self.slots
            .iter()
            .filter(|entry| match entry.value().try_lock() {
                Ok(slot) => slot.session.is_some() && !slot.is_expired(self.idle_timeout),
                Err(_) => true,
            })
            .count()
    }

    /// Drop idle and empty slots that are not currently locked.
    ///
    /// Returns how many slots were removed.
    pub fn sweep_expired(&self) -> usize {
        let candidates: Vec<(String, Arc<Mutex<Slot>>)> = self
            .slots
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let mut removed = 0;
        for (id, slot) in candidates {
            let Ok(mut guard) = slot.clone().try_lock_owned() else {
                continue;
            };
            if guard.retired || !(guard.session.is_none() || guard.is_expired(self.idle_timeout))
            {
                continue;
            }
            guard.session = None;
            guard.retired = true;
            self.slots.remove_if(&id, |_, current| Arc::ptr_eq(current, &slot));
            removed += 1;
        }

        if removed > 0 {
            debug!(removed, "swept idle sessions");
        }
        removed
    }
}

/// Exclusive access to one session id.
///
/// Dropping the guard releases the id. If no session is stored at that
/// point the slot is retired and removed from the map.
pub struct SessionGuard<'a> {
    store: &'a SessionStore,
    id: String,
    slot: Arc<Mutex<Slot>>,
    guard: OwnedMutexGuard<Slot>,
}

impl SessionGuard<'_> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn session(&self) -> Option<&Session> {
        self.guard.session.as_ref()
    }

    /// Replace the stored session and reset its idle clock.
    pub fn put(&mut self, session: Session) {
        self.guard.session = Some(session);
        self.guard.touched = Instant::now();
    }

    /// Reset the idle clock without changing the session.
    pub fn touch(&mut self) {
        if self.guard.session.is_some() {
            self.guard.touched = Instant::now();
        }
    }

    pub fn delete(&mut self) -> Option<Session> {
        self.guard.session.take()
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        if self.guard.session.is_none() && !self.guard.retired {
            self.guard.retired = true;
            self.store
                .slots
                .remove_if(&self.id, |_, current| Arc::ptr_eq(current, &self.slot));
        }
    }
}
