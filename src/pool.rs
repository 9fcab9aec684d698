/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */

//!
//! Bounded thread-safe connection pool with pre-ping and recycle.
//!

use std::collections::HashSet;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ShibaConfig;
use crate::errors::{Result, ShibaError};
use crate::manager::ManageConnection;

/// Connection pool state
#[derive(Debug, Clone, Serialize)]
pub struct PoolStatus {
    /// Live connections, free and checked out together.
    pub size: usize,
    /// Connections sitting idle in the pool.
    pub available: usize,
}

/// A raw connection plus the bookkeeping the pool needs for recycling.
struct ConnEntry<C> {
    id: u64,
    raw: C,
    created_at: Instant,
    last_used_at: Instant,
}

/// Mutable pool state. Every connection is either in `free` or its id is
/// in `in_use`, never both.
struct PoolInternals<C> {
    free: Vec<ConnEntry<C>>,
    in_use: HashSet<u64>,
}

struct SharedPool<M: ManageConnection> {
    config: ShibaConfig,
    manager: M,
    internals: Mutex<PoolInternals<M::Connection>>,
    cond: Condvar,
    next_id: AtomicU64,
}

impl<M: ManageConnection> SharedPool<M> {
    fn lock(&self) -> MutexGuard<'_, PoolInternals<M::Connection>> {
        self.internals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn spawn(&self, id: u64) -> Result<ConnEntry<M::Connection>> {
        let raw = self.manager.connect()?;
        debug!("Spawned new connection #{}", id);
        let now = Instant::now();
        Ok(ConnEntry {
            id,
            raw,
            created_at: now,
            last_used_at: now,
        })
    }

    /// Free a slot without returning any handle to the free list.
    fn discard(&self, id: u64) {
        let mut internals = self.lock();
        internals.in_use.remove(&id);
        drop(internals);
        self.cond.notify_one();
    }

    /// Return a checked-out entry to the free list and wake one waiter.
    /// An entry the pool no longer tracks is closed instead, never pooled.
    fn put_back(&self, entry: ConnEntry<M::Connection>) {
        let mut internals = self.lock();
        if internals.in_use.remove(&entry.id) {
            internals.free.push(entry);
            drop(internals);
            self.cond.notify_one();
            return;
        }
        drop(internals);
        let ConnEntry { id, raw, .. } = entry;
        debug!("Dropping connection #{} the pool does not track", id);
        if let Err(err) = self.manager.close(raw) {
            warn!("Failed to close untracked connection #{}: {}", id, err);
        }
    }
}

/// A bounded, thread-safe pool of backend connections.
///
/// Connections are created lazily on checkout while the live count has
/// headroom; an exhausted pool blocks callers up to `connection_timeout`.
/// Checked-out connections are probed (`test_on_check_out`) and recycled
/// past `max_lifetime` before they reach the caller.
///
/// Cloning the pool is cheap and shares the same state.
pub struct Pool<M: ManageConnection>(Arc<SharedPool<M>>);

impl<M: ManageConnection> Clone for Pool<M> {
    fn clone(&self) -> Self {
        Pool(Arc::clone(&self.0))
    }
}

impl<M: ManageConnection> Pool<M> {
    pub fn new(manager: M, config: ShibaConfig) -> Self {
        Pool(Arc::new(SharedPool {
            config,
            manager,
            internals: Mutex::new(PoolInternals {
                free: Vec::new(),
                in_use: HashSet::new(),
            }),
            cond: Condvar::new(),
            next_id: AtomicU64::new(0),
        }))
    }

    /// Get a connection from the pool, blocking up to `connection_timeout`
    /// when every slot is taken.
    pub fn acquire(&self) -> Result<PooledConnection<M>> {
        let shared = &self.0;
        let timeout = shared.config.connection_timeout();
        let deadline = Instant::now() + timeout;
        let entry = {
            let mut internals = shared.lock();
            loop {
                // free connections first, last-in-first-out
                if let Some(entry) = internals.free.pop() {
                    internals.in_use.insert(entry.id);
                    break entry;
                }
                // headroom: reserve the slot, connect with the lock released
                if internals.in_use.len() < shared.config.max_size() as usize {
                    let id = shared.next_id();
                    internals.in_use.insert(id);
                    drop(internals);
                    match shared.spawn(id) {
                        Ok(entry) => break entry,
                        Err(err) => {
                            shared.discard(id);
                            return Err(err);
                        }
                    }
                }
                // exhausted: wait for a release, recheck deadline on wake
                let now = Instant::now();
                if now >= deadline {
                    warn!(
                        "Pool acquire timeout (max_size={}, in_use={})",
                        shared.config.max_size(),
                        internals.in_use.len()
                    );
                    return Err(ShibaError::AcquireTimeout(format!(
                        "no connection became available within {:?}",
                        timeout
                    )));
                }
                debug!("Pool exhausted; waiting for a free connection");
                let (guard, _) = shared
                    .cond
                    .wait_timeout(internals, deadline - now)
                    .unwrap_or_else(PoisonError::into_inner);
                internals = guard;
            }
        };
        self.checkout(entry)
    }

    /// Post-checkout policies: pre-ping, then age recycle, then stamp.
    /// The caller already owns the slot; on any failure here the slot is
    /// freed and the stale handle discarded, never returned to `free`.
    fn checkout(&self, mut entry: ConnEntry<M::Connection>) -> Result<PooledConnection<M>> {
        let shared = &self.0;
        if shared.config.test_on_check_out() {
            if let Err(err) = shared.manager.is_valid(&mut entry.raw) {
                warn!("Pre-ping failed, recreating connection: {}", err);
                entry = self.replace(entry)?;
            }
        }
        if entry.created_at.elapsed() >= shared.config.max_lifetime() {
            debug!("Recycling connection #{} past max lifetime", entry.id);
            entry = self.replace(entry)?;
        }
        entry.last_used_at = Instant::now();
        Ok(PooledConnection {
            entry: Some(entry),
            pool: Arc::clone(shared),
        })
    }

    /// Destroy a checked-out connection and synthesize a fresh one in its
    /// slot. The replacement does not re-enter the wait queue.
    fn replace(&self, entry: ConnEntry<M::Connection>) -> Result<ConnEntry<M::Connection>> {
        let shared = &self.0;
        let ConnEntry { id: old_id, raw, .. } = entry;
        if let Err(err) = shared.manager.close(raw) {
            debug!("Ignoring close failure of stale connection #{}: {}", old_id, err);
        }
        match shared.spawn(shared.next_id()) {
            Ok(fresh) => {
                let mut internals = shared.lock();
                internals.in_use.remove(&old_id);
                internals.in_use.insert(fresh.id);
                Ok(fresh)
            }
            Err(err) => {
                shared.discard(old_id);
                Err(err)
            }
        }
    }

    /// Return a connection to the pool and wake one waiter.
    ///
    /// Dropping the handle does the same; releasing a handle this pool
    /// does not own is a no-op here (the handle still goes back to its
    /// own pool).
    pub fn release(&self, mut conn: PooledConnection<M>) {
        if let Some(entry) = conn.entry.take() {
            conn.pool.put_back(entry);
        }
    }

    /// Best-effort close of every idle connection. Checked-out
    /// connections are untouched; they return to the pool when released.
    pub fn close_all(&self) {
        let drained: Vec<ConnEntry<M::Connection>> = {
            let mut internals = self.0.lock();
            internals.free.drain(..).collect()
        };
        let count = drained.len();
        for entry in drained {
            let ConnEntry { id, raw, .. } = entry;
            if let Err(err) = self.0.manager.close(raw) {
                warn!("Failed to close idle connection #{}: {}", id, err);
            }
        }
        info!("Closed {} idle connections in pool", count);
    }

    /// Get the connection pool status
    pub fn status(&self) -> PoolStatus {
        let internals = self.0.lock();
        PoolStatus {
            size: internals.free.len() + internals.in_use.len(),
            available: internals.free.len(),
        }
    }

    pub fn config(&self) -> &ShibaConfig {
        &self.0.config
    }
}

/// A live connection checked out of a [`Pool`].
///
/// Derefs to the raw driver connection and returns itself to its pool
/// when dropped, so a panicking caller can never leak a slot.
pub struct PooledConnection<M: ManageConnection> {
    entry: Option<ConnEntry<M::Connection>>,
    pool: Arc<SharedPool<M>>,
}

impl<M: ManageConnection> PooledConnection<M> {
    fn entry(&self) -> &ConnEntry<M::Connection> {
        self.entry.as_ref().expect("connection has been released")
    }

    /// Pool-assigned identity of the underlying connection. A replacement
    /// synthesized by pre-ping or recycle carries a fresh id.
    pub fn id(&self) -> u64 {
        self.entry().id
    }

    pub fn created_at(&self) -> Instant {
        self.entry().created_at
    }

    pub fn last_used_at(&self) -> Instant {
        self.entry().last_used_at
    }
}

impl<M: ManageConnection> Deref for PooledConnection<M> {
    type Target = M::Connection;

    fn deref(&self) -> &M::Connection {
        &self.entry().raw
    }
}

impl<M: ManageConnection> DerefMut for PooledConnection<M> {
    fn deref_mut(&mut self) -> &mut M::Connection {
        &mut self.entry.as_mut().expect("connection has been released").raw
    }
}

impl<M: ManageConnection> Drop for PooledConnection<M> {
    fn drop(&mut self) {
        if let Some(entry) = self.entry.take() {
            self.pool.put_back(entry);
        }
    }
}

impl<M: ManageConnection> fmt::Debug for PooledConnection<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.entry();
        f.debug_struct("PooledConnection")
            .field("id", &entry.id)
            .field("age", &entry.created_at.elapsed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Clone, Default)]
    struct TestManager {
        closes: Arc<AtomicUsize>,
    }

    impl ManageConnection for TestManager {
        type Connection = ();

        fn connect(&self) -> Result<()> {
            Ok(())
        }

        fn is_valid(&self, _conn: &mut ()) -> Result<()> {
            Ok(())
        }

        fn close(&self, _conn: ()) -> Result<()> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn untracked_entry_is_closed_not_pooled() {
        let manager = TestManager::default();
        let closes = Arc::clone(&manager.closes);
        let pool = Pool::new(manager, ShibaConfig::default());

        let now = Instant::now();
        let stray = ConnEntry {
            id: 99,
            raw: (),
            created_at: now,
            last_used_at: now,
        };
        pool.0.put_back(stray);

        let internals = pool.0.lock();
        assert!(internals.free.is_empty(), "untracked connection must not enter the free list");
        assert!(internals.in_use.is_empty());
        drop(internals);
        assert_eq!(closes.load(Ordering::SeqCst), 1, "the stray handle should be closed");
    }

    #[test]
    fn tracked_entry_lands_in_free_exactly_once() {
        let pool = Pool::new(TestManager::default(), ShibaConfig::default());
        let conn = pool.acquire().unwrap();
        let id = conn.id();
        pool.release(conn);

        let internals = pool.0.lock();
        assert_eq!(internals.free.len(), 1);
        assert_eq!(internals.free[0].id, id);
        assert!(!internals.in_use.contains(&id));
    }
}
