// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process LRU key-value store with per-entry expiry.
//!
//! The name cache is bounded by capacity so a flood of distinct names cannot
//! grow memory without limit. The exchange registry uses an unbounded store
//! so provisioned mappings are never evicted.
//! Entries past their expiry are dropped on read.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lru::LruCache;

use super::{KvStore, StoreError, StoreResult};
use crate::clock::{Clock, SystemClock};

struct Entry {
    value: String,
    expires_at_ms: Option<i64>,
}

pub struct MemoryKvStore {
    entries: Mutex<LruCache<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryKvStore {
    /// Create a store holding at most `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self::with_clock(capacity, Arc::new(SystemClock))
    }

    pub fn with_clock(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self::from_cache(
            LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            clock,
        )
    }

    /// Create a store that never evicts.
    pub fn unbounded() -> Self {
        Self::from_cache(LruCache::unbounded(), Arc::new(SystemClock))
    }

    fn from_cache(cache: LruCache<String, Entry>, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(cache),
            clock,
        }
    }

    /// Number of live (possibly expired, not yet evicted) entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = self.clock.now_ms();
        let mut cache = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        let expired = match cache.get(key) {
            Some(entry) => match entry.expires_at_ms {
                Some(expires_at) if expires_at <= now => true,
                _ => return Ok(Some(entry.value.clone())),
            },
            None => return Ok(None),
        };
        if expired {
            cache.pop(key);
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, expires_at_ms: Option<i64>) -> StoreResult<()> {
        let mut cache = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        cache.put(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at_ms,
            },
        );
        Ok(())
    }
}
