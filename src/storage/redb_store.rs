// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded key-value store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! One table per logical store, sharing a single database file:
//!
//! - `names`: `<name>::<network>` → stored entry (JSON)
//! - `exchanges`: `cxid-generic:<suffix>:id` / `<exchange>:endpointData` → stored entry
//!
//! A stored entry wraps the value with its optional expiry so expired keys
//! can be dropped lazily on read.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

use super::{KvStore, StoreResult};
use crate::clock::{Clock, SystemClock};

pub const NAMES_TABLE: &str = "names";
pub const EXCHANGES_TABLE: &str = "exchanges";

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<i64>,
}

impl StoredEntry {
    fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now_ms)
    }
}

/// Open (or create) the database file, creating parent directories.
pub fn open_database(path: &Path) -> StoreResult<Arc<Database>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let db = Database::create(path)?;
    Ok(Arc::new(db))
}

/// A [`KvStore`] over one redb table.
pub struct RedbKvStore {
    db: Arc<Database>,
    table: TableDefinition<'static, &'static str, &'static [u8]>,
    clock: Arc<dyn Clock>,
}

impl RedbKvStore {
    /// Bind a store to `table_name`, creating the table if needed.
    pub fn new(db: Arc<Database>, table_name: &'static str) -> StoreResult<Self> {
        Self::with_clock(db, table_name, Arc::new(SystemClock))
    }

    pub fn with_clock(
        db: Arc<Database>,
        table_name: &'static str,
        clock: Arc<dyn Clock>,
    ) -> StoreResult<Self> {
        let table = TableDefinition::new(table_name);

        // Pre-create the table so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(table)?;
        }
        write_txn.commit()?;

        Ok(Self { db, table, clock })
    }

    /// Drop `key` if it is still expired at `now_ms`.
    ///
    /// The expiry is re-read inside the write transaction, so a value written
    /// after the caller's read survives.
    fn remove_if_expired(&self, key: &str, now_ms: i64) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(self.table)?;
            let expired = match table.get(key)? {
                Some(raw) => serde_json::from_slice::<StoredEntry>(raw.value())?.is_expired(now_ms),
                None => false,
            };
            if expired {
                table.remove(key)?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[async_trait]
impl KvStore for RedbKvStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entry = {
            let read_txn = self.db.begin_read()?;
            let table = read_txn.open_table(self.table)?;
            match table.get(key)? {
                Some(raw) => serde_json::from_slice::<StoredEntry>(raw.value())?,
                None => return Ok(None),
            }
        };

        let now = self.clock.now_ms();
        if entry.is_expired(now) {
            self.remove_if_expired(key, now)?;
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    async fn put(&self, key: &str, value: &str, expires_at_ms: Option<i64>) -> StoreResult<()> {
        let json = serde_json::to_vec(&StoredEntry {
            value: value.to_string(),
            expires_at: expires_at_ms,
        })?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(self.table)?;
            table.insert(key, json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[tokio::test]
    async fn values_survive_reopening_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gateway.redb");

        {
            let db = open_database(&path).unwrap();
            let store = RedbKvStore::new(db, EXCHANGES_TABLE).unwrap();
            store
                .put("cxid-generic:binance.cxid.eth:id", "binance", None)
                .await
                .unwrap();
        }

        let db = open_database(&path).unwrap();
        let store = RedbKvStore::new(db, EXCHANGES_TABLE).unwrap();
        assert_eq!(
            store
                .get("cxid-generic:binance.cxid.eth:id")
                .await
                .unwrap()
                .as_deref(),
            Some("binance")
        );
    }

    #[tokio::test]
    async fn tables_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_database(&dir.path().join("gateway.redb")).unwrap();
        let names = RedbKvStore::new(db.clone(), NAMES_TABLE).unwrap();
        let exchanges = RedbKvStore::new(db, EXCHANGES_TABLE).unwrap();

        names.put("k", "name-value", None).await.unwrap();
        assert_eq!(exchanges.get("k").await.unwrap(), None);
        assert_eq!(names.get("k").await.unwrap().as_deref(), Some("name-value"));
    }

    #[tokio::test]
    async fn expired_entries_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_database(&dir.path().join("gateway.redb")).unwrap();
        let clock = Arc::new(FixedClock::new(10_000));
        let store = RedbKvStore::with_clock(db, NAMES_TABLE, clock.clone()).unwrap();

        store.put("k", "v", Some(20_000)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        clock.set(20_000);
        assert_eq!(store.get("k").await.unwrap(), None);

        // Removal is persistent: moving the clock back does not resurrect it.
        clock.set(0);
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn expiry_sweep_keeps_a_value_rewritten_after_the_read() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_database(&dir.path().join("gateway.redb")).unwrap();
        let clock = Arc::new(FixedClock::new(30_000));
        let store = RedbKvStore::with_clock(db, NAMES_TABLE, clock).unwrap();

        // A reader saw the old entry expired; a writer replaced it before the
        // sweep ran.
        store.put("k", "stale", Some(20_000)).await.unwrap();
        store.put("k", "fresh", Some(90_000)).await.unwrap();
        store.remove_if_expired("k", 30_000).unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("fresh"));

        store.put("k", "stale", Some(20_000)).await.unwrap();
        store.remove_if_expired("k", 30_000).unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
