// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Key-Value Storage
//!
//! The gateway persists two things, both through the [`KvStore`] interface:
//!
//! - the **name cache**: resolved [`NameRecord`](crate::models::NameRecord)s
//!   keyed by `<name>::<network>`, written with an expiry;
//! - the **exchange registry**: suffix → exchange id mappings and each
//!   exchange's [`ExchangeEndpoint`], provisioned out-of-band.
//!
//! ## Key Layout
//!
//! ```text
//! names:
//!   <name>::<network>             # NameRecord JSON, expires at validityGuaranty
//! exchanges:
//!   cxid-generic:<suffix>:id      # exchange id (plain string)
//!   <exchange_id>:endpointData    # ExchangeEndpoint JSON
//! ```
//!
//! Backends: [`MemoryKvStore`] (LRU, in-process) and [`RedbKvStore`]
//! (embedded, survives restarts).

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::ExchangeEndpoint;

pub mod memory;
pub mod redb_store;

pub use memory::MemoryKvStore;
pub use redb_store::{open_database, RedbKvStore, EXCHANGES_TABLE, NAMES_TABLE};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Minimal ordered key-value interface with expiry.
///
/// `expires_at_ms` is an absolute epoch-millisecond deadline; once reached the
/// key reads as absent.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    async fn put(&self, key: &str, value: &str, expires_at_ms: Option<i64>) -> StoreResult<()>;
}

pub fn name_cache_key(name: &str, network: &str) -> String {
    format!("{name}::{network}")
}

pub fn exchange_id_key(suffix: &str) -> String {
    format!("cxid-generic:{suffix}:id")
}

pub fn endpoint_key(exchange_id: &str) -> String {
    format!("{exchange_id}:endpointData")
}

/// One exchange to provision into the registry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeSeed {
    pub exchange_id: String,
    /// Name suffixes owned by the exchange, e.g. `binance.cxid.eth`.
    pub suffixes: Vec<String>,
    pub endpoint: ExchangeEndpoint,
}

/// Write an exchange's suffix mappings and endpoint data.
pub async fn seed_exchange(store: &dyn KvStore, seed: &ExchangeSeed) -> StoreResult<()> {
    for suffix in &seed.suffixes {
        store
            .put(
                &exchange_id_key(&suffix.to_lowercase()),
                &seed.exchange_id,
                None,
            )
            .await?;
    }
    let endpoint = serde_json::to_string(&seed.endpoint)?;
    store
        .put(&endpoint_key(&seed.exchange_id), &endpoint, None)
        .await
}

/// Load a JSON array of [`ExchangeSeed`]s from disk and provision each one.
pub async fn seed_from_file(store: &dyn KvStore, path: &std::path::Path) -> StoreResult<usize> {
    let raw = std::fs::read_to_string(path)?;
    let seeds: Vec<ExchangeSeed> = serde_json::from_str(&raw)?;
    for seed in &seeds {
        seed_exchange(store, seed).await?;
    }
    Ok(seeds.len())
}
