// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Name Resolution
//!
//! Turns `(name, network)` into a [`NameRecord`]:
//!
//! 1. serve from the name cache when a matching, unexpired record exists;
//! 2. otherwise find the exchange owning the name by its longest-matching
//!    suffix mapping, starting from the last two labels;
//! 3. ask that exchange and cache the answer when it is valid for long enough.
//!
//! Every failure resolves to `None`. Security and configuration problems are
//! logged at error level, ordinary misses at info/debug.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::{
    clock::Clock,
    exchange::ExchangeApi,
    models::{ExchangeEndpoint, NameRecord},
    networks::normalize_id_and_network,
    storage::{endpoint_key, exchange_id_key, name_cache_key, KvStore},
};

/// Records expiring sooner than this are never cached.
pub const MIN_CACHE_VALIDITY_MS: i64 = 10 * 60 * 1000;

/// Trust window handed to callers for freshly fetched records.
pub const RESPONSE_VALIDITY_MS: i64 = 60 * 1000;

/// Exchange owning a name, and the user part of the name on that exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeMatch {
    pub exchange_id: String,
    pub user_id: String,
}

pub struct NameResolver {
    names: Arc<dyn KvStore>,
    exchanges: Arc<dyn KvStore>,
    exchange: Arc<dyn ExchangeApi>,
    clock: Arc<dyn Clock>,
}

impl NameResolver {
    pub fn new(
        names: Arc<dyn KvStore>,
        exchanges: Arc<dyn KvStore>,
        exchange: Arc<dyn ExchangeApi>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            names,
            exchanges,
            exchange,
            clock,
        }
    }

    pub async fn resolve(&self, name: &str, network: &str) -> Option<NameRecord> {
        info!(name = %name, network = %network, "Resolving name");

        let Some(requested) = normalize_id_and_network(Some(name), Some(network)) else {
            warn!(name = %name, network = %network, "Invalid name or network");
            return None;
        };
        let labels: Vec<&str> = requested.id.split('.').collect();
        if labels.len() == 1 {
            info!(name = %requested.id, "Top-level name cannot be resolved");
            return None;
        }

        let cache_key = name_cache_key(&requested.id, &requested.network);
        if let Some(cached) = self.load_cached(&cache_key, &requested.id).await {
            debug!(name = %requested.id, "Serving name from cache");
            return Some(cached);
        }

        let Some(found) = self.find_exchange(&labels).await else {
            info!(name = %requested.id, "No exchange owns this name");
            return None;
        };
        let endpoint = self.load_endpoint(&found.exchange_id).await?;

        let mut record = match self
            .exchange
            .fetch_account(&found.user_id, &requested.network, &endpoint)
            .await
        {
            Ok(record) => record,
            Err(e) if e.is_fatal() || e.is_security() => {
                error!(exchange = %found.exchange_id, error = %e, "Exchange lookup rejected");
                return None;
            }
            Err(e) => {
                warn!(exchange = %found.exchange_id, error = %e, "Exchange lookup failed");
                return None;
            }
        };

        // The exchange answers for its user id; the cache is keyed by full name.
        record.id = requested.id;

        let now = self.clock.now_ms();
        if record.validity_guaranty > now + MIN_CACHE_VALIDITY_MS {
            self.store_cached(&cache_key, &record).await;
        }
        record.validity_guaranty = now + RESPONSE_VALIDITY_MS;
        Some(record)
    }

    /// Try suffixes of 2, 3, ... labels; the first mapped one wins.
    ///
    /// A registry read failure aborts the search; no longer suffix is tried.
    pub async fn find_exchange(&self, labels: &[&str]) -> Option<ExchangeMatch> {
        let total = labels.len();
        for size in 2..=total {
            let suffix = labels[total - size..].join(".");
            let key = exchange_id_key(&suffix);
            debug!(key = %key, "Looking up exchange mapping");

            match self.exchanges.get(&key).await {
                Ok(Some(exchange_id)) => {
                    return Some(ExchangeMatch {
                        exchange_id,
                        user_id: labels[..total - size].join("."),
                    });
                }
                Ok(None) => {}
                Err(e) => {
                    error!(key = %key, error = %e, "Exchange registry read failed");
                    return None;
                }
            }
        }
        None
    }

    async fn load_cached(&self, key: &str, name: &str) -> Option<NameRecord> {
        let raw = match self.names.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %key, error = %e, "Name cache read failed");
                return None;
            }
        };
        let record: NameRecord = serde_json::from_str(&raw).ok()?;
        (record.id == name && record.validity_guaranty > self.clock.now_ms()).then_some(record)
    }

    async fn store_cached(&self, key: &str, record: &NameRecord) {
        let value = match serde_json::to_string(record) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize name record");
                return;
            }
        };
        if let Err(e) = self
            .names
            .put(key, &value, Some(record.validity_guaranty))
            .await
        {
            warn!(key = %key, error = %e, "Name cache write failed");
        }
    }

    async fn load_endpoint(&self, exchange_id: &str) -> Option<ExchangeEndpoint> {
        let key = endpoint_key(exchange_id);
        let raw = match self.exchanges.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                error!(exchange = %exchange_id, "FATAL: no endpoint data stored for exchange");
                return None;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Exchange registry read failed");
                return None;
            }
        };
        match serde_json::from_str::<ExchangeEndpoint>(&raw) {
            Ok(endpoint) if endpoint.is_well_formed() => Some(endpoint),
            _ => {
                error!(exchange = %exchange_id, "FATAL: invalid exchange endpoint data stored");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FixedClock,
        exchange::ExchangeError,
        storage::{seed_exchange, ExchangeSeed, MemoryKvStore, StoreError, StoreResult},
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    const NOW: i64 = 1_700_000_000_000;
    const ETH: &str = "2147483708";

    /// Wraps a memory store and records every write.
    struct RecordingStore {
        inner: MemoryKvStore,
        puts: Mutex<Vec<(String, String, Option<i64>)>>,
    }

    impl RecordingStore {
        fn new(clock: Arc<dyn Clock>) -> Self {
            Self {
                inner: MemoryKvStore::with_clock(64, clock),
                puts: Mutex::new(Vec::new()),
            }
        }

        fn puts(&self) -> Vec<(String, String, Option<i64>)> {
            self.puts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl KvStore for RecordingStore {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn put(&self, key: &str, value: &str, expires_at_ms: Option<i64>) -> StoreResult<()> {
            self.puts
                .lock()
                .unwrap()
                .push((key.into(), value.into(), expires_at_ms));
            self.inner.put(key, value, expires_at_ms).await
        }
    }

    /// Answers every lookup with a fixed guaranty and records the user ids.
    struct StubExchange {
        validity_guaranty: i64,
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ExchangeApi for StubExchange {
        async fn fetch_account(
            &self,
            user_id: &str,
            network: &str,
            _endpoint: &ExchangeEndpoint,
        ) -> Result<NameRecord, ExchangeError> {
            self.calls
                .lock()
                .unwrap()
                .push((user_id.to_string(), network.to_string()));
            if user_id.is_empty() {
                return Err(ExchangeError::InvalidIdentity {
                    id: user_id.into(),
                    network: network.into(),
                });
            }
            Ok(NameRecord {
                id: user_id.to_string(),
                network: network.to_string(),
                address: "0x8ba1f109551bD432803012645Ac136ddd64DBA72".into(),
                validity_guaranty: self.validity_guaranty,
            })
        }
    }

    struct Fixture {
        resolver: NameResolver,
        names: Arc<RecordingStore>,
        exchange: Arc<StubExchange>,
        clock: Arc<FixedClock>,
    }

    async fn fixture(validity_guaranty: i64, suffixes: &[&str]) -> Fixture {
        let clock = Arc::new(FixedClock::new(NOW));
        let names = Arc::new(RecordingStore::new(clock.clone()));
        let exchanges = Arc::new(MemoryKvStore::with_clock(64, clock.clone()));
        seed_exchange(
            exchanges.as_ref(),
            &ExchangeSeed {
                exchange_id: "binance".into(),
                suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
                endpoint: ExchangeEndpoint {
                    url: "https://api.binance.test/cxid".into(),
                    encrypted_signing_key: "00".repeat(32),
                },
            },
        )
        .await
        .unwrap();
        let exchange = Arc::new(StubExchange {
            validity_guaranty,
            calls: Mutex::new(Vec::new()),
        });
        let resolver = NameResolver::new(
            names.clone(),
            exchanges,
            exchange.clone(),
            clock.clone(),
        );
        Fixture {
            resolver,
            names,
            exchange,
            clock,
        }
    }

    #[tokio::test]
    async fn long_lived_result_is_cached_until_its_guaranty() {
        let guaranty = NOW + MIN_CACHE_VALIDITY_MS + 1;
        let f = fixture(guaranty, &["binance.eth"]).await;

        let record = f.resolver.resolve("alice.binance.eth", "60").await.unwrap();
        assert_eq!(record.validity_guaranty, NOW + RESPONSE_VALIDITY_MS);

        let puts = f.names.puts();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].0, format!("alice.binance.eth::{ETH}"));
        assert_eq!(puts[0].2, Some(guaranty));
        let stored: NameRecord = serde_json::from_str(&puts[0].1).unwrap();
        assert_eq!(stored.validity_guaranty, guaranty);
    }

    #[tokio::test]
    async fn short_lived_result_is_never_cached() {
        let f = fixture(NOW + MIN_CACHE_VALIDITY_MS, &["binance.eth"]).await;

        let record = f.resolver.resolve("alice.binance.eth", "60").await.unwrap();
        assert_eq!(record.validity_guaranty, NOW + RESPONSE_VALIDITY_MS);
        assert!(f.names.puts().is_empty());

        // Zero guaranty (exchange omitted it) is not cached either
        let f = fixture(0, &["binance.eth"]).await;
        assert!(f.resolver.resolve("alice.binance.eth", "60").await.is_some());
        assert!(f.names.puts().is_empty());
    }

    #[tokio::test]
    async fn cached_record_is_served_without_calling_the_exchange() {
        let guaranty = NOW + 3_600_000;
        let f = fixture(guaranty, &["binance.eth"]).await;

        f.resolver.resolve("alice.binance.eth", "60").await.unwrap();
        f.clock.advance(1_000);
        let cached = f.resolver.resolve("alice.binance.eth", "60").await.unwrap();

        assert_eq!(f.exchange.calls.lock().unwrap().len(), 1);
        assert_eq!(cached.validity_guaranty, guaranty);
    }

    #[tokio::test]
    async fn expired_or_foreign_cache_entries_are_misses() {
        let f = fixture(NOW + 3_600_000, &["binance.eth"]).await;
        let key = format!("alice.binance.eth::{ETH}");

        let foreign = NameRecord {
            id: "mallory.binance.eth".into(),
            network: ETH.into(),
            address: "0x01".into(),
            validity_guaranty: NOW + 3_600_000,
        };
        f.names
            .inner
            .put(&key, &serde_json::to_string(&foreign).unwrap(), None)
            .await
            .unwrap();
        f.resolver.resolve("alice.binance.eth", "60").await.unwrap();
        assert_eq!(f.exchange.calls.lock().unwrap().len(), 1);

        f.names.inner.put(&key, "{not json", None).await.unwrap();
        f.resolver.resolve("alice.binance.eth", "60").await.unwrap();
        assert_eq!(f.exchange.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn suffix_search_grows_from_two_labels() {
        let f = fixture(0, &["c.exchange.tld"]).await;

        f.resolver.resolve("a.b.c.exchange.tld", "60").await.unwrap();
        assert_eq!(
            f.exchange.calls.lock().unwrap()[0],
            ("a.b".to_string(), ETH.to_string())
        );

        let labels = ["a", "b", "c", "exchange", "tld"];
        assert_eq!(
            f.resolver.find_exchange(&labels).await,
            Some(ExchangeMatch {
                exchange_id: "binance".into(),
                user_id: "a.b".into(),
            })
        );
    }

    #[tokio::test]
    async fn shortest_mapped_suffix_wins() {
        let f = fixture(0, &["exchange.tld", "c.exchange.tld"]).await;
        let found = f
            .resolver
            .find_exchange(&["a", "c", "exchange", "tld"])
            .await
            .unwrap();
        assert_eq!(found.user_id, "a.c");
    }

    /// Fails reads of one key, delegates everything else.
    struct FailingStore {
        inner: MemoryKvStore,
        failing_key: String,
    }

    #[async_trait]
    impl KvStore for FailingStore {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            if key == self.failing_key {
                return Err(StoreError::Poisoned);
            }
            self.inner.get(key).await
        }

        async fn put(&self, key: &str, value: &str, expires_at_ms: Option<i64>) -> StoreResult<()> {
            self.inner.put(key, value, expires_at_ms).await
        }
    }

    #[tokio::test]
    async fn registry_read_failure_stops_the_suffix_search() {
        let exchanges = Arc::new(FailingStore {
            inner: MemoryKvStore::new(8),
            failing_key: exchange_id_key("exchange.tld"),
        });
        for (suffix, id) in [("exchange.tld", "real"), ("c.exchange.tld", "other")] {
            exchanges
                .inner
                .put(&exchange_id_key(suffix), id, None)
                .await
                .unwrap();
        }
        let exchange = Arc::new(StubExchange {
            validity_guaranty: 0,
            calls: Mutex::new(Vec::new()),
        });
        let resolver = NameResolver::new(
            Arc::new(MemoryKvStore::new(8)),
            exchanges,
            exchange.clone(),
            Arc::new(FixedClock::new(NOW)),
        );

        assert_eq!(resolver.find_exchange(&["a", "c", "exchange", "tld"]).await, None);
        assert!(resolver.resolve("a.c.exchange.tld", "60").await.is_none());
        assert!(exchange.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unmapped_and_single_label_names_are_unresolved() {
        let f = fixture(0, &["binance.eth"]).await;

        assert!(f.resolver.resolve("alice.kraken.eth", "60").await.is_none());
        assert!(f.resolver.resolve("eth", "60").await.is_none());
        assert!(f.resolver.resolve("alice.binance.eth", "999999999").await.is_none());
        assert!(f.resolver.resolve("al ice.binance.eth", "60").await.is_none());
        assert!(f.exchange.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn whole_name_match_yields_empty_user_id() {
        let f = fixture(0, &["binance.eth"]).await;
        assert!(f.resolver.resolve("binance.eth", "60").await.is_none());
        assert_eq!(f.exchange.calls.lock().unwrap()[0].0, "");
    }

    #[tokio::test]
    async fn missing_or_invalid_endpoint_is_unresolved() {
        let clock = Arc::new(FixedClock::new(NOW));
        let exchanges = Arc::new(MemoryKvStore::new(8));
        exchanges
            .put(&exchange_id_key("okx.eth"), "okx", None)
            .await
            .unwrap();
        let exchange = Arc::new(StubExchange {
            validity_guaranty: 0,
            calls: Mutex::new(Vec::new()),
        });
        let resolver = NameResolver::new(
            Arc::new(MemoryKvStore::new(8)),
            exchanges.clone(),
            exchange.clone(),
            clock,
        );

        assert!(resolver.resolve("alice.okx.eth", "60").await.is_none());

        exchanges
            .put(&endpoint_key("okx"), r#"{"url":"","encryptedSigningKey":"ab"}"#, None)
            .await
            .unwrap();
        assert!(resolver.resolve("alice.okx.eth", "60").await.is_none());
        assert!(exchange.calls.lock().unwrap().is_empty());
    }
}
