// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`GatewayConfig`] value that is built once at startup and handed to every
//! component. Nothing reads the environment after `from_env()` returns.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `BASE_PATH` | URL prefix served by the gateway | `/` |
//! | `RESPONSE_SIGNING_KEY` | secp256k1 key signing CCIP-Read responses (hex or PEM) | Required |
//! | `CEXDATA_ENCRYPTION_KEY` | 88 hex chars: 12-byte IV followed by a 32-byte AES key | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `STORE_BACKEND` | `memory` or `redb` | `memory` |
//! | `DATA_DIR` | Directory holding the redb database | `./data` |
//! | `MEMORY_STORE_CAPACITY` | Max entries in the in-memory name cache | `10000` |
//! | `EXCHANGE_TIMEOUT_SECS` | Outbound exchange request timeout | `10` |
//! | `SEED_EXCHANGE_FILE` | JSON file with exchanges to provision at startup | Optional |
//! | `TLS_CERT_PATH` | PEM certificate chain, enables HTTPS with `TLS_KEY_PATH` | Optional |
//! | `TLS_KEY_PATH` | PEM private key for HTTPS | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use crate::crypto::validate_key_bundle;

pub const BASE_PATH_ENV: &str = "BASE_PATH";
pub const RESPONSE_SIGNING_KEY_ENV: &str = "RESPONSE_SIGNING_KEY";
pub const CEXDATA_ENCRYPTION_KEY_ENV: &str = "CEXDATA_ENCRYPTION_KEY";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const STORE_BACKEND_ENV: &str = "STORE_BACKEND";

/// Environment variable name for the redb data directory.
///
/// Only read when `STORE_BACKEND=redb`.
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const MEMORY_STORE_CAPACITY_ENV: &str = "MEMORY_STORE_CAPACITY";
pub const EXCHANGE_TIMEOUT_ENV: &str = "EXCHANGE_TIMEOUT_SECS";
pub const SEED_EXCHANGE_FILE_ENV: &str = "SEED_EXCHANGE_FILE";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_BASE_PATH: &str = "/";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_MEMORY_STORE_CAPACITY: usize = 10_000;
pub const DEFAULT_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Which [`KvStore`](crate::storage::KvStore) implementation backs the
/// name cache and the exchange registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// `capacity` bounds the name cache only.
    Memory { capacity: usize },
    Redb { data_dir: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Fully resolved gateway configuration.
#[derive(Clone)]
pub struct GatewayConfig {
    pub base_path: String,
    pub response_signing_key: String,
    pub cexdata_encryption_key: String,
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub exchange_timeout: Duration,
    pub seed_exchange_file: Option<PathBuf>,
    pub tls: Option<TlsPaths>,
}

// Secrets stay out of logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_path", &self.base_path)
            .field("bind_addr", &self.bind_addr)
            .field("store", &self.store)
            .field("exchange_timeout", &self.exchange_timeout)
            .field("seed_exchange_file", &self.seed_exchange_file)
            .field("tls", &self.tls)
            .finish_non_exhaustive()
    }
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_path = normalize_base_path(
            &get(BASE_PATH_ENV).unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
        );
        let response_signing_key =
            get(RESPONSE_SIGNING_KEY_ENV).ok_or(ConfigError::Missing(RESPONSE_SIGNING_KEY_ENV))?;
        let cexdata_encryption_key = get(CEXDATA_ENCRYPTION_KEY_ENV)
            .ok_or(ConfigError::Missing(CEXDATA_ENCRYPTION_KEY_ENV))?;
        validate_key_bundle(&cexdata_encryption_key).map_err(|e| ConfigError::Invalid {
            name: CEXDATA_ENCRYPTION_KEY_ENV,
            reason: e.to_string(),
        })?;

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let store = match get(STORE_BACKEND_ENV).as_deref().unwrap_or("memory") {
            "memory" => {
                let capacity = match get(MEMORY_STORE_CAPACITY_ENV) {
                    Some(raw) => raw.parse::<usize>().map_err(|e| ConfigError::Invalid {
                        name: MEMORY_STORE_CAPACITY_ENV,
                        reason: e.to_string(),
                    })?,
                    None => DEFAULT_MEMORY_STORE_CAPACITY,
                };
                StoreBackend::Memory { capacity }
            }
            "redb" => StoreBackend::Redb {
                data_dir: PathBuf::from(
                    get(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
                ),
            },
            other => {
                return Err(ConfigError::Invalid {
                    name: STORE_BACKEND_ENV,
                    reason: format!("unknown backend '{other}' (expected 'memory' or 'redb')"),
                })
            }
        };

        let exchange_timeout = match get(EXCHANGE_TIMEOUT_ENV) {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                ConfigError::Invalid {
                    name: EXCHANGE_TIMEOUT_ENV,
                    reason: e.to_string(),
                }
            })?),
            None => DEFAULT_EXCHANGE_TIMEOUT,
        };

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(TLS_KEY_PATH_ENV)),
            (None, Some(_)) => return Err(ConfigError::Missing(TLS_CERT_PATH_ENV)),
        };

        Ok(Self {
            base_path,
            response_signing_key,
            cexdata_encryption_key,
            bind_addr,
            store,
            exchange_timeout,
            seed_exchange_file: get(SEED_EXCHANGE_FILE_ENV).map(PathBuf::from),
            tls,
        })
    }
}

/// Base paths are compared against request paths verbatim, so give them one
/// canonical shape: a leading slash and no trailing slash (except for `/`).
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Initialise the global tracing subscriber.
///
/// `LOG_FORMAT=json` emits JSON lines; anything else uses the human-readable
/// formatter. The filter comes from `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
