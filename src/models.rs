// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Data Models
//!
//! Records exchanged with the key-value stores, the exchange API and HTTP
//! callers. Field names are camelCase on the wire because the stores and the
//! exchange integration contract already use that format.
//!
//! - **Stores**: [`NameRecord`] (name cache), [`ExchangeEndpoint`] (registry)
//! - **Exchange API**: [`ExchangeNameDefinition`]
//! - **HTTP**: [`CcipRequestBody`], [`CcipResponseBody`]

use serde::{Deserialize, Serialize};

// =============================================================================
// Store Records
// =============================================================================

/// A resolved name on one network.
///
/// Only trustworthy while `validity_guaranty` (epoch milliseconds) is in the
/// future.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NameRecord {
    /// Normalized full name, e.g. `alice.binance.cxid.eth`.
    pub id: String,
    /// Hardened coin type as a decimal string, e.g. `2147483708` for ETH.
    pub network: String,
    /// Account address on that network.
    pub address: String,
    /// Absolute expiry in epoch milliseconds.
    pub validity_guaranty: i64,
}

/// Connection details for one exchange, provisioned out-of-band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeEndpoint {
    /// Base URL of the exchange (or CXID middleware) name endpoint.
    pub url: String,
    /// Hex AES-256-GCM ciphertext of the HMAC signing key.
    pub encrypted_signing_key: String,
}

impl ExchangeEndpoint {
    /// Both fields must be present and non-empty.
    pub fn is_well_formed(&self) -> bool {
        !self.url.trim().is_empty() && !self.encrypted_signing_key.trim().is_empty()
    }
}

// =============================================================================
// Exchange API
// =============================================================================

/// Network identifiers arrive either as JSON numbers or as strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum NetworkValue {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for NetworkValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkValue::Number(n) => write!(f, "{n}"),
            NetworkValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Body returned by an exchange. Every field is optional so that a partial
/// answer can be rejected with a precise log line instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeNameDefinition {
    pub id: Option<String>,
    pub network: Option<NetworkValue>,
    pub address: Option<String>,
    pub validity_guaranty: Option<i64>,
}

// =============================================================================
// HTTP
// =============================================================================

/// POST body carrying CCIP-Read call data.
#[derive(Debug, Clone, Deserialize)]
pub struct CcipRequestBody {
    pub data: Option<String>,
}

/// Successful gateway response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CcipResponseBody {
    pub data: String,
}
