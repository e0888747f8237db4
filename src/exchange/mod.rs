// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Exchange integration.
//!
//! Exchanges (or a CXID middleware in front of them) expose a single signed
//! lookup endpoint. Requests are authenticated with an HMAC over
//! `timestamp:nonce:query`; responses carry an HMAC of the body that must
//! verify before the body is looked at.

use async_trait::async_trait;

use crate::{crypto::CryptoError, models::ExchangeEndpoint, models::NameRecord};

pub mod client;

pub use client::{
    build_signed_request, generate_nonce, parse_name_definition, validate_response,
    ExchangeClient, SignedRequest, NONCE_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};

#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("invalid id {id:?} or network {network:?}")]
    InvalidIdentity { id: String, network: String },

    #[error("endpoint URL is invalid: {0}")]
    InvalidEndpointUrl(String),

    #[error("failed to decrypt exchange HMAC key: {0}")]
    Decryption(#[source] CryptoError),

    #[error("failed to sign exchange request: {0}")]
    Signing(#[source] CryptoError),

    #[error("exchange request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("exchange returned HTTP {0}")]
    Status(u16),

    #[error("invalid signature from exchange; key might be invalid or exchange might be compromised")]
    SignatureMismatch,

    #[error("exchange response was invalid: {0}")]
    InvalidResponse(String),

    #[error("id or network from the exchange do not match: expected {expected}, got {got}")]
    IdentityMismatch { expected: String, got: String },

    #[error("address not resolved from the exchange")]
    MissingAddress,
}

impl ExchangeError {
    /// Misconfiguration that needs an operator, not a retry.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ExchangeError::InvalidEndpointUrl(_)
                | ExchangeError::Decryption(_)
                | ExchangeError::Signing(_)
        )
    }

    /// The exchange answered with something we must not trust.
    pub fn is_security(&self) -> bool {
        matches!(
            self,
            ExchangeError::SignatureMismatch | ExchangeError::IdentityMismatch { .. }
        )
    }
}

/// Source of live account data for a user on one exchange.
#[async_trait]
pub trait ExchangeApi: Send + Sync {
    async fn fetch_account(
        &self,
        user_id: &str,
        network: &str,
        endpoint: &ExchangeEndpoint,
    ) -> Result<NameRecord, ExchangeError>;
}
