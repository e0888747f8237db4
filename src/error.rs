// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::response::{IntoResponse, Response};

use crate::api::refer_response;

/// Every way a CCIP-Read request can fail once it reaches the handler.
///
/// The variants carry full detail for server-side logs only. Over HTTP they
/// all collapse into the same generic 404 so the caller learns nothing about
/// why a lookup failed.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("invalid DNS-encoded name: {0}")]
    InvalidDnsName(String),

    #[error("ABI decoding failed: {0}")]
    Abi(#[from] alloy::sol_types::Error),

    #[error("unsupported function received: {0}")]
    UnsupportedFunction(String),

    #[error("unsupported query function {0}")]
    UnsupportedQuery(String),

    #[error("name must be normalised: {0}")]
    NameNotNormalized(String),

    #[error("name {name} does not match namehash {node}")]
    NodeMismatch { name: String, node: String },

    #[error("failed to resolve name {0}")]
    NoDataFound(String),

    #[error("resolved address cannot be encoded: {0}")]
    InvalidResultAddress(String),

    #[error("response signing failed: {0}")]
    Signing(String),
}

impl GatewayError {
    /// Short machine-readable tag used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MalformedRequest(_)
            | GatewayError::InvalidDnsName(_)
            | GatewayError::Abi(_) => "malformed_request",
            GatewayError::UnsupportedFunction(_) | GatewayError::UnsupportedQuery(_) => {
                "unsupported"
            }
            GatewayError::NameNotNormalized(_) | GatewayError::NodeMismatch { .. } => {
                "identity_mismatch"
            }
            GatewayError::NoDataFound(_) | GatewayError::InvalidResultAddress(_) => "unresolved",
            GatewayError::Signing(_) => "security",
        }
    }

    /// Failures worth an error-level log line rather than a warning.
    pub fn is_security(&self) -> bool {
        matches!(self, GatewayError::Signing(_))
    }
}

/// Failures that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("invalid response signing key: {0}")]
    SigningKey(#[source] GatewayError),

    #[error("failed to build exchange client: {0}")]
    Exchange(#[from] crate::exchange::ExchangeError),

    #[error("failed to open store: {0}")]
    Store(#[from] crate::storage::StoreError),

    #[error("failed to load TLS configuration: {0}")]
    Tls(#[source] std::io::Error),

    #[error("server error: {0}")]
    Server(#[source] std::io::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        refer_response(axum::http::StatusCode::NOT_FOUND)
    }
}
