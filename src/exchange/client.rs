// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP client for the exchange name endpoint.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use rand::{distributions::Alphanumeric, Rng};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::{ExchangeApi, ExchangeError};
use crate::{
    clock::{Clock, SystemClock},
    crypto::{decrypt_data, hmac_sha256_hex, verify_hmac_hex},
    models::{ExchangeEndpoint, ExchangeNameDefinition, NameRecord},
    networks::{normalize_id_and_network, NormalizedId},
};

pub const TIMESTAMP_HEADER: &str = "CXID-TIMESTAMP";
pub const NONCE_HEADER: &str = "CXID-NONCE";
pub const SIGNATURE_HEADER: &str = "CXID-SIGNATURE";

const NONCE_LEN: usize = 32;

/// A ready-to-send exchange lookup.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub url: Url,
    pub timestamp: i64,
    pub nonce: String,
    /// Lowercase hex HMAC-SHA256 of `timestamp:nonce:query`.
    pub signature: String,
}

/// 32 random characters from `[A-Za-z0-9]`.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// Append `id` and `network` to the endpoint URL and sign the final query.
pub fn build_signed_request(
    endpoint_url: &str,
    identity: &NormalizedId,
    signing_key: &[u8],
    timestamp: i64,
    nonce: String,
) -> Result<SignedRequest, ExchangeError> {
    let mut url =
        Url::parse(endpoint_url).map_err(|e| ExchangeError::InvalidEndpointUrl(e.to_string()))?;
    url.query_pairs_mut()
        .append_pair("id", &identity.id)
        .append_pair("network", &identity.network);

    let query = url.query().unwrap_or_default();
    let signature = hmac_sha256_hex(signing_key, format!("{timestamp}:{nonce}:{query}").as_bytes())
        .map_err(ExchangeError::Signing)?;

    Ok(SignedRequest {
        url,
        timestamp,
        nonce,
        signature,
    })
}

/// Accept `body` only if `signature_header` is its HMAC under `signing_key`.
pub fn validate_response<'a>(
    body: &'a str,
    signature_header: Option<&str>,
    signing_key: &[u8],
) -> Result<&'a str, ExchangeError> {
    match signature_header {
        Some(signature) if verify_hmac_hex(signing_key, body.as_bytes(), signature) => Ok(body),
        _ => Err(ExchangeError::SignatureMismatch),
    }
}

/// Parse an authenticated body and check it answers the question we asked.
pub fn parse_name_definition(
    body: &str,
    requested: &NormalizedId,
) -> Result<NameRecord, ExchangeError> {
    let definition: ExchangeNameDefinition =
        serde_json::from_str(body).map_err(|e| ExchangeError::InvalidResponse(e.to_string()))?;

    let network = definition.network.as_ref().map(ToString::to_string);
    let returned = normalize_id_and_network(definition.id.as_deref(), network.as_deref())
        .ok_or_else(|| {
            ExchangeError::InvalidResponse(format!(
                "unrecognised id {:?} or network {:?}",
                definition.id, network
            ))
        })?;

    if &returned != requested {
        return Err(ExchangeError::IdentityMismatch {
            expected: format!("{}@{}", requested.id, requested.network),
            got: format!("{}@{}", returned.id, returned.network),
        });
    }

    let address = definition
        .address
        .filter(|a| !a.trim().is_empty())
        .ok_or(ExchangeError::MissingAddress)?;

    Ok(NameRecord {
        id: returned.id,
        network: returned.network,
        address,
        validity_guaranty: definition.validity_guaranty.unwrap_or(0),
    })
}

/// Signed-request client shared by all exchanges.
///
/// Each exchange has its own HMAC key, stored encrypted in the registry and
/// decrypted per request with the gateway's data encryption key.
#[derive(Clone)]
pub struct ExchangeClient {
    http: Client,
    encryption_key: String,
    clock: Arc<dyn Clock>,
}

impl ExchangeClient {
    pub fn new(encryption_key: impl Into<String>, timeout: Duration) -> Result<Self, ExchangeError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_parts(http, encryption_key, Arc::new(SystemClock)))
    }

    pub fn with_parts(http: Client, encryption_key: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            http,
            encryption_key: encryption_key.into(),
            clock,
        }
    }

    fn signing_key(&self, endpoint: &ExchangeEndpoint) -> Result<Vec<u8>, ExchangeError> {
        Url::parse(&endpoint.url).map_err(|e| ExchangeError::InvalidEndpointUrl(e.to_string()))?;
        decrypt_data(&self.encryption_key, &endpoint.encrypted_signing_key)
            .map_err(ExchangeError::Decryption)
    }
}

#[async_trait]
impl ExchangeApi for ExchangeClient {
    async fn fetch_account(
        &self,
        user_id: &str,
        network: &str,
        endpoint: &ExchangeEndpoint,
    ) -> Result<NameRecord, ExchangeError> {
        info!(user_id = %user_id, "Attempting to resolve name from the exchange");

        let requested = normalize_id_and_network(Some(user_id), Some(network)).ok_or_else(|| {
            ExchangeError::InvalidIdentity {
                id: user_id.to_string(),
                network: network.to_string(),
            }
        })?;

        let signing_key = self.signing_key(endpoint)?;
        let request = build_signed_request(
            &endpoint.url,
            &requested,
            &signing_key,
            self.clock.now_ms(),
            generate_nonce(),
        )?;

        debug!(url = %request.url, "Sending signed exchange request");

        let response = self
            .http
            .get(request.url)
            .header(TIMESTAMP_HEADER, request.timestamp.to_string())
            .header(NONCE_HEADER, request.nonce)
            .header(SIGNATURE_HEADER, request.signature)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::Status(status.as_u16()));
        }

        let signature_header = response
            .headers()
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        let body = validate_response(&body, signature_header.as_deref(), &signing_key)?;
        parse_name_definition(body, &requested)
    }
}
