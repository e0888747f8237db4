// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! CCIP-Read HTTP endpoint.
//!
//! `GET {base}/{sender}/{calldata}.json` or `POST {base}/{sender}.json` with
//! `{"data": "0x..."}`. Every path reaches this handler (CORS preflights stop
//! at the router's CORS layer); anything that is not a well-formed CCIP-Read
//! request gets the generic 404.

use alloy::primitives::Address;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};

use super::refer_response;
use crate::{
    crypto::{hex_to_bytes, serialization::is_prefixed_hex_bytes},
    models::{CcipRequestBody, CcipResponseBody},
    state::AppState,
};

/// A parsed CCIP-Read request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CcipParams {
    pub sender: Address,
    pub calldata: Vec<u8>,
}

pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path();
    if path == &*state.base_path {
        return refer_response(StatusCode::OK);
    }

    let Some(params) = parse_params(&state.base_path, &method, path, &body) else {
        debug!(method = %method, path = %path, "Rejected malformed CCIP-Read request");
        return refer_response(StatusCode::NOT_FOUND);
    };

    match state.handler.handle(params.sender, &params.calldata).await {
        Ok(data) => Json(CcipResponseBody {
            data: data.to_string(),
        })
        .into_response(),
        Err(e) => {
            if e.is_security() {
                error!(sender = %params.sender, kind = e.kind(), error = %e, "CCIP-Read request failed");
            } else {
                warn!(sender = %params.sender, kind = e.kind(), error = %e, "CCIP-Read request failed");
            }
            e.into_response()
        }
    }
}

/// Extract `(sender, calldata)` from the path and, for POST, the JSON body.
pub fn parse_params(base_path: &str, method: &Method, path: &str, body: &[u8]) -> Option<CcipParams> {
    if method != Method::GET && method != Method::POST {
        return None;
    }
    if !path.ends_with(".json") {
        return None;
    }

    let rest = path.strip_prefix(base_path)?;
    let rest = if base_path == "/" {
        rest
    } else {
        rest.strip_prefix('/')?
    };

    let segments: Vec<&str> = rest.split('/').collect();
    if segments.len() > 2 {
        return None;
    }

    // An unparsable body is treated as absent.
    let body_data = if method == Method::POST {
        serde_json::from_slice::<CcipRequestBody>(body)
            .ok()
            .and_then(|b| b.data)
    } else {
        None
    };

    let sender = segments[0];
    let calldata = segments
        .get(1)
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
        .or(body_data)
        .filter(|s| !s.is_empty())?;
    if sender.is_empty() {
        return None;
    }

    let sender = parse_sender(sender.strip_suffix(".json").unwrap_or(sender))?;
    let calldata = calldata.strip_suffix(".json").unwrap_or(&calldata);
    if !is_prefixed_hex_bytes(calldata) {
        return None;
    }
    let calldata = hex_to_bytes(calldata).ok()?;

    Some(CcipParams { sender, calldata })
}

/// `0x` + 40 hex digits. Mixed case must be a valid EIP-55 checksum.
pub fn parse_sender(raw: &str) -> Option<Address> {
    let digits = raw.strip_prefix("0x")?;
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(raw, None).ok()
    } else {
        raw.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const SENDER: Address = address!("c1735677a60884abbcf72295e88d47764beda282");

    fn lower() -> String {
        format!("0x{}", alloy::hex::encode(SENDER))
    }

    #[test]
    fn get_with_sender_and_calldata() {
        let path = format!("/{}/0x9061b923.json", lower());
        let params = parse_params("/", &Method::GET, &path, b"").unwrap();
        assert_eq!(params.sender, SENDER);
        assert_eq!(params.calldata, vec![0x90, 0x61, 0xb9, 0x23]);
    }

    #[test]
    fn post_reads_calldata_from_body() {
        let path = format!("/{}.json", lower());
        let params = parse_params("/", &Method::POST, &path, br#"{"data":"0xabcd"}"#).unwrap();
        assert_eq!(params.calldata, vec![0xab, 0xcd]);

        assert!(parse_params("/", &Method::POST, &path, b"not json").is_none());
        assert!(parse_params("/", &Method::GET, &path, br#"{"data":"0xabcd"}"#).is_none());
    }

    #[test]
    fn base_path_prefix_is_respected() {
        let path = format!("/gateway/{}/0x00.json", lower());
        assert!(parse_params("/gateway", &Method::GET, &path, b"").is_some());
        assert!(parse_params("/other", &Method::GET, &path, b"").is_none());

        let glued = format!("/gatewayx/{}/0x00.json", lower());
        assert!(parse_params("/gateway", &Method::GET, &glued, b"").is_none());
    }

    #[test]
    fn malformed_requests_are_rejected() {
        let sender = lower();
        for (method, path) in [
            (Method::PUT, format!("/{sender}/0x00.json")),
            (Method::GET, format!("/{sender}/0x00")),
            (Method::GET, format!("/{sender}/0x00/extra.json")),
            (Method::GET, format!("/{sender}.json")),
            (Method::GET, "/0x1234/0x00.json".to_string()),
            (Method::GET, format!("/{sender}/0x0.json")),
            (Method::GET, format!("/{sender}/abcd.json")),
            (Method::GET, "//0x00.json".to_string()),
        ] {
            assert!(parse_params("/", &method, &path, b"").is_none(), "{method} {path}");
        }
    }

    #[test]
    fn sender_checksum_rules() {
        let checksummed = SENDER.to_checksum(None);
        assert_eq!(parse_sender(&checksummed), Some(SENDER));
        assert_eq!(parse_sender(&lower()), Some(SENDER));
        assert_eq!(
            parse_sender(&format!("0x{}", lower()[2..].to_uppercase())),
            Some(SENDER)
        );

        // Flip one letter of the majority case so the result stays mixed-case
        let mut broken: Vec<char> = checksummed.chars().collect();
        let upper = broken[2..].iter().filter(|c| c.is_ascii_uppercase()).count();
        let lower_count = broken[2..].iter().filter(|c| c.is_ascii_lowercase()).count();
        let flip_upper = upper >= lower_count;
        let idx = (2..broken.len())
            .find(|&i| {
                if flip_upper {
                    broken[i].is_ascii_uppercase()
                } else {
                    broken[i].is_ascii_lowercase()
                }
            })
            .unwrap();
        broken[idx] = if flip_upper {
            broken[idx].to_ascii_lowercase()
        } else {
            broken[idx].to_ascii_uppercase()
        };
        let broken: String = broken.into_iter().collect();
        assert_eq!(parse_sender(&broken), None);
    }
}
