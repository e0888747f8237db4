// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Duration;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

pub mod gateway;

/// Body of the landing page and of every failed lookup.
pub const REFER_TEXT: &str =
    "CXID: Bringing ENS to cryptocurrency exchanges. Check out https://cxid.io for more information";

pub fn refer_response(status: StatusCode) -> Response {
    (status, REFER_TEXT).into_response()
}

/// Any origin may call the gateway; preflights are answered by the layer.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .max_age(Duration::from_secs(86_400))
}

pub fn router(state: AppState) -> Router {
    // CCIP-Read URLs are templated by the resolver contract, so there is no
    // fixed route table: everything goes through the dispatcher.
    Router::new()
        .fallback(gateway::dispatch)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ccip::{abi::IResolver, abi::IResolverService, encode_dns_name, CcipHandler, ResponseSigner},
        clock::FixedClock,
        exchange::{ExchangeApi, ExchangeError},
        models::{CcipResponseBody, ExchangeEndpoint, NameRecord},
        networks::namehash,
        resolver::NameResolver,
        storage::{seed_exchange, ExchangeSeed, MemoryKvStore},
    };
    use alloy::{
        primitives::{address, Address, Bytes},
        sol_types::{SolCall, SolValue},
    };
    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const RESOLVER: &str = "0xc1735677a60884abbcf72295e88d47764beda282";
    const ACCOUNT: Address = address!("8ba1f109551bd432803012645ac136ddd64dba72");

    struct FixedExchange;

    #[async_trait]
    impl ExchangeApi for FixedExchange {
        async fn fetch_account(
            &self,
            user_id: &str,
            network: &str,
            _endpoint: &ExchangeEndpoint,
        ) -> Result<NameRecord, ExchangeError> {
            Ok(NameRecord {
                id: user_id.into(),
                network: network.into(),
                address: ACCOUNT.to_string(),
                validity_guaranty: 0,
            })
        }
    }

    async fn app(base_path: &str) -> Router {
        let clock = Arc::new(FixedClock::new(1_700_000_000_000));
        let exchanges = Arc::new(MemoryKvStore::new(8));
        seed_exchange(
            exchanges.as_ref(),
            &ExchangeSeed {
                exchange_id: "test".into(),
                suffixes: vec!["test.eth".into()],
                endpoint: ExchangeEndpoint {
                    url: "https://exchange.test".into(),
                    encrypted_signing_key: "00".into(),
                },
            },
        )
        .await
        .unwrap();
        let resolver = NameResolver::new(
            Arc::new(MemoryKvStore::new(8)),
            exchanges,
            Arc::new(FixedExchange),
            clock,
        );
        let handler = CcipHandler::new(
            Arc::new(resolver),
            ResponseSigner::from_key_material(KEY).unwrap(),
        );
        router(AppState::new(handler, base_path))
    }

    fn calldata(name: &str) -> String {
        let call = IResolverService::resolveCall {
            name: encode_dns_name(name).unwrap().into(),
            data: IResolver::addr_0Call {
                node: namehash(name),
            }
            .abi_encode()
            .into(),
        };
        Bytes::from(call.abi_encode()).to_string()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn options_returns_cors_headers() {
        let response = app("/")
            .await
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET,POST,OPTIONS");
        assert_eq!(headers["access-control-max-age"], "86400");
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn browser_preflight_is_answered_without_lookup() {
        let response = app("/")
            .await
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri(format!("/{RESOLVER}/{}.json", calldata("test.eth")))
                    .header("origin", "https://app.example")
                    .header("access-control-request-method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn lookups_carry_the_allow_origin_header() {
        let uri = format!("/{RESOLVER}/{}.json", calldata("test.eth"));
        let response = app("/")
            .await
            .oneshot(
                Request::get(uri)
                    .header("origin", "https://app.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn base_path_serves_landing_text() {
        let response = app("/gateway")
            .await
            .oneshot(Request::get("/gateway").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(body_string(response).await, REFER_TEXT);
    }

    #[tokio::test]
    async fn get_resolves_test_eth() {
        let uri = format!("/{RESOLVER}/{}.json", calldata("test.eth"));
        let response = app("/")
            .await
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        let body: CcipResponseBody = serde_json::from_str(&body_string(response).await).unwrap();
        let raw: Bytes = body.data.parse().unwrap();
        let (result, _, sig) = <(Bytes, u64, Bytes)>::abi_decode_params(&raw).unwrap();
        assert_eq!(Address::abi_decode(&result).unwrap(), ACCOUNT);
        assert_eq!(sig.len(), 65);
    }

    #[tokio::test]
    async fn post_reads_calldata_from_body() {
        let body = serde_json::json!({ "data": calldata("alice.test.eth") }).to_string();
        let response = app("/")
            .await
            .oneshot(
                Request::post(format!("/{RESOLVER}.json"))
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn failures_are_indistinguishable() {
        let unresolved = format!("/{RESOLVER}/{}.json", calldata("alice.unknown.eth"));
        let bad_selector = format!("/{RESOLVER}/0xdeadbeef.json");
        let app = app("/").await;

        for uri in [
            "/nothing-here".to_string(),
            format!("/{RESOLVER}.json"),
            "/0x1234/0x00.json".to_string(),
            bad_selector,
            unresolved,
        ] {
            let response = app
                .clone()
                .oneshot(Request::get(uri.as_str()).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body_string(response).await, REFER_TEXT, "{uri}");
        }
    }
}
