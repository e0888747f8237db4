// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! `resolve(bytes,bytes)` handling: decode, resolve, sign, encode.

use std::sync::Arc;

use alloy::{
    primitives::{Address, Bytes},
    sol_types::{SolCall, SolValue},
};
use tracing::{debug, info};

use super::{abi::IResolverService, decode_dns_name, ResolverQuery, ResponseSigner};
use crate::{
    error::GatewayError,
    networks::{is_normalized, namehash},
    resolver::NameResolver,
};

pub struct CcipHandler {
    resolver: Arc<NameResolver>,
    signer: ResponseSigner,
}

impl CcipHandler {
    pub fn new(resolver: Arc<NameResolver>, signer: ResponseSigner) -> Self {
        Self { resolver, signer }
    }

    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    /// Answer one CCIP-Read call addressed to the resolver contract `to`.
    ///
    /// Returns the ABI-encoded `(bytes result, uint64 expires, bytes sig)`.
    pub async fn handle(&self, to: Address, data: &[u8]) -> Result<Bytes, GatewayError> {
        let selector = data
            .get(..4)
            .ok_or_else(|| GatewayError::MalformedRequest("calldata shorter than a selector".into()))?;
        if selector != IResolverService::resolveCall::SELECTOR {
            return Err(GatewayError::UnsupportedFunction(format!(
                "0x{}",
                alloy::hex::encode(selector)
            )));
        }

        let call = IResolverService::resolveCall::abi_decode(data)?;
        let name = decode_dns_name(&call.name)?;

        let (result, expires) = self.query(&name, &call.data).await?;
        let signature = self.signer.sign(to, expires, data, &result)?;

        let encoded = (Bytes::from(result), expires, Bytes::from(signature.to_vec()))
            .abi_encode_params();
        Ok(Bytes::from(encoded))
    }

    /// Resolve the inner record query; returns the encoded record and its
    /// expiry in epoch seconds.
    async fn query(&self, name: &str, data: &[u8]) -> Result<(Vec<u8>, u64), GatewayError> {
        let query = ResolverQuery::decode(data)?;

        if !is_normalized(name) {
            return Err(GatewayError::NameNotNormalized(name.to_string()));
        }
        if namehash(name) != query.node() {
            return Err(GatewayError::NodeMismatch {
                name: name.to_string(),
                node: query.node().to_string(),
            });
        }

        debug!(name = %name, function = query.signature(), "Dispatching resolver query");

        let Some(network) = query.network() else {
            return Err(GatewayError::NoDataFound(name.to_string()));
        };
        let record = self
            .resolver
            .resolve(name, &network)
            .await
            .ok_or_else(|| GatewayError::NoDataFound(name.to_string()))?;

        let result = query.encode_result(&record)?;
        let expires = u64::try_from(record.validity_guaranty / 1000).unwrap_or(0);
        info!(name = %name, address = %record.address, expires, "Resolved name");

        Ok((result, expires))
    }
}
