// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Record queries carried inside `resolve(bytes,bytes)`.

use alloy::{
    primitives::{Address, Bytes, B256, U256},
    sol_types::{SolCall, SolValue},
};

use super::abi::IResolver;
use crate::{
    crypto::{hex_to_bytes, serialization::is_prefixed_hex_bytes},
    error::GatewayError,
    models::NameRecord,
    networks::DEFAULT_COIN_TYPE,
};

/// A decoded resolver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverQuery {
    /// `addr(bytes32)`: the ETH address.
    Addr { node: B256 },
    /// `addr(bytes32,uint256)`: the address on a SLIP-44 coin type.
    AddrMultichain { node: B256, coin_type: U256 },
    /// `text(bytes32,string)`: recognised, never answered.
    Text { node: B256, key: String },
    /// `contenthash(bytes32)`: recognised, never answered.
    Contenthash { node: B256 },
}

impl ResolverQuery {
    pub fn decode(data: &[u8]) -> Result<Self, GatewayError> {
        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| GatewayError::MalformedRequest("query shorter than a selector".into()))?;

        let query = if selector == IResolver::addr_0Call::SELECTOR {
            let call = IResolver::addr_0Call::abi_decode(data)?;
            ResolverQuery::Addr { node: call.node }
        } else if selector == IResolver::addr_1Call::SELECTOR {
            let call = IResolver::addr_1Call::abi_decode(data)?;
            ResolverQuery::AddrMultichain {
                node: call.node,
                coin_type: call.coinType,
            }
        } else if selector == IResolver::textCall::SELECTOR {
            let call = IResolver::textCall::abi_decode(data)?;
            ResolverQuery::Text {
                node: call.node,
                key: call.key,
            }
        } else if selector == IResolver::contenthashCall::SELECTOR {
            let call = IResolver::contenthashCall::abi_decode(data)?;
            ResolverQuery::Contenthash { node: call.node }
        } else {
            return Err(GatewayError::UnsupportedQuery(format!(
                "0x{}",
                alloy::hex::encode(selector)
            )));
        };
        Ok(query)
    }

    pub fn node(&self) -> B256 {
        match self {
            ResolverQuery::Addr { node }
            | ResolverQuery::AddrMultichain { node, .. }
            | ResolverQuery::Text { node, .. }
            | ResolverQuery::Contenthash { node } => *node,
        }
    }

    pub fn signature(&self) -> &'static str {
        match self {
            ResolverQuery::Addr { .. } => IResolver::addr_0Call::SIGNATURE,
            ResolverQuery::AddrMultichain { .. } => IResolver::addr_1Call::SIGNATURE,
            ResolverQuery::Text { .. } => IResolver::textCall::SIGNATURE,
            ResolverQuery::Contenthash { .. } => IResolver::contenthashCall::SIGNATURE,
        }
    }

    /// Network to resolve the name on, or `None` for record types that are
    /// never answered.
    pub fn network(&self) -> Option<String> {
        match self {
            ResolverQuery::Addr { .. } => Some(DEFAULT_COIN_TYPE.to_string()),
            ResolverQuery::AddrMultichain { coin_type, .. } => Some(coin_type.to_string()),
            ResolverQuery::Text { .. } | ResolverQuery::Contenthash { .. } => None,
        }
    }

    /// ABI-encode `record` as this function's return value.
    pub fn encode_result(&self, record: &NameRecord) -> Result<Vec<u8>, GatewayError> {
        match self {
            ResolverQuery::Addr { .. } => {
                let address: Address = record
                    .address
                    .parse()
                    .map_err(|_| GatewayError::InvalidResultAddress(record.address.clone()))?;
                Ok(address.abi_encode())
            }
            ResolverQuery::AddrMultichain { .. } => {
                if !is_prefixed_hex_bytes(&record.address) {
                    return Err(GatewayError::InvalidResultAddress(record.address.clone()));
                }
                let raw = hex_to_bytes(&record.address)
                    .map_err(|_| GatewayError::InvalidResultAddress(record.address.clone()))?;
                Ok(Bytes::from(raw).abi_encode())
            }
            ResolverQuery::Text { .. } | ResolverQuery::Contenthash { .. } => {
                Err(GatewayError::NoDataFound(record.id.clone()))
            }
        }
    }
}
