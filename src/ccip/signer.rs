// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Response signing for the offchain resolver contract.
//!
//! The contract accepts a response when its signature recovers to a
//! configured signer address over
//!
//! ```text
//! keccak256(0x1900 || resolver || expires (uint64 BE) || keccak256(request) || keccak256(result))
//! ```
//!
//! The signing key is loaded once at startup, either as raw hex or as a PEM
//! document (PKCS#8 or SEC1).

use alloy::{
    primitives::{keccak256, Address, B256},
    signers::{local::PrivateKeySigner, SignerSync},
};
use k256::SecretKey;

use crate::error::GatewayError;

const DIGEST_PREFIX: [u8; 2] = [0x19, 0x00];

/// Digest the resolver contract verifies the response signature against.
pub fn response_digest(to: Address, expires: u64, request: &[u8], result: &[u8]) -> B256 {
    let mut preimage = Vec::with_capacity(2 + 20 + 8 + 32 + 32);
    preimage.extend_from_slice(&DIGEST_PREFIX);
    preimage.extend_from_slice(to.as_slice());
    preimage.extend_from_slice(&expires.to_be_bytes());
    preimage.extend_from_slice(keccak256(request).as_slice());
    preimage.extend_from_slice(keccak256(result).as_slice());
    keccak256(preimage)
}

/// Parse a PEM document into a secp256k1 secret key.
///
/// Tries SEC1 (`EC PRIVATE KEY`) first, then PKCS#8 (`PRIVATE KEY`).
pub fn secret_key_from_pem(pem_str: &str) -> Result<SecretKey, GatewayError> {
    let pem = pem::parse(pem_str)
        .map_err(|e| GatewayError::Signing(format!("Invalid PEM: {}", e)))?;

    SecretKey::from_sec1_der(pem.contents())
        .or_else(|_| {
            use k256::pkcs8::DecodePrivateKey;
            SecretKey::from_pkcs8_der(pem.contents())
        })
        .map_err(|e| GatewayError::Signing(format!("Invalid key format: {}", e)))
}

/// Signs CCIP-Read responses with the gateway's key.
#[derive(Clone)]
pub struct ResponseSigner {
    signer: PrivateKeySigner,
}

impl std::fmt::Debug for ResponseSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSigner")
            .field("address", &self.address())
            .finish()
    }
}

impl ResponseSigner {
    /// Load the key from hex (optionally `0x`-prefixed) or PEM.
    pub fn from_key_material(raw: &str) -> Result<Self, GatewayError> {
        let raw = raw.trim();
        let signer = if raw.starts_with("-----BEGIN") {
            let secret = secret_key_from_pem(raw)?;
            PrivateKeySigner::from_slice(&secret.to_bytes())
                .map_err(|e| GatewayError::Signing(e.to_string()))?
        } else {
            raw.parse::<PrivateKeySigner>()
                .map_err(|e| GatewayError::Signing(format!("Invalid hex key: {}", e)))?
        };
        Ok(Self { signer })
    }

    /// Address the resolver contract must list as a trusted signer.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// 65-byte `r || s || v` signature with `v` in {27, 28}.
    pub fn sign(
        &self,
        to: Address,
        expires: u64,
        request: &[u8],
        result: &[u8],
    ) -> Result<[u8; 65], GatewayError> {
        let digest = response_digest(to, expires, request, result);
        let signature = self
            .signer
            .sign_hash_sync(&digest)
            .map_err(|e| GatewayError::Signing(e.to_string()))?;
        Ok(signature.as_bytes())
    }
}
