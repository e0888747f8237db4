// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 of `data` under `key`.
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> Result<String, CryptoError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| CryptoError::HmacKey)?;
    mac.update(data);
    Ok(alloy::hex::encode(mac.finalize().into_bytes()))
}

/// Check a hex HMAC-SHA256 tag in constant time. Hex case is ignored.
pub fn verify_hmac_hex(key: &[u8], data: &[u8], expected_hex: &str) -> bool {
    let Ok(expected) = alloy::hex::decode(expected_hex.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(data);
    mac.verify_slice(&expected).is_ok()
}
