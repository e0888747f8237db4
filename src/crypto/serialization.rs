// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use super::CryptoError;

/// Decode a hex string (optional `0x` prefix) into bytes.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, CryptoError> {
    Ok(alloy::hex::decode(hex)?)
}

/// Lowercase hex without prefix.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    alloy::hex::encode(bytes)
}

/// `0x`-prefixed, even-length hex string.
pub fn is_prefixed_hex_bytes(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(digits) => digits.len() % 2 == 0 && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
