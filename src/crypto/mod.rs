// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Low-level crypto and byte helpers shared by the exchange client and the
//! CCIP-Read handler.
//!
//! - `serialization` - hex <-> bytes
//! - `encryption` - AES-256-GCM credential decryption
//! - `hmac` - HMAC-SHA256 request/response authentication

pub mod encryption;
pub mod hmac;
pub mod serialization;

pub use encryption::{decrypt_data, encrypt_data, validate_key_bundle};
pub use hmac::{hmac_sha256_hex, verify_hmac_hex};
pub use serialization::{bytes_to_hex, hex_to_bytes};

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("the encryption key is invalid")]
    InvalidEncryptionKey,

    #[error("the ciphertext is invalid: {0}")]
    InvalidCiphertext(String),

    #[error("AES-GCM operation failed")]
    Aead,

    #[error("invalid hex: {0}")]
    Hex(#[from] alloy::hex::FromHexError),

    #[error("invalid HMAC key")]
    HmacKey,
}
