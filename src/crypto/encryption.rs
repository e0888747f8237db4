// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! AES-256-GCM handling of exchange signing keys.
//!
//! The data encryption key is a single hex string: the first 24 characters
//! are the 12-byte IV, the remaining 64 the 32-byte AES key.
//! Ciphertexts are hex with the 16-byte GCM tag appended.

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};

use super::{serialization::hex_to_bytes, CryptoError};

const IV_HEX_LEN: usize = 24;
const AES_KEY_HEX_LEN: usize = 64;
pub const KEY_BUNDLE_HEX_LEN: usize = IV_HEX_LEN + AES_KEY_HEX_LEN;
const TAG_LEN: usize = 16;

fn open_key_bundle(encryption_key: &str) -> Result<(LessSafeKey, Nonce), CryptoError> {
    if encryption_key.len() != KEY_BUNDLE_HEX_LEN
        || !encryption_key.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(CryptoError::InvalidEncryptionKey);
    }

    let iv = hex_to_bytes(&encryption_key[..IV_HEX_LEN])?;
    let key_bytes = hex_to_bytes(&encryption_key[IV_HEX_LEN..])?;

    let unbound =
        UnboundKey::new(&AES_256_GCM, &key_bytes).map_err(|_| CryptoError::InvalidEncryptionKey)?;
    let nonce =
        Nonce::try_assume_unique_for_key(&iv).map_err(|_| CryptoError::InvalidEncryptionKey)?;
    Ok((LessSafeKey::new(unbound), nonce))
}

/// Check the shape of an IV/key bundle without using it.
pub fn validate_key_bundle(encryption_key: &str) -> Result<(), CryptoError> {
    open_key_bundle(encryption_key).map(|_| ())
}

/// Decrypt a hex ciphertext with the IV/key bundle.
pub fn decrypt_data(encryption_key: &str, ciphertext: &str) -> Result<Vec<u8>, CryptoError> {
    let (key, nonce) = open_key_bundle(encryption_key)?;

    if ciphertext.len() % 2 != 0 {
        return Err(CryptoError::InvalidCiphertext("odd length".to_string()));
    }
    let mut in_out =
        hex_to_bytes(ciphertext).map_err(|e| CryptoError::InvalidCiphertext(e.to_string()))?;
    if in_out.len() < TAG_LEN {
        return Err(CryptoError::InvalidCiphertext(
            "shorter than the authentication tag".to_string(),
        ));
    }

    let plaintext = key
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| CryptoError::Aead)?;
    Ok(plaintext.to_vec())
}

/// Encrypt `plaintext` with the IV/key bundle, returning lowercase hex.
///
/// Used when provisioning exchange endpoints.
pub fn encrypt_data(encryption_key: &str, plaintext: &[u8]) -> Result<String, CryptoError> {
    let (key, nonce) = open_key_bundle(encryption_key)?;
    let mut in_out = plaintext.to_vec();
    key.seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| CryptoError::Aead)?;
    Ok(alloy::hex::encode(in_out))
}
