// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Name and coin-network normalization.
//!
//! Every identity crossing a trust boundary (cache, exchange request,
//! exchange response) goes through [`normalize_id_and_network`] so that
//! comparisons are always made between canonical forms:
//!
//! - names are UTS-46 mapped (case folding, compatibility forms, NFC) and
//!   checked label by label;
//! - networks are SLIP-44 coin types in hardened form (`index | 0x80000000`)
//!   rendered as decimal strings.

use alloy::primitives::{keccak256, B256};
use idna::uts46::{AsciiDenyList, Hyphens, Uts46};

mod slip44;

use slip44::SLIP44_COIN_TYPES;

/// BIP-44 hardened derivation threshold.
pub const HARDENED_OFFSET: u64 = 0x8000_0000;

/// Unhardened coin type used by `addr(bytes32)`.
pub const DEFAULT_COIN_TYPE: u64 = 60;

const ZWJ: char = '\u{200d}';

/// Canonical `(name, network)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedId {
    pub id: String,
    pub network: String,
}

/// Ticker for a hardened coin type, if registered.
pub fn coin_symbol(hardened: u64) -> Option<&'static str> {
    let index = u32::try_from(hardened.checked_sub(HARDENED_OFFSET)?).ok()?;
    SLIP44_COIN_TYPES
        .binary_search_by_key(&index, |(i, _)| *i)
        .ok()
        .map(|pos| SLIP44_COIN_TYPES[pos].1)
}

/// Parse a decimal (or `0x` hex) coin type, harden it and check the registry.
///
/// Returns the hardened value as a decimal string.
pub fn normalize_network(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let value = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok()?,
        None => raw.parse::<u64>().ok()?,
    };

    let hardened = if value < HARDENED_OFFSET {
        value + HARDENED_OFFSET
    } else {
        value
    };

    coin_symbol(hardened).map(|_| hardened.to_string())
}

/// Map a dotted name to its canonical form, then validate every label.
///
/// Each label goes through UTS-46 mapping (case folding, compatibility forms
/// such as fullwidth letters, NFC, ignored code points like U+FE0F). Zero
/// width joiners are kept between mapped segments so emoji sequences survive.
pub fn normalize_name(raw: &str) -> Option<String> {
    if raw.is_empty() || raw.split('.').any(has_reserved_hyphens) {
        return None;
    }

    let mut name = String::with_capacity(raw.len());
    for (i, label) in raw.split('.').enumerate() {
        if i > 0 {
            name.push('.');
        }
        name.push_str(&map_label(label)?);
    }

    if !name.split('.').all(is_valid_label) {
        return None;
    }
    Some(name)
}

fn map_label(label: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in label.split(ZWJ) {
        if segment.is_empty() {
            return None;
        }
        let (mapped, result) =
            Uts46::new().to_unicode(segment.as_bytes(), AsciiDenyList::EMPTY, Hyphens::Allow);
        result.ok()?;
        segments.push(mapped.into_owned());
    }
    Some(segments.join("\u{200d}"))
}

/// Labels reserved for IDNA extensions ("xn--" and friends).
fn has_reserved_hyphens(label: &str) -> bool {
    let bytes = label.as_bytes();
    bytes.len() >= 4 && bytes[2] == b'-' && bytes[3] == b'-' && label.is_ascii()
}

/// True when `name` is already in the form [`normalize_name`] produces.
pub fn is_normalized(name: &str) -> bool {
    normalize_name(name).as_deref() == Some(name)
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || has_reserved_hyphens(label) {
        return false;
    }

    // Underscores may only lead.
    let body = label.trim_start_matches('_');
    if body.contains('_') {
        return false;
    }

    label.chars().all(is_allowed_char)
}

fn is_allowed_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' || c == '$';
    }
    if c.is_whitespace() || c.is_control() {
        return false;
    }
    // Invisible and formatting code points. ZWJ stays allowed for emoji
    // sequences.
    !matches!(
        c,
        '\u{00ad}' | '\u{200b}' | '\u{200c}' | '\u{2060}' | '\u{feff}' | '\u{200e}' | '\u{200f}'
    )
}

/// Normalize a caller-supplied name and network together.
///
/// `None` if either part is invalid.
pub fn normalize_id_and_network(id: Option<&str>, network: Option<&str>) -> Option<NormalizedId> {
    let id = normalize_name(id?)?;
    let network = normalize_network(network?)?;
    Some(NormalizedId { id, network })
}

/// ENS namehash per EIP-137.
pub fn namehash(name: &str) -> B256 {
    if name.is_empty() {
        return B256::ZERO;
    }

    let name = name.replace('\u{fe0f}', "");

    name.rsplit('.')
        .fold([0u8; 32], |node, label| {
            keccak256([node, keccak256(label.as_bytes()).into()].concat()).into()
        })
        .into()
}
