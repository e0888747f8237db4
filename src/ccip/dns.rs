// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! DNS wire-format names as used by ENSIP-10 `resolve(bytes,bytes)`.
//!
//! `alice.binance.eth` is `05 alice 07 binance 03 eth 00`.

use crate::error::GatewayError;

/// Decode a length-prefixed label sequence up to its zero terminator.
///
/// Bytes after the terminator are ignored. Labels must be UTF-8.
pub fn decode_dns_name(encoded: &[u8]) -> Result<String, GatewayError> {
    let mut labels = Vec::new();
    let mut offset = 0;

    loop {
        let len = *encoded
            .get(offset)
            .ok_or_else(|| GatewayError::InvalidDnsName("missing terminator".into()))?
            as usize;
        if len == 0 {
            break;
        }

        let start = offset + 1;
        let label = encoded.get(start..start + len).ok_or_else(|| {
            GatewayError::InvalidDnsName(format!("label at offset {offset} overruns input"))
        })?;
        let label = std::str::from_utf8(label)
            .map_err(|e| GatewayError::InvalidDnsName(e.to_string()))?;
        labels.push(label);
        offset = start + len;
    }

    Ok(labels.join("."))
}

/// Encode a dotted name. The empty name encodes to a lone terminator.
pub fn encode_dns_name(name: &str) -> Result<Vec<u8>, GatewayError> {
    let mut encoded = Vec::with_capacity(name.len() + 2);
    if !name.is_empty() {
        for label in name.split('.') {
            let len = u8::try_from(label.len())
                .ok()
                .filter(|len| *len > 0)
                .ok_or_else(|| GatewayError::InvalidDnsName(format!("bad label {label:?}")))?;
            encoded.push(len);
            encoded.extend_from_slice(label.as_bytes());
        }
    }
    encoded.push(0);
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_format() {
        let encoded = b"\x05alice\x07binance\x03eth\x00";
        assert_eq!(decode_dns_name(encoded).unwrap(), "alice.binance.eth");
        assert_eq!(encode_dns_name("alice.binance.eth").unwrap(), encoded);
    }

    #[test]
    fn round_trips() {
        for name in ["test.eth", "a.b.c.exchange.tld", "\u{1f680}.eth", "x"] {
            assert_eq!(decode_dns_name(&encode_dns_name(name).unwrap()).unwrap(), name);
        }
    }

    #[test]
    fn empty_name_is_a_lone_terminator() {
        assert_eq!(encode_dns_name("").unwrap(), vec![0]);
        assert_eq!(decode_dns_name(&[0]).unwrap(), "");
    }

    #[test]
    fn truncated_input_is_rejected() {
        assert!(decode_dns_name(&[]).is_err());
        assert!(decode_dns_name(b"\x04test").is_err());
        assert!(decode_dns_name(b"\x09test\x00").is_err());
        assert!(decode_dns_name(b"\x02\xff\xfe\x00").is_err());
    }

    #[test]
    fn empty_or_oversized_labels_cannot_be_encoded() {
        assert!(encode_dns_name("a..eth").is_err());
        assert!(encode_dns_name(&"a".repeat(256)).is_err());
    }
}
