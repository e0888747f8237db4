// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # CCIP-Read (EIP-3668)
//!
//! The ENS offchain resolver reverts with `OffchainLookup`; the client then
//! calls this gateway with the `resolve(name, data)` calldata and
//! the resolver's address. We answer with a record signed so the contract
//! can verify it came from us and has not expired.
//!
//! - `abi` - Solidity interfaces (`sol!`)
//! - `dns` - DNS wire-format names
//! - `query` - inner record queries (`addr`, `text`, ...)
//! - `signer` - response digest and signing key
//! - `handler` - the end-to-end request handler

pub mod abi;
pub mod dns;
pub mod handler;
pub mod query;
pub mod signer;

pub use dns::{decode_dns_name, encode_dns_name};
pub use handler::CcipHandler;
pub use query::ResolverQuery;
pub use signer::{response_digest, ResponseSigner};
