// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! CXID Gateway - CCIP-Read resolution for exchange accounts
//!
//! This crate serves ENS offchain lookups (EIP-3668) for names issued by
//! centralized exchanges, fetching account addresses from each exchange over
//! an HMAC-authenticated API and signing the answers for the resolver
//! contract.
//!
//! ## Modules
//!
//! - `api` - HTTP dispatcher (Axum)
//! - `ccip` - CCIP-Read decoding, record queries and response signing
//! - `exchange` - Signed exchange API client
//! - `resolver` - Name cache and exchange lookup
//! - `storage` - Key-value stores (in-memory LRU, redb)

pub mod api;
pub mod ccip;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod error;
pub mod exchange;
pub mod models;
pub mod networks;
pub mod resolver;
pub mod state;
pub mod storage;
