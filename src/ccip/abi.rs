// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Solidity interfaces spoken by the gateway.
//!
//! `IResolverService` is the offchain resolver's callback surface: the
//! client forwards `resolve(name, data)` and expects `(result, expires, sig)`.
//! `IResolver` lists the record functions that may be wrapped in `data`.

use alloy::sol;

sol! {
    interface IResolverService {
        function resolve(bytes name, bytes data)
            external
            view
            returns (bytes result, uint64 expires, bytes sig);
    }
}

sol! {
    interface IResolver {
        function addr(bytes32 node) external view returns (address);
        function addr(bytes32 node, uint256 coinType) external view returns (bytes memory);
        function text(bytes32 node, string key) external view returns (string memory);
        function contenthash(bytes32 node) external view returns (bytes memory);
    }
}
