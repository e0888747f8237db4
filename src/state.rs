// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    ccip::{CcipHandler, ResponseSigner},
    clock::SystemClock,
    config::GatewayConfig,
    error::StartupError,
    exchange::ExchangeClient,
    resolver::NameResolver,
    storage::KvStore,
};

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<CcipHandler>,
    /// Normalized: leading slash, no trailing slash (except `/` itself).
    pub base_path: Arc<str>,
}

impl AppState {
    pub fn new(handler: CcipHandler, base_path: &str) -> Self {
        Self {
            handler: Arc::new(handler),
            base_path: Arc::from(base_path),
        }
    }

    /// Wire the signer, exchange client and resolver from configuration.
    pub fn from_config(
        config: &GatewayConfig,
        names: Arc<dyn KvStore>,
        exchanges: Arc<dyn KvStore>,
    ) -> Result<Self, StartupError> {
        let signer = ResponseSigner::from_key_material(&config.response_signing_key)
            .map_err(StartupError::SigningKey)?;
        let client = ExchangeClient::new(
            config.cexdata_encryption_key.clone(),
            config.exchange_timeout,
        )?;
        let resolver = NameResolver::new(names, exchanges, Arc::new(client), Arc::new(SystemClock));

        Ok(Self::new(
            CcipHandler::new(Arc::new(resolver), signer),
            &config.base_path,
        ))
    }
}
