// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{sync::Arc, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tracing::{error, info, warn};

use cxid_gateway::{
    api::router,
    config::{init_tracing, GatewayConfig, StoreBackend},
    error::StartupError,
    state::AppState,
    storage::{
        open_database, seed_from_file, KvStore, MemoryKvStore, RedbKvStore, EXCHANGES_TABLE,
        NAMES_TABLE,
    },
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        error!(error = %e, "Gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    // Install the ring crypto provider for rustls (must be done before any TLS operations)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider was already installed");
    }

    let config = GatewayConfig::from_env()?;
    info!(?config, "Loaded configuration");

    let (names, exchanges) = open_stores(&config.store)?;

    if let Some(path) = &config.seed_exchange_file {
        let seeded = seed_from_file(exchanges.as_ref(), path).await?;
        info!(count = seeded, path = %path.display(), "Provisioned exchanges from seed file");
    }

    let state = AppState::from_config(&config, names, exchanges)?;
    info!(
        signer = %state.handler.signer_address(),
        base_path = %state.base_path,
        "Response signer ready"
    );
    let app = router(state);

    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, draining connections");
        shutdown.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });

    let addr = config.bind_addr;
    match &config.tls {
        Some(tls) => {
            let tls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key)
                .await
                .map_err(StartupError::Tls)?;
            info!("CXID gateway listening on https://{addr}");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .map_err(StartupError::Server)?;
        }
        None => {
            info!("CXID gateway listening on http://{addr}");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .map_err(StartupError::Server)?;
        }
    }

    info!("CXID gateway stopped");
    Ok(())
}

type Stores = (Arc<dyn KvStore>, Arc<dyn KvStore>);

fn open_stores(backend: &StoreBackend) -> Result<Stores, StartupError> {
    match backend {
        StoreBackend::Memory { capacity } => {
            info!(capacity, "Using in-memory stores");
            Ok((
                Arc::new(MemoryKvStore::new(*capacity)),
                Arc::new(MemoryKvStore::unbounded()),
            ))
        }
        StoreBackend::Redb { data_dir } => {
            let path = data_dir.join("gateway.redb");
            info!(path = %path.display(), "Using redb stores");
            let db = open_database(&path)?;
            Ok((
                Arc::new(RedbKvStore::new(db.clone(), NAMES_TABLE)?),
                Arc::new(RedbKvStore::new(db, EXCHANGES_TABLE)?),
            ))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
