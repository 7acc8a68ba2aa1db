// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{process::ExitCode, sync::Arc};

use chainhelper_server::{
    api::router,
    blockchain::{SolanaClient, SolanaClientError},
    completion::{CompletionError, OpenAiClient},
    config::AppConfig,
    logging::init_tracing,
    state::AppState,
};
use tokio::net::TcpListener;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to create Solana RPC client: {0}")]
    Rpc(#[from] SolanaClientError),

    #[error("failed to create completion client: {0}")]
    Model(#[from] CompletionError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; variables may come from the environment.
    let _ = dotenvy::dotenv();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_format);

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server terminated");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), StartupError> {
    let ledger = SolanaClient::new(&config.cluster)?;
    let model = OpenAiClient::new(
        &config.model.base_url,
        config.model.api_key.clone(),
        config.model.model.clone(),
    )?;

    tracing::info!(
        cluster = %config.cluster.name,
        rpc_url = %config.cluster.rpc_url,
        model = %model.model(),
        origins = ?config.cors_origins,
        "clients initialised"
    );

    let state = AppState::new(Arc::new(ledger), Arc::new(model), config.cluster.clone());
    let app = router(state, &config.cors_origins);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        "ChainHelper gateway listening on http://{} (docs at /docs)",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
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
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
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

    tracing::info!("shutdown signal received");
}
