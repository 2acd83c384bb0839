//! SapBridge gateway entry point.

use std::sync::Arc;

use anyhow::Context;
use sapbridge_api::utils::logging;
use sapbridge_api::{build_router, AppContext};
use sapbridge_infra::config;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = match config::load() {
        Ok(config) => config,
        Err(err) => {
            logging::init(false);
            error!(
                error = %err,
                label = logging::error_label(&err),
                "failed to load configuration"
            );
            return Err(err).context("loading configuration");
        }
    };

    logging::init(config.server.json_logs);
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => warn!(error = %err, "no .env file loaded"),
    }

    let bind_addr = config.server.bind_addr.clone();
    let ctx = AppContext::new(config).map_err(|err| {
        error!(
            error = %err,
            label = logging::error_label(&err),
            "failed to build application context"
        );
        err
    })?;
    let app = build_router(Arc::new(ctx));

    let listener =
        TcpListener::bind(&bind_addr).await.with_context(|| format!("binding {bind_addr}"))?;
    info!(addr = %bind_addr, "SapBridge gateway listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("SapBridge gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}
