use anyhow::Context;
use clap::Parser;
use meshcall_server::{ServerConfig, SignalingService};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    info!(
        "Initializing signaling server (room capacity {}, host departure {:?})",
        config.room_capacity, config.host_departure
    );

    let (service, hub) = meshcall_server::start(&config);
    let app = meshcall_server::router(service.clone());

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("Signaling server listening on ws://{}/ws", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(service))
        .await
        .context("server error")?;

    hub.await.context("hub task panicked")?;
    info!("Signaling server stopped");
    Ok(())
}

async fn shutdown_signal(service: SignalingService) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received, closing rooms");

    if let Err(e) = service.shutdown().await {
        error!("Hub shutdown failed: {:#}", e);
    }
}
