//! Matchpoint rendezvous server
//!
//! Binds the HTTP transport, owns the registry service, and wires
//! shutdown signals to an orderly teardown.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use matchpoint_api_server::{AppState, ServerConfig, create_router};
use matchpoint_registry_core::{RegistryConfig, RegistryService};

#[derive(Parser, Debug)]
#[command(name = "matchpoint-server")]
#[command(about = "Rendezvous registry for multiplayer game sessions")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// HTTP listening port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Log level (overridden by RUST_LOG when set)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Seconds a session may live before the sweeper evicts it
    #[arg(long, default_value = "1800")]
    session_ttl_secs: u64,

    /// Seconds between sweeper passes
    #[arg(long, default_value = "300")]
    sweep_interval_secs: u64,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.bind, self.port),
            registry: RegistryConfig {
                session_ttl: Duration::from_secs(self.session_ttl_secs),
                sweep_interval: Duration::from_secs(self.sweep_interval_secs),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = args.into_config();

    let mut service = RegistryService::new(config.registry.clone());
    service.start();

    let state = AppState::new(service.registry());
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;

    info!("🎮 Matchpoint rendezvous server listening on {}", config.bind_addr);
    info!("📊 Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.stop().await;
    info!("✅ Shutdown complete");

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM so the serve loop can drain and exit.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("🛑 Received Ctrl-C, shutting down..."),
        _ = terminate => info!("🛑 Received SIGTERM, shutting down..."),
    }
}
