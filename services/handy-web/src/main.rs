mod config;
mod routes;

use anyhow::bail;
use config::ServerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    if !config.web_dir.is_dir() {
        bail!("web directory not found at {}", config.web_dir.display());
    }

    let addr = config.socket_addr();
    info!(%addr, web_dir = %config.web_dir.display(), "handy-web listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, routes::app(&config.web_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("handy-web stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
    }
}
