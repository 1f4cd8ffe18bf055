use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use ticketd::{PathStore, RequestManager, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let store = PathStore::new(Some(config.initial_data()?))?;
    let manager = RequestManager::new(store);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "ticketd listening");

    axum::serve(listener, ticketd::http::router(manager)).await?;
    Ok(())
}
