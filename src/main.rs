use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;
use recipe_catalog::{
    catalog::{routes::create_router, Catalog},
    config::CatalogConfig,
    CatalogState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = CatalogConfig::load()?;
    let catalog = Catalog::load(&config.data_path)?;

    let state = CatalogState {
        catalog: Arc::new(catalog),
        templates_dir: Arc::new(config.templates_dir),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(config.server_addr).await?;
    info!("Listening for requests on {}", config.server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, shutting down");
    }
}
