use anyhow::Context;
use gigledger::{api, Config, JsonFileSnapshotSource, LedgerCache, Orchestrator, SnapshotSource};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("Configuration error")?;

    let source: Arc<dyn SnapshotSource> =
        Arc::new(JsonFileSnapshotSource::new(config.snapshot_path.clone()));
    let cache = Arc::new(LedgerCache::new(config.ledger_cache));
    let orchestrator = Arc::new(Orchestrator::new(source, cache));

    let addr = SocketAddr::from((config.bind_addr, config.port));
    let app = api::create_router(api::AppState::new(config, orchestrator));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
