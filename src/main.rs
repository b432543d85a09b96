use es_demo::client::client::ElasticClient;
use es_demo::config::types::AppConfig;
use es_demo::demo::handlers::{router, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    // 1. Configuration (environment only):
    let config = AppConfig::from_env()?;
    if config.search.basic_auth.is_some() {
        tracing::info!("Using basic auth for search requests");
    }
    tracing::info!("Hit decode policy: {:?}", config.decode_policy);

    // 2. Search client:
    let client = ElasticClient::new(&config.search)?;
    tracing::info!("Search endpoints: {:?}", client.nodes());

    // 3. HTTP Router:
    let app = router(AppState::new(Arc::new(client), config.decode_policy));

    // 4. Start HTTP server:
    let bind_addr = config.bind_addr();
    tracing::info!("HTTP server listening on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
