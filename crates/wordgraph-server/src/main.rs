//! Binary entrypoint for the wordgraph HTTP server.
//!
//! Configuration comes from environment variables; see
//! [`wordgraph_server::config`].

use wordgraph_server::config::ServerConfig;
use wordgraph_server::router::build_router;
use wordgraph_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let state = AppState::from_config(&config);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(
        window_capacity = config.graph.window_capacity,
        semantic_threshold = config.graph.semantic_threshold,
        embedding_dim = config.embedding_dim,
        "wordgraph server starting on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
