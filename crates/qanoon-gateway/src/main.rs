//! Qanoon Guide Gateway: JSON API in front of the answer pipeline.
//! POST /api/legal-qa with {question, topic, language}; keys stay server-side.

mod routes;

use qanoon_core::QanoonConfig;
use routes::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[qanoon-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = QanoonConfig::from_env();
    if !config.any_provider_configured() {
        tracing::warn!(
            "[SYSTEM] No provider keys set (HF_API_KEY / OPENAI_API_KEY); every question will get the not-configured reply"
        );
    }
    tracing::info!(?config, "[SYSTEM] Qanoon gateway v{} starting", qanoon_core::version());

    let bind_addr = config.bind_addr.clone();
    let app = routes::build_app(Arc::new(AppState::from_config(config)));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("[SYSTEM] Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}
