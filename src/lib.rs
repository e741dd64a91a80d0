pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::routes::{build_router, AppState, ServerConfig};
use crate::services::emotion_service::EmotionService;
use crate::services::watson_provider::WatsonConfig;

pub async fn run() {
    if let Err(error) = try_run().await {
        eprintln!("failed to launch emotion detector: {error}");
        std::process::exit(1);
    }
}

async fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let server_config = ServerConfig::from_env();
    crate::utils::logger::init_logging(server_config.log_dir.as_deref())?;

    let watson_config = WatsonConfig::from_env();
    let service = EmotionService::with_watson(&watson_config)?;
    let app = build_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(server_config.bind_addr).await?;
    tracing::info!(
        target: "app::http",
        listen = %server_config.bind_addr,
        endpoint = %watson_config.endpoint,
        "emotion detector listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!(target: "app::http", "shutdown requested");
        })
        .await?;

    Ok(())
}
