pub mod emotion;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::error::AppError;
use crate::services::emotion_service::EmotionService;

const INDEX_HTML: &str = include_str!("../../static/index.html");

const ENV_BIND_ADDR: &str = "EMOTION_DETECTOR_ADDR";
const ENV_LOG_DIR: &str = "EMOTION_DETECTOR_LOG_DIR";
const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 5000);

#[derive(Clone)]
pub struct AppState {
    emotion_service: Arc<EmotionService>,
}

impl AppState {
    pub fn new(emotion_service: EmotionService) -> Self {
        Self {
            emotion_service: Arc::new(emotion_service),
        }
    }

    pub fn emotion(&self) -> Arc<EmotionService> {
        Arc::clone(&self.emotion_service)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/emotionDetector", post(emotion::emotion_detector))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            log_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(ENV_BIND_ADDR) {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => config.bind_addr = addr,
                Err(err) => {
                    warn!(
                        target: "app::http",
                        env = ENV_BIND_ADDR,
                        value = %raw,
                        error = %err,
                        "ignoring invalid bind address"
                    );
                }
            }
        }

        config.log_dir = std::env::var_os(ENV_LOG_DIR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        config
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation { message } => (StatusCode::BAD_REQUEST, message).into_response(),
            other => {
                error!(target: "app::http", error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
