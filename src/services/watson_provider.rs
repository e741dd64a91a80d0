use std::time::{Duration as StdDuration, Instant};

use reqwest::StatusCode;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult, RemoteErrorCode};
use crate::models::watson::{EmotionPredictRequest, EmotionPredictResponse};
use crate::services::emotion_provider::{EmotionProvider, RemoteVerdict};
use crate::utils::redact::{describe_text, redact_sensitive_data};

pub const WATSON_EMOTION_URL: &str = "https://sn-watson-emotion.labs.skills.network/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";
pub const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";
pub const EMOTION_MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(8);

const ENV_WATSON_URL: &str = "EMOTION_DETECTOR_WATSON_URL";
const ENV_WATSON_TIMEOUT_SECS: &str = "EMOTION_DETECTOR_WATSON_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatsonConfig {
    pub endpoint: String,
    pub model_id: String,
    pub http_timeout: StdDuration,
}

impl Default for WatsonConfig {
    fn default() -> Self {
        Self {
            endpoint: WATSON_EMOTION_URL.to_string(),
            model_id: EMOTION_MODEL_ID.to_string(),
            http_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl WatsonConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(ENV_WATSON_URL) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                config.endpoint = trimmed.to_string();
            }
        }

        if let Ok(value) = std::env::var(ENV_WATSON_TIMEOUT_SECS) {
            match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.http_timeout = StdDuration::from_secs(secs),
                _ => {
                    warn!(
                        target: "app::emotion::watson",
                        env = ENV_WATSON_TIMEOUT_SECS,
                        value = %value,
                        "ignoring invalid timeout override"
                    );
                }
            }
        }

        config
    }
}

/// Emotion provider backed by the Watson NLP `EmotionPredict` endpoint.
pub struct WatsonProvider {
    client: reqwest::Client,
    endpoint: String,
    model_id: String,
}

impl WatsonProvider {
    pub fn try_new(config: &WatsonConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Some(StdDuration::from_secs(90)))
            .build()
            .map_err(|err| AppError::other(format!("failed to build emotion HTTP client: {err}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model_id: config.model_id.clone(),
        })
    }

    /// Maps every status except 200 and 400, which `predict` handles itself.
    fn map_http_status(status: StatusCode, correlation_id: &str) -> AppError {
        let message = if status.is_server_error() {
            format!(
                "emotion service temporarily unavailable (status {})",
                status.as_u16()
            )
        } else {
            format!("emotion service returned status {}", status.as_u16())
        };
        AppError::remote_with_correlation(
            RemoteErrorCode::UnexpectedStatus,
            message,
            Some(correlation_id),
        )
    }

    fn error_from_reqwest(err: reqwest::Error, correlation_id: &str) -> AppError {
        if err.is_timeout() {
            AppError::remote_with_correlation(
                RemoteErrorCode::HttpTimeout,
                "emotion service request timed out",
                Some(correlation_id),
            )
        } else if err.is_connect() {
            AppError::remote_with_correlation(
                RemoteErrorCode::Unavailable,
                "emotion service connection failed",
                Some(correlation_id),
            )
        } else {
            AppError::remote_with_correlation(
                RemoteErrorCode::Unknown,
                format!("emotion service request failed: {err}"),
                Some(correlation_id),
            )
        }
    }
}

#[async_trait::async_trait]
impl EmotionProvider for WatsonProvider {
    async fn predict(&self, text: &str) -> AppResult<RemoteVerdict> {
        let correlation_id = Uuid::new_v4().to_string();
        let request_body = EmotionPredictRequest::new(text);
        let sanitized_payload = redact_sensitive_data(&serde_json::to_value(&request_body)?);

        debug!(
            target: "app::emotion::watson",
            correlation_id = %correlation_id,
            text = %describe_text(text),
            payload = %sanitized_payload,
            "invoking emotion service"
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .header(MODEL_ID_HEADER, &self.model_id)
            .json(&request_body)
            .send()
            .await
            .map_err(|err| Self::error_from_reqwest(err, correlation_id.as_str()))?;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis();

        match status {
            StatusCode::OK => {
                debug!(
                    target: "app::emotion::watson",
                    correlation_id = %correlation_id,
                    latency_ms,
                    content_length = ?response.content_length(),
                    "emotion service responded"
                );

                let body: EmotionPredictResponse = response.json().await.map_err(|err| {
                    AppError::remote_with_correlation(
                        RemoteErrorCode::InvalidResponse,
                        format!("failed to parse emotion response: {err}"),
                        Some(correlation_id.as_str()),
                    )
                })?;

                let scores = body.into_scores().map_err(|reason| {
                    AppError::remote_with_correlation(
                        RemoteErrorCode::InvalidResponse,
                        format!("unusable emotion response: {reason}"),
                        Some(correlation_id.as_str()),
                    )
                })?;

                Ok(RemoteVerdict::Scored(scores))
            }
            StatusCode::BAD_REQUEST => {
                debug!(
                    target: "app::emotion::watson",
                    correlation_id = %correlation_id,
                    latency_ms,
                    "emotion service rejected input"
                );
                Ok(RemoteVerdict::Rejected)
            }
            status => {
                warn!(
                    target: "app::emotion::watson",
                    correlation_id = %correlation_id,
                    status = status.as_u16(),
                    latency_ms,
                    "emotion service returned non-success status"
                );
                Err(Self::map_http_status(status, correlation_id.as_str()))
            }
        }
    }
}
