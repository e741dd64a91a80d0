use std::fmt;

use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorCode {
    HttpTimeout,
    Unavailable,
    UnexpectedStatus,
    InvalidResponse,
    Unknown,
}

impl RemoteErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RemoteErrorCode::HttpTimeout => "HTTP_TIMEOUT",
            RemoteErrorCode::Unavailable => "REMOTE_UNAVAILABLE",
            RemoteErrorCode::UnexpectedStatus => "UNEXPECTED_STATUS",
            RemoteErrorCode::InvalidResponse => "INVALID_RESPONSE",
            RemoteErrorCode::Unknown => "UNKNOWN_REMOTE_ERROR",
        }
    }
}

impl fmt::Display for RemoteErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("{message}")]
    Remote {
        code: RemoteErrorCode,
        message: String,
        correlation_id: Option<String>,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation { message }
    }

    pub fn remote(code: RemoteErrorCode, message: impl Into<String>) -> Self {
        Self::remote_with_correlation(code, message, None)
    }

    pub fn remote_with_correlation(
        code: RemoteErrorCode,
        message: impl Into<String>,
        correlation_id: Option<&str>,
    ) -> Self {
        let message = message.into();
        let correlation = correlation_id.map(|value| value.to_string());
        match &correlation {
            Some(id) => {
                warn!(
                    target: "app::emotion::error",
                    code = %code,
                    correlation_id = %id,
                    %message
                );
            }
            None => {
                warn!(target: "app::emotion::error", code = %code, %message);
            }
        }

        AppError::Remote {
            code,
            message,
            correlation_id: correlation,
        }
    }

    pub fn remote_code(&self) -> Option<RemoteErrorCode> {
        match self {
            AppError::Remote { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            AppError::Remote { correlation_id, .. } => correlation_id.as_deref(),
            _ => None,
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }
}
