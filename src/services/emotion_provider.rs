use crate::error::AppResult;
use crate::models::emotion::EmotionScores;

/// What a remote classifier said about a piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemoteVerdict {
    Scored(EmotionScores),
    /// The service explicitly refused the input (HTTP 400).
    Rejected,
}

/// Capability for submitting text to a remote emotion classifier.
///
/// `Err` means the service could not be used for this request: transport
/// failure, an unexpected status, or a payload that did not parse.
#[async_trait::async_trait]
pub trait EmotionProvider: Send + Sync {
    async fn predict(&self, text: &str) -> AppResult<RemoteVerdict>;
}
