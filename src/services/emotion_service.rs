use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::models::emotion::{EmotionOutcome, ScoreSource};
use crate::services::emotion_provider::{EmotionProvider, RemoteVerdict};
use crate::services::keyword_heuristic::score_by_keywords;
use crate::services::watson_provider::{WatsonConfig, WatsonProvider};
use crate::utils::redact::describe_text;

/// Whitespace for blank-input purposes: Unicode whitespace plus the
/// information separators U+001C..=U+001F.
pub fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

pub fn is_blank(text: &str) -> bool {
    text.chars().all(is_blank_char)
}

/// Classifies text through a remote provider, degrading to the keyword
/// heuristic whenever the provider cannot be used.
///
/// Holds no mutable state; a single instance can serve concurrent requests.
#[derive(Clone)]
pub struct EmotionService {
    provider: Arc<dyn EmotionProvider>,
}

impl EmotionService {
    pub fn new(provider: Arc<dyn EmotionProvider>) -> Self {
        Self { provider }
    }

    pub fn with_watson(config: &WatsonConfig) -> AppResult<Self> {
        let provider = WatsonProvider::try_new(config)?;
        Ok(Self::new(Arc::new(provider)))
    }

    /// Never fails: blank input and explicit remote rejection give
    /// [`EmotionOutcome::Rejected`], everything else gives scores.
    pub async fn classify(&self, text: &str) -> EmotionOutcome {
        if is_blank(text) {
            debug!(target: "app::emotion", "blank input rejected without remote call");
            return EmotionOutcome::Rejected;
        }

        match self.provider.predict(text).await {
            Ok(RemoteVerdict::Scored(scores)) => {
                info!(
                    target: "app::emotion",
                    source = %ScoreSource::Remote,
                    dominant = %scores.dominant_emotion,
                    "classified text"
                );
                EmotionOutcome::Scored(scores)
            }
            Ok(RemoteVerdict::Rejected) => {
                info!(target: "app::emotion", "remote service rejected input");
                EmotionOutcome::Rejected
            }
            Err(error) => {
                warn!(
                    target: "app::emotion",
                    code = ?error.remote_code(),
                    correlation_id = ?error.correlation_id(),
                    error = %error,
                    "remote classification unavailable, using keyword fallback"
                );
                let (scores, source) = score_by_keywords(text);
                info!(
                    target: "app::emotion",
                    source = %source,
                    dominant = %scores.dominant_emotion,
                    text = %describe_text(text),
                    "classified text"
                );
                EmotionOutcome::Scored(scores)
            }
        }
    }
}
