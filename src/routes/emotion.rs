use axum::extract::State;
use axum::Form;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::emotion::{EmotionOutcome, EmotionScores};
use crate::routes::AppState;
use crate::services::emotion_service::is_blank_char;

pub const INVALID_TEXT_MESSAGE: &str = "Invalid text! Please try again!";

#[derive(Debug, Deserialize)]
pub struct EmotionDetectorForm {
    pub text: Option<String>,
}

/// POST /emotionDetector
pub async fn emotion_detector(
    State(state): State<AppState>,
    Form(form): Form<EmotionDetectorForm>,
) -> AppResult<String> {
    let text = form
        .text
        .ok_or_else(|| AppError::validation("missing form field `text`"))?;

    let outcome = state.emotion().classify(text.trim_matches(is_blank_char)).await;

    Ok(render_outcome(&outcome))
}

pub fn render_outcome(outcome: &EmotionOutcome) -> String {
    match outcome {
        EmotionOutcome::Rejected => INVALID_TEXT_MESSAGE.to_string(),
        EmotionOutcome::Scored(scores) => render_scores(scores),
    }
}

fn render_scores(scores: &EmotionScores) -> String {
    format!(
        "For the given statement, the system response is 'anger': {}, 'disgust': {}, \
         'fear': {}, 'joy': {} and 'sadness': {}. The dominant emotion is {}.",
        format_score(scores.anger),
        format_score(scores.disgust),
        format_score(scores.fear),
        format_score(scores.joy),
        format_score(scores.sadness),
        scores.dominant_emotion,
    )
}

// Debug formatting is shortest round-trip and keeps a trailing `.0`.
fn format_score(value: f64) -> String {
    format!("{value:?}")
}
