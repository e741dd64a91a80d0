use serde::{Deserialize, Deserializer, Serialize};

use crate::models::emotion::EmotionScores;

/// Request body for the `EmotionPredict` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionPredictRequest<'a> {
    pub raw_document: RawDocument<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RawDocument<'a> {
    pub text: &'a str,
}

impl<'a> EmotionPredictRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            raw_document: RawDocument { text },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionPredictResponse {
    pub emotion_predictions: Vec<EmotionPrediction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmotionPrediction {
    pub emotion: PredictedEmotions,
}

/// Per-emotion values as reported by the service. Any subset may be present,
/// but a present key must hold a number; `null` does not count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictedEmotions {
    #[serde(default, deserialize_with = "present_number")]
    pub anger: Option<f64>,
    #[serde(default, deserialize_with = "present_number")]
    pub disgust: Option<f64>,
    #[serde(default, deserialize_with = "present_number")]
    pub fear: Option<f64>,
    #[serde(default, deserialize_with = "present_number")]
    pub joy: Option<f64>,
    #[serde(default, deserialize_with = "present_number")]
    pub sadness: Option<f64>,
}

// Only runs for keys that are present, so `null` reaches `f64` and fails.
fn present_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(Some)
}

impl EmotionPredictResponse {
    /// Converts the first prediction into scores.
    ///
    /// Missing emotions default to `0.0`. An empty prediction list or a
    /// negative/non-finite value is reported as `Err` with a short reason.
    pub fn into_scores(self) -> Result<EmotionScores, String> {
        let first = self
            .emotion_predictions
            .into_iter()
            .next()
            .ok_or_else(|| "emotionPredictions is empty".to_string())?;

        let emotions = first.emotion;
        let values = [
            emotions.anger,
            emotions.disgust,
            emotions.fear,
            emotions.joy,
            emotions.sadness,
        ]
        .map(|value| value.unwrap_or(0.0));

        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(format!("emotion score out of range: {bad}"));
        }

        Ok(EmotionScores::from_values(values))
    }
}
