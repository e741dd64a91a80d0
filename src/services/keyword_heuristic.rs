//! Offline rule-based emotion scoring.
//!
//! Each keyword found (as a substring) in the lower-cased text adds one
//! point to its emotion. Counts are normalised to sum to `1.0`. Text with
//! no keyword at all gets [`DEFAULT_DISTRIBUTION`].

use crate::models::emotion::{Emotion, EmotionScores, ScoreSource};

const ANGER_KEYWORDS: &[&str] = &["angry", "mad", "hate", "furious", "annoy"];
const DISGUST_KEYWORDS: &[&str] = &["disgust", "disgusted", "gross"];
const FEAR_KEYWORDS: &[&str] = &["afraid", "scared", "fear", "terrified"];
const JOY_KEYWORDS: &[&str] = &["happy", "glad", "love", "joy", "excited"];
const SADNESS_KEYWORDS: &[&str] = &["sad", "unhappy", "depressed", "sorrow"];

/// Used when no keyword matches. Joy is dominant.
pub const DEFAULT_DISTRIBUTION: [f64; 5] = [0.10, 0.05, 0.05, 0.60, 0.20];

pub fn keywords_for(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Anger => ANGER_KEYWORDS,
        Emotion::Disgust => DISGUST_KEYWORDS,
        Emotion::Fear => FEAR_KEYWORDS,
        Emotion::Joy => JOY_KEYWORDS,
        Emotion::Sadness => SADNESS_KEYWORDS,
    }
}

/// Raw keyword hit counts in [`Emotion::ALL`] order.
pub fn keyword_counts(text: &str) -> [f64; 5] {
    let lowered = text.to_lowercase();
    Emotion::ALL.map(|emotion| {
        keywords_for(emotion)
            .iter()
            .filter(|keyword| lowered.contains(*keyword))
            .count() as f64
    })
}

pub fn score_by_keywords(text: &str) -> (EmotionScores, ScoreSource) {
    let counts = keyword_counts(text);
    let total: f64 = counts.iter().sum();

    if total == 0.0 {
        return (
            EmotionScores::from_values(DEFAULT_DISTRIBUTION),
            ScoreSource::Default,
        );
    }

    (
        EmotionScores::from_values(counts.map(|count| count / total)),
        ScoreSource::Heuristic,
    )
}
