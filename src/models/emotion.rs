use serde::{Deserialize, Serialize};
use std::fmt;

/// The five emotion categories, in declaration order.
///
/// Declaration order doubles as the tie-break order when picking the
/// dominant emotion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }

    fn index(self) -> usize {
        match self {
            Emotion::Anger => 0,
            Emotion::Disgust => 1,
            Emotion::Fear => 2,
            Emotion::Joy => 3,
            Emotion::Sadness => 4,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Emotion {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "anger" => Ok(Emotion::Anger),
            "disgust" => Ok(Emotion::Disgust),
            "fear" => Ok(Emotion::Fear),
            "joy" => Ok(Emotion::Joy),
            "sadness" => Ok(Emotion::Sadness),
            other => Err(format!("unsupported emotion: {other}")),
        }
    }
}

/// Where a set of scores came from. Only surfaced in logs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Remote,
    Heuristic,
    Default,
}

impl ScoreSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreSource::Remote => "remote",
            ScoreSource::Heuristic => "heuristic",
            ScoreSource::Default => "default",
        }
    }
}

impl fmt::Display for ScoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete emotion distribution with its dominant label.
///
/// Values are non-negative and finite; the dominant emotion is always
/// derived from them, so the two can never disagree.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct EmotionScores {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
    pub dominant_emotion: Emotion,
}

impl EmotionScores {
    /// Builds scores from values indexed in [`Emotion::ALL`] order.
    pub fn from_values(values: [f64; 5]) -> Self {
        let [anger, disgust, fear, joy, sadness] = values;
        Self {
            anger,
            disgust,
            fear,
            joy,
            sadness,
            dominant_emotion: dominant_of(&values),
        }
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self.values()[emotion.index()]
    }

    pub fn values(&self) -> [f64; 5] {
        [self.anger, self.disgust, self.fear, self.joy, self.sadness]
    }

    pub fn total(&self) -> f64 {
        self.values().iter().sum()
    }
}

// Strict comparison keeps the earliest emotion on ties.
fn dominant_of(values: &[f64; 5]) -> Emotion {
    let mut best = Emotion::ALL[0];
    let mut best_value = values[0];
    for (emotion, value) in Emotion::ALL.iter().zip(values.iter()).skip(1) {
        if *value > best_value {
            best = *emotion;
            best_value = *value;
        }
    }
    best
}

/// Result of classifying one piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmotionOutcome {
    /// Blank input, or the remote service refused the text.
    Rejected,
    Scored(EmotionScores),
}

impl EmotionOutcome {
    pub fn scores(&self) -> Option<&EmotionScores> {
        match self {
            EmotionOutcome::Rejected => None,
            EmotionOutcome::Scored(scores) => Some(scores),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, EmotionOutcome::Rejected)
    }

    pub fn status_code(&self) -> u16 {
        match self {
            EmotionOutcome::Rejected => 400,
            EmotionOutcome::Scored(_) => 200,
        }
    }
}
