use serde::Serialize;

use crate::nlp::{NlpError, PolarityScorer, PolarityScores};

const POSITIVE_THRESHOLD: f64 = 0.05;
const NEGATIVE_THRESHOLD: f64 = -0.05;

const POSITIVE_KEYWORDS: &[&str] = &[
    "excellent", "great", "good", "amazing", "wonderful", "fantastic", "smooth", "easy",
    "helpful", "supportive", "professional", "organized", "clear", "fair", "reasonable",
    "challenging", "interesting", "engaging", "positive", "successful", "selected", "offered",
    "accepted",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "difficult", "hard", "challenging", "stressful", "unclear", "confusing", "disorganized",
    "unprofessional", "rude", "unhelpful", "negative", "rejected", "failed", "disappointing",
    "frustrating", "annoying", "terrible", "awful", "horrible", "bad", "poor", "weak",
];

const NEUTRAL_KEYWORDS: &[&str] = &[
    "okay", "fine", "average", "standard", "normal", "typical", "expected", "reasonable", "fair",
    "balanced", "mixed", "varied", "different", "unique", "interesting",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// Label from the compound score alone. Both thresholds are inclusive.
pub fn label_for(compound: f64) -> SentimentLabel {
    if compound >= POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Raw substring occurrence counts. A keyword inside a longer word still
/// counts ("unclear" adds to both "clear" and "unclear"), and a word present in
/// two lists counts for both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KeywordTallies {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl KeywordTallies {
    pub fn count(text: &str) -> Self {
        let lower = text.to_lowercase();
        let tally = |keywords: &[&str]| -> usize {
            keywords.iter().map(|k| lower.matches(k).count()).sum()
        };
        KeywordTallies {
            positive: tally(POSITIVE_KEYWORDS),
            negative: tally(NEGATIVE_KEYWORDS),
            neutral: tally(NEUTRAL_KEYWORDS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub sentiment: SentimentLabel,
    pub compound: f64,
    pub polarity_scores: PolarityScores,
    pub keyword_scores: KeywordTallies,
    pub confidence: f64,
}

impl SentimentResult {
    pub fn from_scores(polarity_scores: PolarityScores, keyword_scores: KeywordTallies) -> Self {
        let compound = polarity_scores.compound;
        SentimentResult {
            sentiment: label_for(compound),
            compound,
            polarity_scores,
            keyword_scores,
            confidence: compound.abs(),
        }
    }
}

pub fn analyze(text: &str, scorer: &dyn PolarityScorer) -> Result<SentimentResult, NlpError> {
    let scores = scorer.score(text)?;
    Ok(SentimentResult::from_scores(scores, KeywordTallies::count(text)))
}
