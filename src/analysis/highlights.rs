use itertools::Itertools;

use super::insights::Insights;
use super::sentiment::{SentimentLabel, SentimentResult};

const MAX_LISTED_TECHNOLOGIES: usize = 3;

/// Short reader-facing summary lines. Each rule adds at most one line and the
/// rules always run in the same order.
pub fn synthesize(insights: &Insights, sentiment: &SentimentResult) -> Vec<String> {
    let mut highlights = Vec::new();

    let tone = match sentiment.sentiment {
        SentimentLabel::Positive => Some("Overall positive interview experience"),
        SentimentLabel::Negative => Some("Challenging interview experience"),
        SentimentLabel::Neutral => None,
    };
    highlights.extend(tone.map(String::from));

    if let Some(first) = insights.difficulty_indicators.first() {
        highlights.push(format!("Interview difficulty: {first}"));
    }

    if !insights.preparation_tips.is_empty() {
        highlights.push("Includes preparation advice".to_string());
    }

    if !insights.red_flags.is_empty() {
        highlights.push("Contains potential red flags".to_string());
    } else if !insights.positive_aspects.is_empty() {
        highlights.push("Highlights positive aspects".to_string());
    }

    if !insights.technologies.is_empty() {
        let listed = insights.technologies.iter().take(MAX_LISTED_TECHNOLOGIES).join(", ");
        highlights.push(format!("Mentions technologies: {listed}"));
    }

    highlights
}
