use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::{find_all, word_group};
use crate::nlp::{EntityKind, PhraseExtractor};

const MAX_TOPIC_WORDS: usize = 3;

/// Easiest first. "very hard" phrasing also trips the plain hard tier.
const DIFFICULTY_TIERS: &[&[&str]] = &[
    &["easy", "simple", "straightforward", "basic", "fundamental"],
    &["medium", "moderate", "reasonable", "standard", "typical"],
    &["hard", "difficult", "challenging", "complex", "advanced", "expert"],
    &["very hard", "extremely difficult", "intense", "rigorous", "demanding"],
];

const PREPARATION_GROUPS: &[&[&str]] = &[
    &[
        "study", "practice", "prepare", "review", "learn", "read", "watch", "mock", "interview",
        "prep",
    ],
    &["leetcode", "hackerrank", "codility", "topcoder", "competitive programming"],
    &["book", "course", "tutorial", "video", "documentation", "guide"],
];

const RED_FLAGS: &[&str] = &[
    "rude", "unprofessional", "disorganized", "unclear", "confusing", "stressful", "negative",
    "bad", "terrible", "awful", "horrible", "poor", "weak", "disappointing", "frustrating",
    "annoying",
];

const POSITIVE_ASPECTS: &[&str] = &[
    "professional", "organized", "clear", "helpful", "supportive", "positive", "good", "great",
    "excellent", "amazing", "wonderful", "fantastic", "smooth", "easy", "fair", "reasonable",
];

/// Everything derived from one narrative. Lists keep text order and
/// duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Insights {
    pub topics: Vec<String>,
    pub technologies: Vec<String>,
    pub companies_mentioned: Vec<String>,
    pub difficulty_indicators: Vec<String>,
    pub preparation_tips: Vec<String>,
    pub red_flags: Vec<String>,
    pub positive_aspects: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct InsightExtractor {
    difficulty: Vec<Regex>,
    preparation: Vec<Regex>,
    red_flags: Regex,
    positives: Regex,
}

impl InsightExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(InsightExtractor {
            difficulty: DIFFICULTY_TIERS
                .iter()
                .map(|t| word_group(t))
                .collect::<Result<Vec<_>, _>>()?,
            preparation: PREPARATION_GROUPS
                .iter()
                .map(|g| word_group(g))
                .collect::<Result<Vec<_>, _>>()?,
            red_flags: word_group(RED_FLAGS)?,
            positives: word_group(POSITIVE_ASPECTS)?,
        })
    }

    pub fn extract(&self, text: &str, phrases: &dyn PhraseExtractor) -> Insights {
        let lower = text.to_lowercase();
        let mut insights = Insights {
            difficulty_indicators: collect_tiers(&self.difficulty, &lower),
            preparation_tips: collect_tiers(&self.preparation, &lower),
            red_flags: find_all(&self.red_flags, &lower),
            positive_aspects: find_all(&self.positives, &lower),
            ..Insights::default()
        };

        match phrases.extract(text) {
            Ok(found) => {
                insights.topics = found
                    .noun_phrases
                    .iter()
                    .filter(|p| p.split_whitespace().count() <= MAX_TOPIC_WORDS)
                    .map(|p| p.to_lowercase())
                    .collect();
                for entity in found.entities {
                    match entity.kind {
                        EntityKind::Organization => {
                            insights.companies_mentioned.push(entity.text.clone());
                            insights.technologies.push(entity.text);
                        }
                        EntityKind::Product | EntityKind::Place => {
                            insights.technologies.push(entity.text)
                        }
                    }
                }
            }
            Err(e) => debug!(error = %e, "phrase extraction skipped"),
        }

        insights
    }
}

fn collect_tiers(tiers: &[Regex], text: &str) -> Vec<String> {
    tiers.iter().flat_map(|re| find_all(re, text)).collect()
}
