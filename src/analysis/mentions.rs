//! Keyword-driven round mentions over sentences.
//!
//! Unlike [`super::rounds`], this works on prose: any sentence naming a kind of
//! round opens a new mention, and later question sentences attach to it.

use regex::Regex;
use serde::Serialize;

use super::word_group;

const ROUND_KINDS: &[&[&str]] = &[
    &["phone screen", "phone interview", "screening", "initial"],
    &["technical", "coding", "programming", "algorithm", "data structure"],
    &["behavioral", "culture", "fit", "personality", "soft skills"],
    &["system design", "architecture", "design", "high level"],
    &["onsite", "on-site", "in-person", "final", "last"],
    &["hr", "human resources", "recruiter", "hiring manager"],
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundMention {
    /// The matched keyword, lowercased.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RoundMentionDetector {
    kinds: Vec<Regex>,
}

impl RoundMentionDetector {
    pub fn new() -> Result<Self, regex::Error> {
        let kinds = ROUND_KINDS
            .iter()
            .map(|k| word_group(k))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RoundMentionDetector { kinds })
    }

    pub fn detect(&self, sentences: &[String]) -> Vec<RoundMention> {
        let mut mentions: Vec<RoundMention> = Vec::new();
        for sentence in sentences {
            let lower = sentence.to_lowercase();
            if let Some(m) = self.kinds.iter().find_map(|re| re.find(&lower)) {
                mentions.push(RoundMention {
                    kind: m.as_str().to_string(),
                    description: sentence.clone(),
                    questions: Vec::new(),
                });
            }
            if sentence.contains('?') {
                if let Some(open) = mentions.last_mut() {
                    open.questions.push(sentence.clone());
                }
            }
        }
        mentions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(sentences: &[&str]) -> Vec<RoundMention> {
        let owned: Vec<String> = sentences.iter().map(|s| s.to_string()).collect();
        RoundMentionDetector::new().unwrap().detect(&owned)
    }

    #[test]
    fn questions_attach_to_the_open_mention() {
        let got = detect(&[
            "Where do you see yourself?",
            "The first call was a phone screen with a recruiter.",
            "Why this company?",
            "Next came the coding interview.",
            "How would you reverse a string?",
        ]);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].kind, "phone screen");
        assert_eq!(got[0].questions, vec!["Why this company?"]);
        assert_eq!(got[1].kind, "coding");
        assert_eq!(got[1].questions, vec!["How would you reverse a string?"]);
    }

    #[test]
    fn earlier_groups_win_within_a_sentence() {
        let got = detect(&["In the final round the HR asked about system design?"]);
        assert_eq!(got.len(), 1);
        // system design sits before onsite and hr in the group order
        assert_eq!(got[0].kind, "system design");
        assert_eq!(got[0].questions.len(), 1);
    }

    #[test]
    fn serializes_kind_as_type() {
        let got = detect(&["Technical round was long."]);
        let json = serde_json::to_value(&got[0]).unwrap();
        assert_eq!(json["type"], "technical");
    }
}
