pub mod highlights;
pub mod insights;
pub mod mentions;
pub mod metadata;
pub mod questions;
pub mod rounds;
pub mod sentiment;

use itertools::Itertools;
use regex::Regex;

use insights::InsightExtractor;
use mentions::RoundMentionDetector;
use metadata::MetadataInference;
use questions::QuestionClassifier;
use rounds::RoundSegmenter;

/// Every compiled rule table, built once per run and shared read-only.
#[derive(Debug, Clone)]
pub struct PatternTables {
    pub classifier: QuestionClassifier,
    pub rounds: RoundSegmenter,
    pub insights: InsightExtractor,
    pub mentions: RoundMentionDetector,
    pub metadata: MetadataInference,
}

impl PatternTables {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(PatternTables {
            classifier: QuestionClassifier::new()?,
            rounds: RoundSegmenter::new()?,
            insights: InsightExtractor::new()?,
            mentions: RoundMentionDetector::new()?,
            metadata: MetadataInference::new()?,
        })
    }
}

/// Compile a case-insensitive, word-bounded alternation. Alternatives are
/// tried in list order at each position, so longer phrases that share a
/// prefix with a shorter entry must come first to win.
pub fn word_group(words: &[&str]) -> Result<Regex, regex::Error> {
    let alternation = words.iter().map(|w| regex::escape(w)).join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
}

/// Every non-overlapping match of `re` in `text`, in text order.
pub fn find_all(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Trimmed, non-blank lines in their original order.
pub fn clean_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Upper-case the first letter of every alphabetic run and lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_group_respects_word_boundaries() {
        let re = word_group(&["tree", "hash table"]).unwrap();
        assert_eq!(find_all(&re, "a Tree, a street, a hash table"), vec!["Tree", "hash table"]);
    }

    #[test]
    fn word_group_escapes_metacharacters() {
        let re = word_group(&["ci/cd", "c++"]).unwrap();
        assert!(re.is_match("we set up ci/cd"));
        assert!(!re.is_match("cicd"));
    }

    #[test]
    fn title_case_matches_word_capitalization() {
        assert_eq!(title_case("technical ROUND"), "Technical Round");
        assert_eq!(title_case("hr round - 2nd"), "Hr Round - 2Nd");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn all_tables_compile() {
        assert!(PatternTables::compile().is_ok());
    }

    #[test]
    fn clean_lines_skips_blanks() {
        let lines: Vec<&str> = clean_lines("  a \n\n\t\n b").collect();
        assert_eq!(lines, vec!["a", "b"]);
    }
}
