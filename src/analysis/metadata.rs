//! Company, role and difficulty guesses from an article title and body.

use regex::Regex;
use serde::Serialize;

const TITLE_MARKER: &str = "Interview Experience";

const ROUND_KINDS: &[&str] = &[
    "Online Assessment",
    "Technical",
    "HR",
    "Managerial",
    "Coding",
    "Aptitude",
    "Telephonic",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InferredMetadata {
    pub company: String,
    pub role: String,
    pub rounds_mentioned: Vec<String>,
    pub difficulty: String,
    pub question_mentions: usize,
}

#[derive(Debug, Clone)]
pub struct MetadataInference {
    role: Regex,
    rounds: Vec<(&'static str, Regex)>,
    difficulty: Regex,
    question_marks: Regex,
}

impl MetadataInference {
    pub fn new() -> Result<Self, regex::Error> {
        let rounds = ROUND_KINDS
            .iter()
            .map(|kind| Ok((*kind, Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kind)))?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(MetadataInference {
            role: Regex::new(r"(?i)for ([A-Za-z0-9()+\- ]+)")?,
            rounds,
            difficulty: Regex::new(r"easy|medium|moderate|hard|difficult|tough")?,
            question_marks: Regex::new(r"\bQ\d\b|question[:\-]|\?|solve|implement")?,
        })
    }

    pub fn infer(&self, title: &str, body: &str) -> InferredMetadata {
        InferredMetadata {
            company: company_from_title(title),
            role: self.role_from_title(title),
            rounds_mentioned: self
                .rounds
                .iter()
                .filter(|(_, re)| re.is_match(body))
                .map(|(kind, _)| kind.to_string())
                .collect(),
            difficulty: self
                .difficulty
                .find(&body.to_lowercase())
                .map(|m| normalize_difficulty(m.as_str()).to_string())
                .unwrap_or_default(),
            question_mentions: self.question_marks.find_iter(body).count(),
        }
    }

    fn role_from_title(&self, title: &str) -> String {
        let Some(caps) = self.role.captures(title) else {
            return String::new();
        };
        let role = caps[1].trim();
        // Case folding lets multi-byte letters through the ASCII class, so the
        // cut may not sit on a char boundary.
        let head = role.len().checked_sub(4).and_then(|cut| {
            let (head, tail) = (role.get(..cut)?, role.get(cut..)?);
            tail.eq_ignore_ascii_case("role").then_some(head)
        });
        head.map_or(role, str::trim).to_string()
    }
}

fn company_from_title(title: &str) -> String {
    title
        .split(TITLE_MARKER)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn normalize_difficulty(word: &str) -> &'static str {
    match word {
        "easy" => "Easy",
        "medium" | "moderate" => "Medium",
        _ => "Hard",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(title: &str, body: &str) -> InferredMetadata {
        MetadataInference::new().unwrap().infer(title, body)
    }

    #[test]
    fn company_and_role_from_a_typical_title() {
        let got = infer("Amazon Interview Experience for SDE-1 (On-Campus)", "");
        assert_eq!(got.company, "Amazon");
        assert_eq!(got.role, "SDE-1 (On-Campus)");
    }

    #[test]
    fn trailing_role_word_is_dropped() {
        let got = infer("Flipkart Interview Experience for Backend Developer Role", "");
        assert_eq!(got.role, "Backend Developer");
    }

    #[test]
    fn case_folded_letters_in_role_do_not_split_chars() {
        assert_eq!(infer("Acme Interview Experience for \u{17F}abc", "").role, "\u{17F}abc");
        assert_eq!(infer("Acme Interview Experience for \u{212A}ey", "").role, "\u{212A}ey");
        assert_eq!(
            infer("Acme Interview Experience for \u{17F}DE Role", "").role,
            "\u{17F}DE"
        );
    }

    #[test]
    fn title_without_marker_is_taken_whole() {
        assert_eq!(infer("  My Zoho journey ", "").company, "My Zoho journey");
        assert_eq!(infer("", "").company, "");
        assert_eq!(infer("", "").role, "");
    }

    #[test]
    fn rounds_are_whole_word_and_in_fixed_order() {
        let got = infer("", "Coding test first, then an hr call. Technically it was fine.");
        assert_eq!(got.rounds_mentioned, vec!["HR", "Coding"]);
    }

    #[test]
    fn first_difficulty_word_wins() {
        assert_eq!(infer("", "Overall it was moderate, parts were hard.").difficulty, "Medium");
        assert_eq!(infer("", "Quite TOUGH.").difficulty, "Hard");
        assert_eq!(infer("", "Nothing to report.").difficulty, "");
        // no word boundaries: "hardware" counts
        assert_eq!(infer("", "Lots of hardware talk.").difficulty, "Hard");
    }

    #[test]
    fn question_mentions_count_markers() {
        let got = infer("", "Q1 was to implement LRU. Question: solve two-sum? Q10 skipped.");
        // Q1, implement, solve and "?"; "Question:" is capitalized and Q10 is not Q\d
        assert_eq!(got.question_mentions, 4);
    }
}
