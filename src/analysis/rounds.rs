//! Line-oriented round segmentation.
//!
//! Lines are walked in order with a running "current round". Header lines
//! switch the current round; surviving question-like lines are filed under it.

use regex::Regex;
use serde::ser::{Serialize, Serializer};

use super::{clean_lines, title_case};

pub const GENERAL: &str = "General";

const ROUND_PHRASES: &[&str] = &[
    "technical round",
    "hr round",
    "coding round",
    "managerial round",
    "aptitude round",
    "gd round",
];

const NOISE_PREFIXES: &[&str] = &["the", "this round", "it was", "duration"];

const INTERROGATIVE_STEMS: &[&str] = &[
    "what", "why", "how", "could", "do", "explain", "when", "which", "are", "did", "describe",
    "have", "name",
];

const MIN_LINE_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub label: String,
    /// First-seen order among the emitted rounds, starting at 0.
    pub position: usize,
    pub questions: Vec<String>,
}

/// Rounds in first-seen order. Serializes as a label -> questions map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundMap {
    rounds: Vec<Round>,
}

impl RoundMap {
    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.rounds
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.questions.as_slice())
    }

    #[cfg(test)]
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rounds.iter().map(|r| r.label.as_str())
    }

    #[cfg(test)]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn question_count(&self) -> usize {
        self.rounds.iter().map(|r| r.questions.len()).sum()
    }

    fn select(&mut self, label: &str) -> usize {
        if let Some(idx) = self.rounds.iter().position(|r| r.label == label) {
            return idx;
        }
        self.rounds.push(Round {
            label: label.to_string(),
            position: self.rounds.len(),
            questions: Vec::new(),
        });
        self.rounds.len() - 1
    }

    /// Drop the implicit bucket when nothing landed in it and renumber.
    fn finish(mut self) -> Self {
        self.rounds
            .retain(|r| r.label != GENERAL || !r.questions.is_empty());
        for (position, round) in self.rounds.iter_mut().enumerate() {
            round.position = position;
        }
        self
    }
}

impl Serialize for RoundMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.rounds.iter().map(|r| (&r.label, &r.questions)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    /// Switches the current round. `None` asks for a synthesized label.
    Header(Option<String>),
    Question,
    Noise,
}

#[derive(Debug, Clone)]
pub struct RoundSegmenter {
    header: Regex,
}

impl RoundSegmenter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(RoundSegmenter {
            header: Regex::new(r"(?i)^round\b\s*#?\s*(\d+)?\s*([:.\-\x{2013})]*)\s*(.*)$")?,
        })
    }

    pub fn segment(&self, text: &str) -> RoundMap {
        let mut map = RoundMap::default();
        let mut current = map.select(GENERAL);
        let mut rounds_seen = 0;

        for line in clean_lines(text) {
            match self.classify(line) {
                LineKind::Header(label) => {
                    rounds_seen += 1;
                    let label = label.unwrap_or_else(|| format!("Round {rounds_seen}"));
                    current = map.select(&label);
                }
                LineKind::Question => map.rounds[current].questions.push(line.to_string()),
                LineKind::Noise => {}
            }
        }
        map.finish()
    }

    fn classify(&self, line: &str) -> LineKind {
        if let Some(label) = self.header_label(line) {
            return LineKind::Header(label);
        }

        let lower = line.to_lowercase();
        if ROUND_PHRASES.iter().any(|p| lower.contains(p)) {
            return LineKind::Header(Some(title_case(line)));
        }

        if is_noise(line, &lower) {
            LineKind::Noise
        } else {
            LineKind::Question
        }
    }

    /// `Some(None)` for a bare header such as "Round 3", `Some(Some(label))`
    /// when the header carries a name, `None` when the line is not a header.
    fn header_label(&self, line: &str) -> Option<Option<String>> {
        let caps = self.header.captures(line)?;
        let numbered = caps.get(1).is_some();
        let separated = caps
            .get(2)
            .is_some_and(|m| m.as_str().contains([':', '-', '\u{2013}']));
        let rest = caps.get(3).map_or("", |m| m.as_str());
        let rest = rest.trim_end_matches(|c: char| c == ':' || c == '-' || c.is_whitespace());

        if !(numbered || separated || rest.is_empty()) {
            return None;
        }
        Some((!rest.is_empty()).then(|| title_case(rest)))
    }
}

fn is_noise(line: &str, lower: &str) -> bool {
    if line.chars().count() < MIN_LINE_CHARS {
        return true;
    }
    if NOISE_PREFIXES.iter().any(|p| lower.starts_with(p)) || line.ends_with(':') {
        return true;
    }
    let asks = line.ends_with('?') || INTERROGATIVE_STEMS.iter().any(|s| lower.starts_with(s));
    !asks
}
