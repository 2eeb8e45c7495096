use super::{NlpError, SentenceSegmenter};

/// Words that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "etc.", "vs.", "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "inc.",
    "ltd.", "co.", "approx.", "dept.", "no.", "st.", "min.", "hr.", "hrs.", "jan.", "feb.", "aug.",
    "sept.", "oct.", "nov.", "dec.",
];

const TERMINATORS: &[char] = &['.', '!', '?'];
const CLOSERS: &[char] = &['.', '!', '?', '"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

/// Rule-based splitter: every non-blank line is a unit, and lines are further
/// cut after `.`, `!` or `?` followed by whitespace.
///
/// A period does not end a sentence after a known abbreviation or a single
/// initial, or when the next word starts in lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSegmenter;

impl SentenceSegmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, NlpError> {
        Ok(split_sentences(text))
    }
}

pub fn split_sentences(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .flat_map(split_line)
        .collect()
}

fn split_line(line: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (_, c) = chars[i];
        if !TERMINATORS.contains(&c) {
            i += 1;
            continue;
        }

        // Absorb "?!", "...", closing quotes and brackets.
        let mut j = i + 1;
        while j < chars.len() && CLOSERS.contains(&chars[j].1) {
            j += 1;
        }
        if j >= chars.len() || !chars[j].1.is_whitespace() {
            i = j;
            continue;
        }

        let end = chars[j].0;
        let mut next = j;
        while next < chars.len() && chars[next].1.is_whitespace() {
            next += 1;
        }
        let Some(&(next_start, next_char)) = chars.get(next) else {
            break;
        };

        let candidate = &line[start..end];
        let period_only = c == '.' && !candidate.ends_with("..");
        if period_only && (ends_with_abbreviation(candidate) || next_char.is_lowercase()) {
            i = next;
            continue;
        }

        push_trimmed(&mut sentences, candidate);
        start = next_start;
        i = next;
    }

    push_trimmed(&mut sentences, &line[start..]);
    sentences
}

fn push_trimmed(out: &mut Vec<String>, s: &str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
}

fn ends_with_abbreviation(candidate: &str) -> bool {
    let Some(last) = candidate.split_whitespace().last() else {
        return false;
    };
    let last = last
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if ABBREVIATIONS.contains(&last.as_str()) {
        return true;
    }
    // Single initial such as "J." in "J. Smith".
    let mut letters = last.chars();
    matches!(
        (letters.next(), letters.next(), letters.next()),
        (Some(a), Some('.'), None) if a.is_alphabetic()
    )
}
