//! Noun-phrase chunking and entity typing without a language model.
//!
//! Chunks are maximal runs of content words between punctuation and function
//! words; a leading determiner is kept. Entities come from small gazetteers,
//! with unknown all-caps acronyms typed as organizations.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::sentences::split_sentences;
use super::{Entity, EntityKind, NlpError, PhraseExtractor, PhrasesAndEntities};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9][A-Za-z0-9+#./\-]*[A-Za-z0-9+#]|[A-Za-z0-9]").unwrap()
});

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "my", "our", "your", "their", "his", "her", "its", "this", "that", "these",
    "those", "some", "any", "each", "every", "few", "several", "many", "two", "three",
];

/// Function words and common narrative verbs that end a chunk.
const BREAKERS: &[&str] = &[
    "i", "me", "we", "us", "you", "he", "him", "she", "they", "them", "it", "who", "whom",
    "which", "what", "when", "where", "why", "how", "whose", "and", "or", "but", "so", "if",
    "then", "than", "because", "while", "after", "before", "since", "until", "about", "above",
    "across", "against", "along", "among", "around", "as", "at", "by", "during", "for", "from",
    "in", "into", "like", "near", "of", "off", "on", "onto", "out", "over", "per", "through",
    "to", "toward", "under", "up", "upon", "via", "with", "within", "without", "is", "are", "was",
    "were", "be", "been", "being", "am", "have", "has", "had", "having", "do", "does", "did",
    "doing", "done", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "not", "no", "yes", "also", "just", "very", "too", "only", "all", "both", "more", "most",
    "other", "such", "own", "same", "again", "once", "here", "there", "now", "ask",
    "asks", "get", "gets", "got", "give", "gave", "given", "go", "goes", "went", "gone", "make",
    "made", "take", "took", "taken", "tell", "told", "say", "said", "explain", "write", "wrote",
    "written", "solve", "think", "thought", "know", "knew", "come", "came", "start", "began",
    "begin", "felt", "feel", "keep", "kept", "let", "see", "saw", "seen", "use", "need",
    "implement", "discuss", "describe", "clear", "cleared", "mine", "yours", "ours", "theirs",
    "overall", "finally", "next", "later", "first", "second", "third", "last", "well", "really",
];

const PRODUCTS: &[&str] = &[
    "java", "python", "c", "c++", "c#", "javascript", "typescript", "golang", "go", "rust",
    "kotlin", "swift", "scala", "ruby", "php", "r", "sql", "mysql", "postgresql", "postgres",
    "mongodb", "redis", "cassandra", "dynamodb", "kafka", "rabbitmq", "elasticsearch", "docker",
    "kubernetes", "aws", "azure", "gcp", "linux", "unix", "windows", "git", "github", "gitlab",
    "jenkins", "react", "angular", "vue", "node.js", "nodejs", "express", "spring", "springboot",
    "django", "flask", "fastapi", "hibernate", "html", "css", "hadoop", "spark", "tensorflow",
    "pytorch", "pandas", "numpy", "excel", "tableau", "android", "ios", "graphql", "leetcode",
    "hackerrank", "hackerearth", "codility", "codechef", "codeforces", "geeksforgeeks",
    "interviewbit", "mettl", "hirepro",
];

const ORGANIZATIONS: &[&str] = &[
    "google", "amazon", "microsoft", "meta", "facebook", "apple", "netflix", "uber", "adobe",
    "oracle", "ibm", "intel", "nvidia", "samsung", "cisco", "qualcomm", "salesforce", "atlassian",
    "linkedin", "twitter", "paypal", "visa", "mastercard", "walmart", "flipkart", "paytm",
    "swiggy", "zomato", "ola", "myntra", "phonepe", "razorpay", "infosys", "tcs", "wipro",
    "accenture", "cognizant", "capgemini", "deloitte", "hcl", "zoho", "freshworks", "juspay",
    "goldman sachs", "morgan stanley", "jp morgan", "jpmorgan", "de shaw", "barclays",
    "american express", "bank of america", "tower research",
];

const PLACES: &[&str] = &[
    "india", "usa", "uk", "canada", "germany", "singapore", "ireland", "bangalore", "bengaluru",
    "hyderabad", "pune", "chennai", "mumbai", "delhi", "noida", "gurgaon", "gurugram", "kolkata",
    "ahmedabad", "london", "seattle", "dublin", "new york", "san francisco", "bay area",
];

/// Acronyms common in interview write-ups that are not entities.
const COMMON_ACRONYMS: &[&str] = &[
    "i", "hr", "oa", "sde", "sde1", "sde2", "dsa", "gd", "pi", "cv", "cgpa", "gpa", "mcq", "mcqs",
    "tpo", "ppt", "ppo", "oops", "oop", "dbms", "os", "cn", "btech", "mtech", "ctc", "lpa", "faq",
    "ok", "tr", "mr", "qa", "api", "apis",
];

const MAX_GAZETTEER_WORDS: usize = 3;

#[derive(Debug, Clone)]
pub struct HeuristicChunker {
    gazetteer: HashMap<String, EntityKind>,
}

struct Token<'a> {
    text: &'a str,
    lower: String,
    /// Punctuation separates this token from the previous one.
    boundary_before: bool,
}

impl HeuristicChunker {
    pub fn new() -> Self {
        let mut gazetteer = HashMap::new();
        for (words, kind) in [
            (PRODUCTS, EntityKind::Product),
            (ORGANIZATIONS, EntityKind::Organization),
            (PLACES, EntityKind::Place),
        ] {
            for w in words {
                gazetteer.insert(w.to_string(), kind);
            }
        }
        HeuristicChunker { gazetteer }
    }

    pub fn analyze(&self, text: &str) -> PhrasesAndEntities {
        let mut out = PhrasesAndEntities::default();
        for sentence in split_sentences(text) {
            let tokens = tokenize(&sentence);
            out.noun_phrases.extend(noun_phrases(&tokens));
            out.entities.extend(self.entities(&tokens));
        }
        out
    }

    fn entities(&self, tokens: &[Token]) -> Vec<Entity> {
        let mut found = Vec::new();
        let mut i = 0;
        'scan: while i < tokens.len() {
            // Longest gazetteer match first.
            for width in (1..=MAX_GAZETTEER_WORDS.min(tokens.len() - i)).rev() {
                let span = &tokens[i..i + width];
                if span[1..].iter().any(|t| t.boundary_before) {
                    continue;
                }
                let key = span.iter().map(|t| t.lower.as_str()).collect::<Vec<_>>().join(" ");
                let Some(&kind) = self.gazetteer.get(&key) else {
                    continue;
                };
                // Single letters ("C", "R") only count when written in uppercase.
                if key.len() == 1 && !span[0].text.chars().all(|c| c.is_uppercase()) {
                    continue;
                }
                // "go" is far more often the verb.
                if key == "go" && span[0].text != "Go" {
                    continue;
                }
                let text = span.iter().map(|t| t.text).collect::<Vec<_>>().join(" ");
                found.push(Entity { text, kind });
                i += width;
                continue 'scan;
            }

            let token = &tokens[i];
            if is_acronym(token.text) && !COMMON_ACRONYMS.contains(&token.lower.as_str()) {
                found.push(Entity {
                    text: token.text.to_string(),
                    kind: EntityKind::Organization,
                });
            }
            i += 1;
        }
        found
    }
}

impl Default for HeuristicChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseExtractor for HeuristicChunker {
    fn extract(&self, text: &str) -> Result<PhrasesAndEntities, NlpError> {
        Ok(self.analyze(text))
    }
}

fn tokenize(sentence: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last_end = 0;
    for m in TOKEN_RE.find_iter(sentence) {
        let gap = &sentence[last_end..m.start()];
        tokens.push(Token {
            text: m.as_str(),
            lower: m.as_str().to_lowercase(),
            boundary_before: gap.chars().any(|c| !c.is_whitespace()),
        });
        last_end = m.end();
    }
    tokens
}

fn noun_phrases(tokens: &[Token]) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut has_head = false;

    let mut flush = |current: &mut Vec<&str>, has_head: &mut bool| {
        if *has_head {
            phrases.push(current.join(" "));
        }
        current.clear();
        *has_head = false;
    };

    for (i, token) in tokens.iter().enumerate() {
        if token.boundary_before {
            flush(&mut current, &mut has_head);
        }
        let lower = token.lower.as_str();
        if DETERMINERS.contains(&lower) {
            flush(&mut current, &mut has_head);
            current.push(token.text);
        } else if is_breaker(lower) || (is_participle(lower) && !modifies_next(tokens, i)) {
            flush(&mut current, &mut has_head);
        } else {
            current.push(token.text);
            has_head = true;
        }
    }
    flush(&mut current, &mut has_head);
    phrases
}

fn is_breaker(lower: &str) -> bool {
    BREAKERS.contains(&lower)
        || lower.chars().all(|c| c.is_ascii_digit())
        || (lower.len() > 4 && lower.ends_with("ly"))
}

fn is_participle(lower: &str) -> bool {
    lower.len() > 4 && lower.ends_with("ed")
}

/// "-ed" words stay in a chunk only as modifiers: "linked list", "sorted array".
fn modifies_next(tokens: &[Token], i: usize) -> bool {
    tokens.get(i + 1).is_some_and(|next| {
        !next.boundary_before
            && !DETERMINERS.contains(&next.lower.as_str())
            && !is_breaker(&next.lower)
            && !is_participle(&next.lower)
    })
}

fn is_acronym(text: &str) -> bool {
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    (2..=6).contains(&letters)
        && text.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker() -> HeuristicChunker {
        HeuristicChunker::new()
    }

    #[test]
    fn chunks_keep_determiners_and_stop_at_verbs() {
        let out = chunker().analyze("They asked me to implement a binary search tree.");
        assert_eq!(out.noun_phrases, vec!["a binary search tree"]);
    }

    #[test]
    fn punctuation_ends_a_chunk() {
        let out = chunker().analyze("Topics: arrays, linked lists, dynamic programming.");
        assert_eq!(
            out.noun_phrases,
            vec!["Topics", "arrays", "linked lists", "dynamic programming"]
        );
    }

    #[test]
    fn determiner_alone_is_not_a_phrase() {
        let out = chunker().analyze("I liked that.");
        assert!(out.noun_phrases.is_empty());
    }

    #[test]
    fn gazetteer_entities_are_typed() {
        let out = chunker().analyze("I interviewed at Goldman Sachs in Bangalore using Java and Docker.");
        let kinds: Vec<(&str, EntityKind)> =
            out.entities.iter().map(|e| (e.text.as_str(), e.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("Goldman Sachs", EntityKind::Organization),
                ("Bangalore", EntityKind::Place),
                ("Java", EntityKind::Product),
                ("Docker", EntityKind::Product),
            ]
        );
    }

    #[test]
    fn unknown_acronyms_become_organizations_but_common_ones_do_not() {
        let out = chunker().analyze("The HR round at TCS had a DSA part and questions on REST.");
        let texts: Vec<&str> = out.entities.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["TCS", "REST"]);
    }

    #[test]
    fn lowercase_go_is_not_a_language() {
        let out = chunker().analyze("We can go ahead, said the interviewer. I used Go for it.");
        let texts: Vec<&str> = out.entities.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Go"]);
    }

    #[test]
    fn symbols_inside_technology_names_survive() {
        let out = chunker().analyze("Questions on C++ and Node.js were asked.");
        let texts: Vec<&str> = out.entities.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["C++", "Node.js"]);
    }
}
