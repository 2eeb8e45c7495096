//! Question extraction and rule-based categorization.
//!
//! A category's score is the number of pattern matches in the lowercased
//! question, summed over its pattern groups. Categories are visited in
//! priority order and only a strictly greater score takes over, so ties go to
//! the earlier category.

use regex::Regex;
use serde::Serialize;

use super::word_group;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Technical,
    Behavioral,
    SystemDesign,
    Coding,
    Other,
}

impl Category {
    /// Scored categories in tie-break priority order. `Other` is the fallback.
    pub const PRIORITY: [Category; 4] = [
        Category::Technical,
        Category::Behavioral,
        Category::SystemDesign,
        Category::Coding,
    ];

    pub const ALL: [Category; 5] = [
        Category::Technical,
        Category::Behavioral,
        Category::SystemDesign,
        Category::Coding,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::Behavioral => "behavioral",
            Category::SystemDesign => "system_design",
            Category::Coding => "coding",
            Category::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedQuestion {
    pub text: String,
    pub category: Category,
}

/// Questions grouped by category, each list in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorizedQuestions {
    pub technical: Vec<String>,
    pub behavioral: Vec<String>,
    pub system_design: Vec<String>,
    pub coding: Vec<String>,
    pub other: Vec<String>,
}

impl CategorizedQuestions {
    pub fn from_questions(questions: &[ExtractedQuestion]) -> Self {
        let mut grouped = CategorizedQuestions::default();
        for q in questions {
            grouped.bucket_mut(q.category).push(q.text.clone());
        }
        grouped
    }

    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Technical => &self.technical,
            Category::Behavioral => &self.behavioral,
            Category::SystemDesign => &self.system_design,
            Category::Coding => &self.coding,
            Category::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Technical => &mut self.technical,
            Category::Behavioral => &mut self.behavioral,
            Category::SystemDesign => &mut self.system_design,
            Category::Coding => &mut self.coding,
            Category::Other => &mut self.other,
        }
    }
}

const CUE_WORDS: &[&str] = &[
    "asked", "question", "what", "how", "why", "when", "where", "which", "who",
];

/// Picks question-like sentences: ones ending in `?` or containing a cue word
/// anywhere (substring match, so "show" carries "how").
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionExtractor;

impl QuestionExtractor {
    pub fn is_candidate(&self, sentence: &str) -> bool {
        if sentence.ends_with('?') {
            return true;
        }
        let lower = sentence.to_lowercase();
        CUE_WORDS.iter().any(|cue| lower.contains(cue))
    }

    /// Lazily yields candidates. Calling again (or cloning the iterator)
    /// restarts from the first sentence.
    pub fn candidates<'a>(
        &'a self,
        sentences: &'a [String],
    ) -> impl Iterator<Item = &'a str> + Clone + 'a {
        sentences
            .iter()
            .map(|s| s.trim())
            .filter(move |s| !s.is_empty() && self.is_candidate(s))
    }
}

const TECHNICAL_TOPICS: &[&str] = &[
    "algorithm", "data structure", "complexity", "optimization", "performance", "scalability",
    "database", "api", "framework", "library", "language", "syntax", "debugging", "testing",
    "deployment", "architecture", "design pattern", "microservices", "distributed system",
    "concurrency", "threading", "memory", "garbage collection", "network", "protocol",
    "security", "authentication", "authorization", "encryption", "hashing", "caching",
    "load balancing", "monitoring", "logging", "metrics", "observability",
];

const TECHNICAL_ACTIONS: &[&str] = &[
    "implement", "code", "write", "solve", "optimize", "design", "build", "create", "develop",
    "program", "script", "function", "class", "method", "variable", "loop", "recursion",
    // "sort" alone keeps "merge sort" questions from tipping to coding.
    "sort", "sorting", "searching", "graph", "tree", "array",
    "linked list", "stack", "queue", "heap", "hash table", "binary search", "dynamic programming",
    "greedy", "backtracking", "divide and conquer",
];

const BEHAVIORAL_THEMES: &[&str] = &[
    "experience", "project", "team", "leadership", "conflict", "challenge", "problem", "solution",
    "collaboration", "communication", "feedback", "mentor", "mentee", "growth", "learning",
    "improvement", "goal", "achievement", "failure", "success", "stress", "pressure", "deadline",
    "priority", "decision", "risk", "innovation", "creativity", "adaptability", "flexibility",
    "resilience", "perseverance",
];

const BEHAVIORAL_PROMPTS: &[&str] = &[
    "tell me about", "describe", "explain", "how did you", "what would you", "situation",
    "example", "instance", "time when", "handled", "managed", "resolved", "overcame", "learned",
    "grew", "developed", "improved", "changed", "adapted", "flexed", "resilient", "persevered",
];

const SYSTEM_DESIGN_CONCEPTS: &[&str] = &[
    "system", "architecture", "design", "scale", "scalability", "performance", "throughput",
    "latency", "availability", "reliability", "fault tolerance", "redundancy", "load balancing",
    "caching", "database", "storage", "network", "distributed", "microservices", "monolith",
    "api", "rest", "graphql", "message queue", "event streaming", "real-time",
    "batch processing", "data pipeline", "etl", "data warehouse", "data lake",
    "machine learning", "ai", "ml", "recommendation", "search", "notification", "payment",
    "authentication", "authorization", "monitoring", "logging", "metrics", "alerting",
    "deployment", "ci/cd", "container", "docker", "kubernetes", "cloud", "aws", "azure", "gcp",
];

const SYSTEM_DESIGN_ACTIONS: &[&str] = &[
    "design a", "build a", "create a", "architect", "scale to", "handle", "support", "serve",
    "process", "store", "retrieve", "search", "recommend", "notify", "authenticate", "authorize",
    "monitor", "log", "alert", "deploy", "containerize", "orchestrate", "manage", "operate",
    "maintain", "upgrade", "migrate", "backup", "recovery", "disaster", "failover", "replication",
    "sharding", "partitioning", "indexing", "compression", "encryption", "deduplication",
    "archiving", "tiering",
];

const CODING_CRAFT: &[&str] = &[
    "code", "program", "implement", "write", "solve", "algorithm", "data structure",
    "complexity", "time complexity", "space complexity", "optimization", "performance",
    "efficiency", "correctness", "edge case", "test case", "unit test", "integration test",
    "debug", "fix", "refactor", "clean code", "readable", "maintainable", "documentation",
    "comment", "naming", "function", "class", "method", "variable", "type", "interface",
    "inheritance", "polymorphism", "encapsulation", "abstraction", "design pattern",
    "solid principles", "dry", "kiss", "yagni",
];

const CODING_PRACTICE: &[&str] = &[
    "leetcode", "hackerrank", "codility", "topcoder", "competitive programming",
    "interview question", "coding challenge", "whiteboard", "pair programming", "code review",
    "pull request", "merge", "conflict", "version control", "git", "branch", "commit", "push",
    "pull", "rebase", "stash", "reset", "checkout", "log", "diff", "blame", "tag", "release",
    "hotfix", "feature", "bugfix",
];

/// Per-category pattern groups, compiled once and held in priority order.
#[derive(Debug, Clone)]
pub struct QuestionClassifier {
    groups: Vec<(Category, Vec<Regex>)>,
}

impl QuestionClassifier {
    pub fn new() -> Result<Self, regex::Error> {
        let table: [(Category, &[&[&str]]); 4] = [
            (Category::Technical, &[TECHNICAL_TOPICS, TECHNICAL_ACTIONS]),
            (Category::Behavioral, &[BEHAVIORAL_THEMES, BEHAVIORAL_PROMPTS]),
            (Category::SystemDesign, &[SYSTEM_DESIGN_CONCEPTS, SYSTEM_DESIGN_ACTIONS]),
            (Category::Coding, &[CODING_CRAFT, CODING_PRACTICE]),
        ];
        let groups = table
            .into_iter()
            .map(|(category, lists)| {
                let compiled = lists
                    .iter()
                    .map(|words| word_group(words))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((category, compiled))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        debug_assert!(groups.iter().map(|(c, _)| *c).eq(Category::PRIORITY));
        Ok(QuestionClassifier { groups })
    }

    #[cfg(test)]
    pub fn score(&self, category: Category, question: &str) -> usize {
        let lowered = question.to_lowercase();
        self.groups
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, patterns)| count_matches(patterns, &lowered))
            .unwrap_or(0)
    }

    pub fn classify(&self, question: &str) -> Category {
        let lowered = question.to_lowercase();
        let mut best = Category::Other;
        let mut max_score = 0;
        for (category, patterns) in &self.groups {
            let score = count_matches(patterns, &lowered);
            if score > max_score {
                max_score = score;
                best = *category;
            }
        }
        best
    }

    pub fn classify_all<'a, I>(&self, questions: I) -> Vec<ExtractedQuestion>
    where
        I: IntoIterator<Item = &'a str>,
    {
        questions
            .into_iter()
            .map(|q| ExtractedQuestion {
                text: q.to_string(),
                category: self.classify(q),
            })
            .collect()
    }
}

fn count_matches(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|re| re.find_iter(text).count()).sum()
}
