//! Language capabilities the analysis stages depend on.
//!
//! Each capability is a small trait so a heavier backend can replace the
//! heuristic defaults without touching the pipeline. Implementations must be
//! deterministic: the same text always yields the same output.

pub mod phrases;
pub mod polarity;
pub mod sentences;

use serde::Serialize;
use thiserror::Error;

pub use phrases::HeuristicChunker;
pub use polarity::LexiconScorer;
pub use sentences::RuleSegmenter;

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("{capability} unavailable: {reason}")]
    Unavailable {
        capability: &'static str,
        reason: String,
    },
}

/// Splits narrative text into ordered sentences.
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Result<Vec<String>, NlpError>;
}

/// Scores the overall polarity of a text.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<PolarityScores, NlpError>;
}

/// Finds noun phrases and typed named entities.
pub trait PhraseExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<PhrasesAndEntities, NlpError>;
}

/// Polarity breakdown. `compound` is in [-1, 1]; the other three are
/// proportions that sum to roughly 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Organization,
    Product,
    Place,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub kind: EntityKind,
}

#[derive(Debug, Clone, Default)]
pub struct PhrasesAndEntities {
    pub noun_phrases: Vec<String>,
    pub entities: Vec<Entity>,
}

/// Stand-in used when entity recognition is switched off. Every call reports
/// the capability as unavailable so callers take their degraded path.
pub struct NoEntities;

impl PhraseExtractor for NoEntities {
    fn extract(&self, _text: &str) -> Result<PhrasesAndEntities, NlpError> {
        Err(NlpError::Unavailable {
            capability: "entity recognition",
            reason: "disabled by configuration".to_string(),
        })
    }
}

/// The set of capabilities one pipeline instance runs with.
pub struct NlpToolkit {
    pub segmenter: Box<dyn SentenceSegmenter>,
    pub polarity: Box<dyn PolarityScorer>,
    pub phrases: Box<dyn PhraseExtractor>,
}

impl NlpToolkit {
    pub fn heuristic(entity_extraction: bool) -> Self {
        NlpToolkit {
            segmenter: Box::new(RuleSegmenter),
            polarity: Box::new(LexiconScorer::new()),
            phrases: if entity_extraction {
                Box::new(HeuristicChunker::new())
            } else {
                Box::new(NoEntities)
            },
        }
    }
}
