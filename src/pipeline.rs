//! Per-record orchestration: narrative in, structured record out.

use std::fs;
use std::path::Path;

use chrono::Local;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::analysis::questions::{CategorizedQuestions, QuestionExtractor};
use crate::analysis::{highlights, sentiment, PatternTables};
use crate::error::PipelineError;
use crate::model::{or_empty, ProcessedExperience, RawExperience};
use crate::nlp::NlpToolkit;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingNarrative,
}

#[derive(Debug)]
pub enum RecordOutcome {
    Processed(Box<ProcessedExperience>),
    Skipped(SkipReason),
    Failed(PipelineError),
}

#[derive(Debug)]
pub struct RecordFailure {
    /// Position in the input array.
    pub index: usize,
    pub error: PipelineError,
}

/// Surviving records in input order plus how many were dropped and why.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<ProcessedExperience>,
    pub skipped: usize,
    pub failures: Vec<RecordFailure>,
}

impl BatchReport {
    fn absorb(&mut self, offset: usize, outcomes: Vec<RecordOutcome>) {
        for (i, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                RecordOutcome::Processed(record) => self.processed.push(*record),
                RecordOutcome::Skipped(_) => self.skipped += 1,
                RecordOutcome::Failed(error) => self.failures.push(RecordFailure {
                    index: offset + i,
                    error,
                }),
            }
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn print(&self) {
        println!(
            "Processed {} experiences ({} skipped, {} failed).",
            self.processed.len(),
            self.skipped,
            self.failed(),
        );
        for failure in &self.failures {
            println!("  record {}: {}", failure.index, failure.error);
        }
    }
}

pub struct Pipeline {
    tables: PatternTables,
    toolkit: NlpToolkit,
    questions: QuestionExtractor,
    default_source: String,
}

impl Pipeline {
    pub fn new(settings: &Settings) -> Result<Self, PipelineError> {
        Self::with_toolkit(
            NlpToolkit::heuristic(settings.entity_extraction),
            &settings.default_source,
        )
    }

    pub fn with_toolkit(toolkit: NlpToolkit, default_source: &str) -> Result<Self, PipelineError> {
        Ok(Pipeline {
            tables: PatternTables::compile()?,
            toolkit,
            questions: QuestionExtractor,
            default_source: default_source.to_string(),
        })
    }

    /// Analyze one record. Never panics on bad data; failures come back as
    /// [`RecordOutcome::Failed`].
    pub fn process(&self, index: usize, raw: &RawExperience) -> RecordOutcome {
        let Some(text) = raw.narrative() else {
            debug!(index, id = raw.id.as_deref().unwrap_or(""), "no narrative, skipping");
            return RecordOutcome::Skipped(SkipReason::MissingNarrative);
        };

        match self.analyze(index, raw, text) {
            Ok(record) => RecordOutcome::Processed(Box::new(record)),
            Err(e) => {
                warn!(
                    index,
                    id = raw.id.as_deref().unwrap_or(""),
                    title = raw.title.as_deref().unwrap_or(""),
                    error = %e,
                    "record failed"
                );
                RecordOutcome::Failed(e)
            }
        }
    }

    fn analyze(
        &self,
        index: usize,
        raw: &RawExperience,
        text: &str,
    ) -> Result<ProcessedExperience, PipelineError> {
        let sentences = self
            .toolkit
            .segmenter
            .segment(text)
            .map_err(PipelineError::stage("sentence segmentation"))?;

        let raw_questions: Vec<String> = self
            .questions
            .candidates(&sentences)
            .map(String::from)
            .collect();
        let classified = self
            .tables
            .classifier
            .classify_all(raw_questions.iter().map(String::as_str));
        let roundwise = self.tables.rounds.segment(text);

        let sentiment = sentiment::analyze(text, self.toolkit.polarity.as_ref())
            .map_err(PipelineError::stage("sentiment analysis"))?;
        let insights = self.tables.insights.extract(text, self.toolkit.phrases.as_ref());
        let highlights = highlights::synthesize(&insights, &sentiment);

        let now = Local::now();
        let id = match raw.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => id.to_string(),
            None => format!("exp_{}_{index}", now.format("%Y%m%d_%H%M%S")),
        };
        let source = match raw.source.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(source) => source.to_string(),
            None => self.default_source.clone(),
        };

        Ok(ProcessedExperience {
            id,
            title: raw.display_title(),
            company: or_empty(&raw.company),
            role: or_empty(&raw.role),
            verdict: or_empty(&raw.verdict),
            difficulty: or_empty(&raw.difficulty),
            source,
            timestamp: now.to_rfc3339(),
            nlp_processed: true,
            feedback_sentiment: sentiment.sentiment,
            sentiment_analysis: sentiment,
            categorized_questions: CategorizedQuestions::from_questions(&classified),
            round_mentions: self.tables.mentions.detect(&sentences),
            extracted_insights: insights,
            structured_questions: raw.structured_questions(),
            original_experience: text.to_string(),
            user_data: raw.user_data(),
            highlights,
            raw_questions,
            question_count: roundwise.question_count(),
            roundwise_questions: roundwise,
            inferred: self
                .tables
                .metadata
                .infer(raw.title.as_deref().unwrap_or(""), text),
        })
    }

    #[cfg(feature = "rayon")]
    pub fn process_chunk(&self, offset: usize, chunk: &[RawExperience]) -> Vec<RecordOutcome> {
        chunk
            .par_iter()
            .enumerate()
            .map(|(i, raw)| self.process(offset + i, raw))
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    pub fn process_chunk(&self, offset: usize, chunk: &[RawExperience]) -> Vec<RecordOutcome> {
        chunk
            .iter()
            .enumerate()
            .map(|(i, raw)| self.process(offset + i, raw))
            .collect()
    }

    /// Process every record in chunks, calling `on_chunk` with the size of
    /// each finished chunk.
    pub fn run(
        &self,
        records: &[RawExperience],
        chunk_size: usize,
        mut on_chunk: impl FnMut(usize),
    ) -> BatchReport {
        info!(records = records.len(), chunk_size, "processing batch");
        let chunk_size = chunk_size.max(1);
        let mut report = BatchReport::default();
        for (n, chunk) in records.chunks(chunk_size).enumerate() {
            let offset = n * chunk_size;
            let outcomes = self.process_chunk(offset, chunk);
            report.absorb(offset, outcomes);
            on_chunk(chunk.len());
        }
        info!(
            processed = report.processed.len(),
            skipped = report.skipped,
            failed = report.failed(),
            "batch finished"
        );
        report
    }
}

pub fn load_records(path: &Path) -> Result<Vec<RawExperience>, PipelineError> {
    let raw = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| PipelineError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_records(
    path: &Path,
    records: &[ProcessedExperience],
    pretty: bool,
) -> Result<(), PipelineError> {
    let json = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    fs::write(path, json).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::questions::Category;
    use crate::analysis::sentiment::SentimentLabel;
    use crate::nlp::{
        NlpError, PhrasesAndEntities, PhraseExtractor, PolarityScorer, PolarityScores,
        RuleSegmenter, SentenceSegmenter,
    };

    const FIXTURE: &str = "tests/fixtures/experiences.json";
    const NARRATIVE: &str = "tests/fixtures/narrative.txt";

    fn pipeline() -> Pipeline {
        Pipeline::new(&Settings::default()).unwrap()
    }

    fn with_text(text: &str) -> RawExperience {
        RawExperience {
            id: Some("exp-1".into()),
            title: Some("Amazon Interview Experience for SDE-1".into()),
            company: Some("Amazon".into()),
            content: Some(text.into()),
            ..RawExperience::default()
        }
    }

    fn processed(outcome: RecordOutcome) -> ProcessedExperience {
        match outcome {
            RecordOutcome::Processed(record) => *record,
            other => panic!("expected a processed record, got {other:?}"),
        }
    }

    struct FailingSegmenter;

    impl SentenceSegmenter for FailingSegmenter {
        fn segment(&self, _text: &str) -> Result<Vec<String>, NlpError> {
            Err(NlpError::Unavailable {
                capability: "segmenter",
                reason: "broken".into(),
            })
        }
    }

    struct Neutral;

    impl PolarityScorer for Neutral {
        fn score(&self, _text: &str) -> Result<PolarityScores, NlpError> {
            Ok(PolarityScores::default())
        }
    }

    struct Nothing;

    impl PhraseExtractor for Nothing {
        fn extract(&self, _text: &str) -> Result<PhrasesAndEntities, NlpError> {
            Ok(PhrasesAndEntities::default())
        }
    }

    #[test]
    fn empty_narrative_is_skipped_not_failed() {
        let p = pipeline();
        let records = vec![with_text(""), with_text("   \n "), RawExperience::default()];
        let report = p.run(&records, 2, |_| {});
        assert!(report.processed.is_empty());
        assert_eq!(report.skipped, 3);
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn narrative_from_file_is_fully_analyzed() {
        let text = std::fs::read_to_string(NARRATIVE).unwrap();
        let record = processed(pipeline().process(0, &with_text(&text)));

        assert_eq!(record.id, "exp-1");
        assert_eq!(record.source, "User Submission");
        assert!(record.nlp_processed);
        assert_eq!(record.original_experience, text.as_str());
        assert_eq!(record.feedback_sentiment, record.sentiment_analysis.sentiment);

        let labels: Vec<&str> = record.roundwise_questions.labels().collect();
        assert_eq!(labels, vec!["Online Assessment", "Technical Round", "Hr"]);
        assert_eq!(
            record.roundwise_questions.get("Technical Round").unwrap(),
            [
                "What is the time complexity of merge sort?",
                "Explain how a hash map handles collisions."
            ]
        );
        assert_eq!(record.question_count, record.roundwise_questions.question_count());

        assert!(record
            .categorized_questions
            .get(Category::Technical)
            .contains(&"What is the time complexity of merge sort?".to_string()));
        assert!(record
            .categorized_questions
            .get(Category::Behavioral)
            .iter()
            .any(|q| q.starts_with("Tell me about a time you faced conflict")));

        assert!(record.extracted_insights.technologies.contains(&"Java".to_string()));
        assert!(record.extracted_insights.preparation_tips.contains(&"leetcode".to_string()));
        assert_eq!(record.inferred.company, "Amazon");
        assert_eq!(record.inferred.role, "SDE-1");
        assert!(record.inferred.rounds_mentioned.contains(&"HR".to_string()));
        assert!(!record.highlights.is_empty());
    }

    #[test]
    fn every_raw_question_is_categorized_once() {
        let text = std::fs::read_to_string(NARRATIVE).unwrap();
        let record = processed(pipeline().process(0, &with_text(&text)));
        let total: usize = Category::ALL
            .iter()
            .map(|c| record.categorized_questions.get(*c).len())
            .sum();
        assert_eq!(total, record.raw_questions.len());
    }

    #[test]
    fn same_input_gives_same_output_apart_from_timestamp() {
        let text = std::fs::read_to_string(NARRATIVE).unwrap();
        let p = pipeline();
        let raw = with_text(&text);
        let mut a = serde_json::to_value(processed(p.process(0, &raw))).unwrap();
        let mut b = serde_json::to_value(processed(p.process(0, &raw))).unwrap();
        for v in [&mut a, &mut b] {
            v.as_object_mut().unwrap().remove("timestamp");
        }
        assert_eq!(a, b);
    }

    #[test]
    fn missing_id_is_synthesized_with_index() {
        let mut raw = with_text("What is a deadlock?");
        raw.id = None;
        raw.title = None;
        let record = processed(pipeline().process(7, &raw));
        assert!(record.id.starts_with("exp_"));
        assert!(record.id.ends_with("_7"));
        assert_eq!(record.title, "Interview at Amazon");
    }

    #[test]
    fn capability_failure_fails_only_that_record() {
        let toolkit = NlpToolkit {
            segmenter: Box::new(FailingSegmenter),
            polarity: Box::new(Neutral),
            phrases: Box::new(Nothing),
        };
        let p = Pipeline::with_toolkit(toolkit, "Test").unwrap();
        let records = vec![with_text(""), with_text("What is a deadlock?"), with_text("")];
        let report = p.run(&records, 2, |_| {});
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped, 2);
        assert!(report.processed.is_empty());
        assert_eq!(report.failures[0].index, 1);
        assert!(matches!(report.failures[0].error, PipelineError::Stage { .. }));
    }

    #[test]
    fn non_ascii_role_title_does_not_sink_the_batch() {
        let mut odd = with_text("What is a deadlock?");
        odd.title = Some("Acme Interview Experience for \u{17F}abc".into());
        let records = vec![odd, with_text("How does TCP handle retransmission?")];
        let report = pipeline().run(&records, 10, |_| {});
        assert_eq!(report.failed(), 0);
        assert_eq!(report.processed.len(), 2);
        assert_eq!(report.processed[0].inferred.role, "\u{17F}abc");
        assert_eq!(report.processed[1].inferred.role, "SDE-1");
    }

    #[test]
    fn swapped_capabilities_are_used() {
        let toolkit = NlpToolkit {
            segmenter: Box::new(RuleSegmenter),
            polarity: Box::new(Neutral),
            phrases: Box::new(Nothing),
        };
        let p = Pipeline::with_toolkit(toolkit, "Test").unwrap();
        let record = processed(p.process(0, &with_text("It was great! Amazing panel.")));
        assert_eq!(record.sentiment_analysis.sentiment, SentimentLabel::Neutral);
        assert_eq!(record.source, "Test");
    }

    #[test]
    fn fixture_batch_keeps_input_order() {
        let records = load_records(Path::new(FIXTURE)).unwrap();
        let mut chunks = Vec::new();
        let report = pipeline().run(&records, 2, |n| chunks.push(n));
        assert_eq!(chunks.iter().sum::<usize>(), records.len());
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed(), 0);
        let ids: Vec<&str> = report.processed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["gfg-101", "42", "sub-7"]);
        // "experience" is used when "content" is absent
        assert!(report.processed[2].original_experience.starts_with("Applied through"));
    }

    #[test]
    fn malformed_input_is_reported_with_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("malformed.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedInput { path: ref p, .. } if *p == path));
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let err = load_records(Path::new("tests/fixtures/does-not-exist.json")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }

    #[test]
    fn written_output_is_a_json_array() {
        let records = load_records(Path::new(FIXTURE)).unwrap();
        let report = pipeline().run(&records, 500, |_| {});
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("output.json");
        write_records(&path, &report.processed, false).unwrap();

        let back: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let items = back.as_array().unwrap();
        assert_eq!(items.len(), report.processed.len());
        assert_eq!(items[0]["nlp_processed"], true);
        assert!(items[0]["categorized_questions"]["system_design"].is_array());
    }
}
