use itertools::Itertools;
use serde::Serialize;

use crate::analysis::questions::Category;
use crate::analysis::sentiment::SentimentLabel;
use crate::model::ProcessedExperience;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentSpread {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

/// Aggregate view over one processed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub companies: Vec<String>,
    pub roles: Vec<String>,
    pub difficulties: Vec<String>,
    pub verdicts: Vec<String>,
    pub sentiment: SentimentSpread,
    pub question_count: usize,
    pub categories: Vec<(Category, usize)>,
}

impl RunSummary {
    pub fn from_records(records: &[ProcessedExperience]) -> Self {
        let labels = records.iter().map(|r| r.feedback_sentiment).counts();
        let spread = |label: SentimentLabel| labels.get(&label).copied().unwrap_or(0);

        RunSummary {
            total: records.len(),
            companies: distinct(records.iter().map(|r| r.company.as_str())),
            roles: distinct(records.iter().map(|r| r.role.as_str())),
            difficulties: distinct(records.iter().map(|r| r.difficulty.as_str())),
            verdicts: distinct(records.iter().map(|r| r.verdict.as_str())),
            sentiment: SentimentSpread {
                positive: spread(SentimentLabel::Positive),
                negative: spread(SentimentLabel::Negative),
                neutral: spread(SentimentLabel::Neutral),
            },
            question_count: records.iter().map(|r| r.raw_questions.len()).sum(),
            categories: Category::ALL
                .iter()
                .map(|c| {
                    let n: usize = records
                        .iter()
                        .map(|r| r.categorized_questions.get(*c).len())
                        .sum();
                    (*c, n)
                })
                .collect(),
        }
    }

    pub fn print(&self) {
        println!("\n--- Summary ---");
        println!("Experiences:  {}", self.total);
        println!("Companies:    {}", list_or_dash(&self.companies));
        println!("Roles:        {}", list_or_dash(&self.roles));
        println!("Difficulties: {}", list_or_dash(&self.difficulties));
        println!("Verdicts:     {}", list_or_dash(&self.verdicts));
        println!(
            "Sentiment:    {} positive, {} negative, {} neutral",
            self.sentiment.positive, self.sentiment.negative, self.sentiment.neutral
        );
        println!("Questions:    {}", self.question_count);
        for (category, n) in &self.categories {
            println!("  {:<14} {:>5}", category.as_str(), n);
        }
    }
}

/// Non-blank values in first-seen order, without repeats.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unique()
        .map(String::from)
        .collect()
}

fn list_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::pipeline::{load_records, Pipeline};
    use crate::settings::Settings;

    fn fixture_summary() -> RunSummary {
        let records = load_records(Path::new("tests/fixtures/experiences.json")).unwrap();
        let report = Pipeline::new(&Settings::default())
            .unwrap()
            .run(&records, 500, |_| {});
        RunSummary::from_records(&report.processed)
    }

    #[test]
    fn distinct_values_skip_blanks_and_repeats() {
        let got = distinct(["Zoho", "", "Amazon", " Zoho ", "  "].into_iter());
        assert_eq!(got, vec!["Zoho", "Amazon"]);
    }

    #[test]
    fn fixture_batch_summary() {
        let s = fixture_summary();
        assert_eq!(s.total, 3);
        assert_eq!(s.companies, vec!["Zoho", "Google"]);
        assert_eq!(s.verdicts, vec!["Selected"]);
        assert_eq!(s.sentiment.positive + s.sentiment.negative + s.sentiment.neutral, 3);
        let categorized: usize = s.categories.iter().map(|(_, n)| n).sum();
        assert_eq!(categorized, s.question_count);
    }

    #[test]
    fn empty_batch() {
        let s = RunSummary::from_records(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.sentiment, SentimentSpread::default());
        assert!(s.categories.iter().all(|(_, n)| *n == 0));
    }
}
