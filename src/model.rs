use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::analysis::insights::Insights;
use crate::analysis::mentions::RoundMention;
use crate::analysis::metadata::InferredMetadata;
use crate::analysis::questions::CategorizedQuestions;
use crate::analysis::rounds::RoundMap;
use crate::analysis::sentiment::{SentimentLabel, SentimentResult};

/// One input record as submitted or scraped. Every field is optional and
/// unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawExperience {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub content: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub experience: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub verdict: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub difficulty: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub source: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tags: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub interview_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub experience_level: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub preparation_time: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub salary: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub overall_experience: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub tips: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub feedback: Option<String>,

    #[serde(deserialize_with = "lenient_list")]
    pub technical_questions: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub behavioral_questions: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub system_design_questions: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub coding_questions: Vec<String>,
}

impl RawExperience {
    /// The narrative to analyze: `content` when it has text, else `experience`.
    pub fn narrative(&self) -> Option<&str> {
        [&self.content, &self.experience]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
    }

    /// Title as given, or one built from the company.
    pub fn display_title(&self) -> String {
        match non_blank(&self.title) {
            Some(title) => title.to_string(),
            None => {
                let company = non_blank(&self.company).unwrap_or("Unknown Company");
                format!("Interview at {company}")
            }
        }
    }

    pub fn user_data(&self) -> UserData {
        UserData {
            name: or_empty(&self.name),
            email: or_empty(&self.email),
            tags: or_empty(&self.tags),
            interview_type: or_empty(&self.interview_type),
            experience_level: or_empty(&self.experience_level),
            preparation_time: or_empty(&self.preparation_time),
            location: or_empty(&self.location),
            salary: or_empty(&self.salary),
            overall_experience: or_empty(&self.overall_experience),
            tips: or_empty(&self.tips),
            feedback: or_empty(&self.feedback),
        }
    }

    pub fn structured_questions(&self) -> StructuredQuestions {
        StructuredQuestions {
            technical_questions: self.technical_questions.clone(),
            behavioral_questions: self.behavioral_questions.clone(),
            system_design_questions: self.system_design_questions.clone(),
            coding_questions: self.coding_questions.clone(),
        }
    }
}

pub fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts strings, numbers, booleans and arrays of those. Arrays are joined
/// with ", "; null and objects read as absent.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text))
}

/// A list of strings, or a single string treated as a one-item list.
fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
        None => Vec::new(),
    };
    Ok(items
        .into_iter()
        .filter_map(scalar_text)
        .filter(|s| !s.trim().is_empty())
        .collect())
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(items.into_iter().filter_map(scalar_text).join(", ")),
        Value::Null | Value::Object(_) => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub name: String,
    pub email: String,
    pub tags: String,
    pub interview_type: String,
    pub experience_level: String,
    pub preparation_time: String,
    pub location: String,
    pub salary: String,
    pub overall_experience: String,
    pub tips: String,
    pub feedback: String,
}

/// Question lists supplied with the submission. Empty lists are left out of
/// the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuestions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub technical_questions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub behavioral_questions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub system_design_questions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coding_questions: Vec<String>,
}

/// The structured record written for each analyzed experience.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedExperience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub role: String,
    pub verdict: String,
    pub difficulty: String,
    pub source: String,
    pub timestamp: String,
    pub nlp_processed: bool,

    pub sentiment_analysis: SentimentResult,
    pub categorized_questions: CategorizedQuestions,
    pub extracted_insights: Insights,
    pub round_mentions: Vec<RoundMention>,
    pub structured_questions: StructuredQuestions,

    pub original_experience: String,
    pub user_data: UserData,

    pub highlights: Vec<String>,
    pub feedback_sentiment: SentimentLabel,
    pub raw_questions: Vec<String>,
    pub roundwise_questions: RoundMap,
    pub question_count: usize,
    pub inferred: InferredMetadata,
}
