use config::{Config, Environment};
use serde::Deserialize;

use crate::error::PipelineError;

pub const ENV_PREFIX: &str = "INTERVIEW_NLP";

/// Run settings. Defaults can be overridden with `INTERVIEW_NLP_*` variables,
/// e.g. `INTERVIEW_NLP_CHUNK_SIZE=200`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Records handed to the worker pool per batch.
    pub chunk_size: usize,
    pub default_source: String,
    /// Off: topics, technologies and companies stay empty.
    pub entity_extraction: bool,
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            chunk_size: 500,
            default_source: "User Submission".to_string(),
            entity_extraction: true,
            pretty: true,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, PipelineError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    pub fn from_env(env: Environment) -> Result<Self, PipelineError> {
        let defaults = Settings::default();
        let settings: Settings = Config::builder()
            .set_default("chunk_size", defaults.chunk_size as u64)?
            .set_default("default_source", defaults.default_source)?
            .set_default("entity_extraction", defaults.entity_extraction)?
            .set_default("pretty", defaults.pretty)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(Settings {
            chunk_size: settings.chunk_size.max(1),
            ..settings
        })
    }
}
