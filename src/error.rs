use std::path::PathBuf;

use thiserror::Error;

use crate::nlp::NlpError;

/// Failures surfaced by the pipeline, either for a whole run or for one record.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input in {path:?}: {source}")]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid pattern table: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{stage} failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: NlpError,
    },
}

impl PipelineError {
    pub fn stage(stage: &'static str) -> impl FnOnce(NlpError) -> Self {
        move |source| PipelineError::Stage { stage, source }
    }
}
