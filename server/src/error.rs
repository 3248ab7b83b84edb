//! Errors surfaced by the command-line entry points.

use thiserror::Error;

use cohortrx_contracts::error::RecommenderError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Recommender(#[from] RecommenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid patient JSON in '{path}': {source}")]
    PatientJson {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to render JSON output: {0}")]
    Output(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
