//! Error types for the cohortrx recommendation pipeline.
//!
//! All fallible operations return `RecommenderResult<T>`. Recoverable data
//! problems (malformed fields, empty cohorts) never surface here; only
//! failures that stop a request or a load do.

use thiserror::Error;

/// The unified error type for the cohortrx crates.
#[derive(Debug, Error)]
pub enum RecommenderError {
    /// No corpus is loaded. `predict` refuses to run on absent data.
    #[error("patient corpus unavailable: {reason}")]
    CorpusUnavailable { reason: String },

    /// The dataset file could not be opened or decoded.
    #[error("failed to load dataset '{path}': {reason}")]
    DatasetLoad { path: String, reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The reference tables (dosage, interactions, fallback) are malformed.
    #[error("reference table error: {reason}")]
    KnowledgeError { reason: String },

    /// The patient query failed validation.
    #[error("invalid patient query: {reason}")]
    InvalidQuery { reason: String },
}

/// Convenience alias used throughout the cohortrx crates.
pub type RecommenderResult<T> = Result<T, RecommenderError>;
