//! # cohortrx-core
//!
//! The matching-and-explanation engine behind cohortrx.
//!
//! A query patient is scored against every historical record, the most
//! similar records form a cohort, and the cohort's recorded drugs become
//! ranked recommendations. Alongside, a rule-based explanation describes
//! how the cohort relates to the patient, and each recommendation is checked
//! against the patient's current medications.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cohortrx_core::{Corpus, Recommender};
//!
//! let engine = Recommender::with_corpus(Arc::new(knowledge), corpus);
//! let response = engine.predict(&query)?;
//! ```

pub mod aggregate;
pub mod corpus;
pub mod engine;
pub mod explain;
pub mod fields;
pub mod interactions;
pub mod matcher;
pub mod similarity;
pub mod traits;

#[cfg(test)]
mod testing;

pub use corpus::{Corpus, HistoricalRecord};
pub use engine::Recommender;
pub use fields::TokenSet;
pub use traits::{CorpusSource, ReferenceData};
