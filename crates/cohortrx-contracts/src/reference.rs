//! Reference-table row types.
//!
//! These rows are static clinical lookup data: per-drug dosing text, the
//! interaction table, and the keyword fallback used when the cohort names no
//! drug. They are loaded once and shared read-only.

use serde::{Deserialize, Serialize};

use crate::prediction::Severity;

/// Display metadata for one canonical drug name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugProfile {
    /// Lowercase canonical name used as the lookup key.
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    /// Conditions the drug treats, e.g. "Hypertension, Heart Failure".
    pub conditions: String,
}

/// A known interacting pair.
///
/// Matching is substring-based in both directions, so `drug_a` and
/// `drug_b` are name fragments rather than exact names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRule {
    pub drug_a: String,
    pub drug_b: String,
    pub severity: Severity,
    pub description: String,
}

/// Maps a symptom or condition keyword to a default drug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRule {
    pub keyword: String,
    pub drug: String,
}
