//! Output types of a prediction request and of the status query.
//!
//! Field names are part of the HTTP contract and must not be renamed.

use serde::{Deserialize, Serialize};

/// Qualitative effectiveness or risk tier attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    High,
    Moderate,
    Low,
}

/// One ranked drug recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    /// 0–95, one decimal place.
    pub confidence: f64,
    pub dosage: String,
    pub frequency: String,
    pub effectiveness: Tier,
    pub side_effects_risk: Tier,
    pub condition_match: String,
}

/// Whether a feature pushed the cohort match towards or away from the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn from_flag(positive: bool) -> Self {
        if positive {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }
}

/// A single feature-influence explanation entry.
///
/// `influence` is non-negative and rounded to three decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceEntry {
    pub feature: String,
    pub influence: f64,
    pub direction: Direction,
}

/// Severity tier of a known drug-drug interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Moderate,
    High,
}

/// A warning that a recommended drug interacts with a current medication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionWarning {
    /// The recommended drug, as named in the recommendation.
    pub drug1: String,
    /// The patient's current medication, title-cased.
    pub drug2: String,
    pub severity: Severity,
    pub description: String,
}

/// Everything `predict` returns for one patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub recommendations: Vec<Recommendation>,
    pub explanations: Vec<InfluenceEntry>,
    pub interactions: Vec<InteractionWarning>,
    pub similar_patients_count: usize,
}

/// Read-only view of the corpus load state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStatus {
    pub loaded: bool,
    pub record_count: usize,
    pub columns: Vec<String>,
}
