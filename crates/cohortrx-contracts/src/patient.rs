//! The query patient submitted with each prediction request.

use serde::{Deserialize, Serialize};

use crate::error::{RecommenderError, RecommenderResult};

/// A patient profile to match against the historical corpus.
///
/// Constructed once per request and never mutated. List fields hold free
/// text exactly as submitted; normalisation happens at comparison time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientQuery {
    pub age: i64,
    pub gender: String,
    pub heart_rate: i64,
    pub blood_type: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub current_medications: Vec<String>,
}

impl PatientQuery {
    /// Reject values no real patient can have.
    pub fn validate(&self) -> RecommenderResult<()> {
        if self.age < 0 {
            return Err(RecommenderError::InvalidQuery {
                reason: format!("age must be non-negative, got {}", self.age),
            });
        }
        if self.heart_rate < 0 {
            return Err(RecommenderError::InvalidQuery {
                reason: format!("heart_rate must be non-negative, got {}", self.heart_rate),
            });
        }
        Ok(())
    }

    /// Allergies other than the literal "none" placeholder.
    pub fn declared_allergies(&self) -> impl Iterator<Item = &String> {
        self.allergies
            .iter()
            .filter(|a| !a.trim().eq_ignore_ascii_case("none"))
    }
}
