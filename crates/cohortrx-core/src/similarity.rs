//! Patient-to-record similarity.
//!
//! The score is a weighted sum of seven independent sub-scores, each in
//! [0, 1]. The weights sum to 1.0, so the total is also in [0, 1].

use cohortrx_contracts::patient::PatientQuery;

use crate::corpus::HistoricalRecord;
use crate::fields::TokenSet;

pub const AGE_WEIGHT: f64 = 0.15;
pub const GENDER_WEIGHT: f64 = 0.10;
pub const HEART_RATE_WEIGHT: f64 = 0.10;
pub const BLOOD_TYPE_WEIGHT: f64 = 0.05;
pub const SYMPTOMS_WEIGHT: f64 = 0.30;
pub const HISTORY_WEIGHT: f64 = 0.20;
pub const ALLERGIES_WEIGHT: f64 = 0.10;

/// Age difference at which the age sub-score reaches zero.
pub const AGE_SPAN: f64 = 20.0;
/// Heart-rate difference (bpm) at which the heart-rate sub-score reaches zero.
pub const HEART_RATE_SPAN: f64 = 40.0;

/// Age assumed for a record with no age. Such records
/// are penalised rather than excluded.
const MISSING_AGE: f64 = 0.0;
/// Resting heart rate assumed for a record with no heart rate.
const MISSING_HEART_RATE: f64 = 72.0;

/// A query patient with its list fields normalised once per request.
#[derive(Debug, Clone)]
pub struct NormalizedPatient<'a> {
    pub query: &'a PatientQuery,
    gender: String,
    blood_type: String,
    symptoms: TokenSet,
    medical_history: TokenSet,
    allergies: TokenSet,
}

impl<'a> NormalizedPatient<'a> {
    pub fn new(query: &'a PatientQuery) -> Self {
        Self {
            query,
            gender: query.gender.to_lowercase(),
            blood_type: query.blood_type.to_lowercase(),
            symptoms: TokenSet::from_items(&query.symptoms),
            medical_history: TokenSet::from_items(&query.medical_history),
            allergies: TokenSet::from_items(query.declared_allergies()),
        }
    }
}

/// Linear decay from 1 at zero difference to 0 at `span`, clamped at 0.
pub fn linear_closeness(diff: f64, span: f64) -> f64 {
    (1.0 - diff.abs() / span).max(0.0)
}

fn same_text(patient_lower: &str, record: Option<&str>) -> bool {
    record.is_some_and(|value| value.to_lowercase() == patient_lower)
}

/// Weighted similarity between a patient and one historical record, in [0, 1].
pub fn similarity(patient: &NormalizedPatient<'_>, record: &HistoricalRecord) -> f64 {
    let query = patient.query;
    let mut score = 0.0;

    let record_age = record.age.unwrap_or(MISSING_AGE);
    score += AGE_WEIGHT * linear_closeness(query.age as f64 - record_age, AGE_SPAN);

    if same_text(&patient.gender, record.gender.as_deref()) {
        score += GENDER_WEIGHT;
    }

    let record_hr = record.heart_rate.unwrap_or(MISSING_HEART_RATE);
    score += HEART_RATE_WEIGHT * linear_closeness(query.heart_rate as f64 - record_hr, HEART_RATE_SPAN);

    if same_text(&patient.blood_type, record.blood_type.as_deref()) {
        score += BLOOD_TYPE_WEIGHT;
    }

    score += SYMPTOMS_WEIGHT * patient.symptoms.jaccard(&record.symptoms);
    score += HISTORY_WEIGHT * patient.medical_history.jaccard(&record.medical_history);
    score += ALLERGIES_WEIGHT * patient.allergies.jaccard(&record.allergies);

    score.clamp(0.0, 1.0)
}
