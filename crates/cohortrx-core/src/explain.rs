//! Rule-based feature-influence explanations.
//!
//! Each entry describes how well one patient feature agrees with the top-N
//! cohort. The formulas are fixed heuristics, not a trained attribution
//! model; changing them changes what users are told about a match.

use cohortrx_contracts::{
    patient::PatientQuery,
    prediction::{Direction, InfluenceEntry},
};

use crate::corpus::{columns, HistoricalRecord, Schema};
use crate::similarity::{linear_closeness, AGE_SPAN, HEART_RATE_SPAN};

/// At most this many entries are returned.
pub const MAX_EXPLANATIONS: usize = 10;

const AGE_SCALE: f64 = 0.15;
const GENDER_SCALE: f64 = 0.10;
const HEART_RATE_SCALE: f64 = 0.10;
const BLOOD_TYPE_SCALE: f64 = 0.05;
const SYMPTOM_SCALE: f64 = 0.08;
const HISTORY_SCALE: f64 = 0.07;
const ALLERGY_INFLUENCE: f64 = 0.05;

const MAX_SYMPTOM_ENTRIES: usize = 4;
const MAX_HISTORY_ENTRIES: usize = 3;
const MAX_ALLERGY_ENTRIES: usize = 2;

/// Cohort mean age used when no cohort record carries an age.
const DEFAULT_MEAN_AGE: f64 = 45.0;

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn entry(feature: String, influence: f64, positive: bool) -> InfluenceEntry {
    InfluenceEntry {
        feature,
        influence: round3(influence),
        direction: Direction::from_flag(positive),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Fraction of the cohort for which `pred` holds.
fn share<F>(cohort: &[&HistoricalRecord], pred: F) -> f64
where
    F: Fn(&HistoricalRecord) -> bool,
{
    cohort.iter().filter(|r| pred(r)).count() as f64 / cohort.len() as f64
}

fn matches_text(record: Option<&str>, patient_lower: &str) -> bool {
    record.is_some_and(|v| v.to_lowercase() == patient_lower)
}

/// Explain why `cohort` was selected for `query`.
///
/// Entries for columns missing from `schema` are skipped. The result is
/// sorted by descending absolute influence (stable) and truncated to
/// `MAX_EXPLANATIONS`. An empty cohort yields an empty list.
pub fn explain(query: &PatientQuery, cohort: &[&HistoricalRecord], schema: &Schema) -> Vec<InfluenceEntry> {
    if cohort.is_empty() {
        return Vec::new();
    }

    let mut entries = Vec::new();

    // Age is always explained; the mean falls back to a typical adult age.
    let mean_age = if schema.has(columns::AGE) {
        mean(cohort.iter().filter_map(|r| r.age))
    } else {
        None
    }
    .unwrap_or(DEFAULT_MEAN_AGE);
    let age_diff = query.age as f64 - mean_age;
    entries.push(entry(
        format!("Age ({} years)", query.age),
        age_diff.abs() / AGE_SPAN * AGE_SCALE,
        age_diff <= 5.0,
    ));

    if schema.has(columns::GENDER) {
        let gender = query.gender.to_lowercase();
        let rate = share(cohort, |r| matches_text(r.gender.as_deref(), &gender));
        entries.push(entry(
            format!("Gender ({})", query.gender),
            rate * GENDER_SCALE,
            rate > 0.5,
        ));
    }

    if schema.has(columns::HEART_RATE) {
        if let Some(mean_hr) = mean(cohort.iter().filter_map(|r| r.heart_rate)) {
            let hr_diff = query.heart_rate as f64 - mean_hr;
            entries.push(entry(
                format!("Heart Rate ({} bpm)", query.heart_rate),
                linear_closeness(hr_diff, HEART_RATE_SPAN) * HEART_RATE_SCALE,
                hr_diff.abs() < 15.0,
            ));
        }
    }

    if schema.has(columns::BLOOD_TYPE) {
        let blood_type = query.blood_type.to_lowercase();
        let rate = share(cohort, |r| matches_text(r.blood_type.as_deref(), &blood_type));
        entries.push(entry(
            format!("Blood Type ({})", query.blood_type),
            rate * BLOOD_TYPE_SCALE,
            rate > 0.3,
        ));
    }

    if schema.has(columns::SYMPTOMS) {
        for symptom in query.symptoms.iter().take(MAX_SYMPTOM_ENTRIES) {
            let token = symptom.trim().to_lowercase();
            let rate = share(cohort, |r| r.symptoms.contains(&token));
            entries.push(entry(format!("Symptom: {symptom}"), rate * SYMPTOM_SCALE, rate > 0.3));
        }
    }

    if schema.has(columns::MEDICAL_HISTORY) {
        for condition in query.medical_history.iter().take(MAX_HISTORY_ENTRIES) {
            let token = condition.trim().to_lowercase();
            let rate = share(cohort, |r| r.medical_history.contains(&token));
            entries.push(entry(format!("History: {condition}"), rate * HISTORY_SCALE, rate > 0.2));
        }
    }

    // Allergies only ever narrow the options.
    for allergy in query.declared_allergies().take(MAX_ALLERGY_ENTRIES) {
        entries.push(entry(format!("Allergy: {allergy}"), ALLERGY_INFLUENCE, false));
    }

    entries.sort_by(|a, b| b.influence.abs().total_cmp(&a.influence.abs()));
    entries.truncate(MAX_EXPLANATIONS);
    entries
}
