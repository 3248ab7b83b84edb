//! Drug tallying, confidence scoring, and recommendation enrichment.
//!
//! Drugs named by the cohort are tallied by occurrence and accumulated
//! similarity. When the cohort names none, a keyword fallback table seeds the
//! tallies from the patient's own symptoms and history instead.

use tracing::debug;

use cohortrx_contracts::{
    patient::PatientQuery,
    prediction::{Recommendation, Tier},
    reference::FallbackRule,
};

use crate::corpus::HistoricalRecord;
use crate::matcher::ScoredRecord;
use crate::traits::ReferenceData;

/// At most this many drugs are recommended.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Confidence never exceeds this value.
pub const CONFIDENCE_CEILING: f64 = 95.0;

/// Placeholder similarity for a drug seeded from a symptom keyword.
const SYMPTOM_SEED_SIMILARITY: f64 = 0.5;
/// Placeholder similarity for a drug seeded from a history keyword.
const HISTORY_SEED_SIMILARITY: f64 = 0.6;

/// Drug values that mean "no drug recorded".
const PLACEHOLDER_DRUGS: &[&str] = &["nan", "none"];

/// Occurrences and accumulated similarity for one drug within the cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct DrugTally {
    pub drug: String,
    pub count: usize,
    pub total_sim: f64,
}

/// Running tallies kept in first-seen order.
#[derive(Debug, Default)]
struct Tallies(Vec<DrugTally>);

impl Tallies {
    fn position(&self, drug: &str) -> Option<usize> {
        self.0.iter().position(|t| t.drug == drug)
    }

    fn accumulate(&mut self, drug: &str, similarity: f64) {
        match self.position(drug) {
            Some(i) => {
                self.0[i].count += 1;
                self.0[i].total_sim += similarity;
            }
            None => self.0.push(DrugTally {
                drug: drug.to_string(),
                count: 1,
                total_sim: similarity,
            }),
        }
    }

    /// Insert a single-count entry unless the drug is already present.
    fn seed(&mut self, drug: &str, similarity: f64) {
        if self.position(drug).is_none() {
            self.0.push(DrugTally {
                drug: drug.to_string(),
                count: 1,
                total_sim: similarity,
            });
        }
    }
}

fn usable_drug(raw: &str) -> Option<&str> {
    let drug = raw.trim();
    if drug.is_empty() || PLACEHOLDER_DRUGS.iter().any(|p| drug.eq_ignore_ascii_case(p)) {
        return None;
    }
    Some(drug)
}

/// Tally the drugs recorded by the cohort.
///
/// Drug names are compared exactly after trimming; placeholder values are
/// skipped.
pub fn tally_cohort(cohort: &[ScoredRecord], records: &[HistoricalRecord]) -> Vec<DrugTally> {
    let mut tallies = Tallies::default();
    for scored in cohort {
        let drug = records[scored.index]
            .recommended_drug
            .as_deref()
            .and_then(usable_drug);
        if let Some(drug) = drug {
            tallies.accumulate(drug, scored.similarity);
        }
    }
    tallies.0
}

/// Seed tallies from the keyword fallback table.
///
/// Each symptom, then each history entry, is checked against every keyword
/// (case-insensitive substring). The first seed for a drug wins.
pub fn fallback_tallies(query: &PatientQuery, rules: &[FallbackRule]) -> Vec<DrugTally> {
    let mut tallies = Tallies::default();
    let sources = [
        (&query.symptoms, SYMPTOM_SEED_SIMILARITY),
        (&query.medical_history, HISTORY_SEED_SIMILARITY),
    ];
    for (entries, seed_similarity) in sources {
        for entry in entries {
            let entry = entry.to_lowercase();
            for rule in rules {
                if entry.contains(&rule.keyword.to_lowercase()) {
                    tallies.seed(&rule.drug, seed_similarity);
                }
            }
        }
    }
    tallies.0
}

/// Blend frequency and average similarity into a 0–95 score (unrounded).
pub fn confidence(tally: &DrugTally, top_n: usize) -> f64 {
    if tally.count == 0 || top_n == 0 {
        return 0.0;
    }
    let frequency = tally.count as f64 / top_n as f64 * 100.0;
    let mean_similarity = tally.total_sim / tally.count as f64 * 50.0;
    (frequency + mean_similarity).clamp(0.0, CONFIDENCE_CEILING)
}

pub fn effectiveness_tier(confidence: f64) -> Tier {
    if confidence > 70.0 {
        Tier::High
    } else if confidence > 50.0 {
        Tier::Moderate
    } else {
        Tier::Low
    }
}

pub fn side_effect_tier(confidence: f64) -> Tier {
    if confidence > 60.0 {
        Tier::Low
    } else {
        Tier::Moderate
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Build the display entry for one ranked drug.
fn describe(
    drug: &str,
    confidence: f64,
    query: &PatientQuery,
    reference: &dyn ReferenceData,
) -> Recommendation {
    let profile = reference.drug_profile(&drug.to_lowercase());
    let condition_match = match profile {
        Some(p) => p.conditions.clone(),
        None if query.symptoms.is_empty() => "General Treatment".to_string(),
        None => query
            .symptoms
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    };

    Recommendation {
        name: drug.to_string(),
        confidence: round_to(confidence, 1),
        dosage: profile.map_or_else(|| "As prescribed".to_string(), |p| p.dosage.clone()),
        frequency: profile.map_or_else(|| "As directed".to_string(), |p| p.frequency.clone()),
        effectiveness: effectiveness_tier(confidence),
        side_effects_risk: side_effect_tier(confidence),
        condition_match,
    }
}

/// Produce up to five recommendations from the ranked cohort.
///
/// `top_n` is the cohort size the frequency term is normalised by. An empty
/// cohort yields no recommendations.
pub fn recommend(
    query: &PatientQuery,
    cohort: &[ScoredRecord],
    records: &[HistoricalRecord],
    reference: &dyn ReferenceData,
) -> Vec<Recommendation> {
    let top_n = cohort.len();
    if top_n == 0 {
        return Vec::new();
    }

    let mut tallies = tally_cohort(cohort, records);
    if tallies.is_empty() {
        tallies = fallback_tallies(query, reference.fallback_rules());
        debug!(seeded = tallies.len(), "cohort named no drugs, using keyword fallback");
    }

    tallies.sort_by(|a, b| b.total_sim.total_cmp(&a.total_sim));

    tallies
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|tally| describe(&tally.drug, confidence(tally, top_n), query, reference))
        .collect()
}
