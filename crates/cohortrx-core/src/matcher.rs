//! Corpus-wide ranking and top-N cohort selection.

use crate::corpus::HistoricalRecord;
use crate::similarity::{similarity, NormalizedPatient};

/// Upper bound on the cohort size.
pub const MAX_COHORT: usize = 50;

/// Records scoring strictly above this count as "similar patients".
pub const SIMILAR_THRESHOLD: f64 = 0.5;

/// A corpus record paired with its similarity to the query patient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecord {
    /// Position of the record in the corpus.
    pub index: usize,
    pub similarity: f64,
}

/// The ranked corpus for one request.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// Every record, most similar first. Equal scores keep corpus order.
    pub ranked: Vec<ScoredRecord>,
    /// `min(MAX_COHORT, corpus size)`.
    pub top_n: usize,
    /// Records above `SIMILAR_THRESHOLD`, counted over the whole corpus.
    pub similar_patients_count: usize,
}

impl MatchResult {
    /// The top-N cohort.
    pub fn cohort(&self) -> &[ScoredRecord] {
        &self.ranked[..self.top_n]
    }

    /// Resolve the cohort against the corpus it was ranked from.
    pub fn cohort_records<'c>(&self, records: &'c [HistoricalRecord]) -> Vec<&'c HistoricalRecord> {
        self.cohort().iter().map(|s| &records[s.index]).collect()
    }
}

/// Score every record and rank them.
///
/// The sort is stable: records with equal scores stay in corpus order, which
/// in turn fixes the order in which drugs are first seen downstream.
pub fn rank(patient: &NormalizedPatient<'_>, records: &[HistoricalRecord]) -> MatchResult {
    let mut ranked: Vec<ScoredRecord> = records
        .iter()
        .enumerate()
        .map(|(index, record)| ScoredRecord {
            index,
            similarity: similarity(patient, record),
        })
        .collect();

    let similar_patients_count = ranked
        .iter()
        .filter(|s| s.similarity > SIMILAR_THRESHOLD)
        .count();

    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    MatchResult {
        top_n: ranked.len().min(MAX_COHORT),
        ranked,
        similar_patients_count,
    }
}

#[cfg(test)]
mod tests {
    use cohortrx_contracts::patient::PatientQuery;

    use super::*;
    use crate::fields::TokenSet;

    fn query() -> PatientQuery {
        PatientQuery {
            age: 40,
            gender: "female".to_string(),
            heart_rate: 70,
            blood_type: "A+".to_string(),
            allergies: vec![],
            medical_history: vec!["asthma".to_string()],
            symptoms: vec!["cough".to_string()],
            current_medications: vec![],
        }
    }

    fn record(age: f64, symptoms: &str) -> HistoricalRecord {
        HistoricalRecord {
            age: Some(age),
            gender: Some("female".to_string()),
            heart_rate: Some(70.0),
            blood_type: Some("A+".to_string()),
            symptoms: TokenSet::parse(symptoms),
            ..Default::default()
        }
    }

    #[test]
    fn ranks_descending_by_similarity() {
        let records = vec![record(80.0, "rash"), record(40.0, "cough"), record(50.0, "cough")];
        let q = query();
        let result = rank(&NormalizedPatient::new(&q), &records);
        let order: Vec<usize> = result.ranked.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert!(result.ranked.windows(2).all(|w| w[0].similarity >= w[1].similarity));
    }

    #[test]
    fn equal_scores_keep_corpus_order() {
        let records: Vec<HistoricalRecord> = (0..6).map(|_| record(40.0, "cough")).collect();
        let q = query();
        let result = rank(&NormalizedPatient::new(&q), &records);
        let order: Vec<usize> = result.ranked.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn ties_interleaved_with_other_scores_stay_stable() {
        let records = vec![
            record(70.0, "rash"),
            record(40.0, "cough"),
            record(70.0, "rash"),
            record(40.0, "cough"),
        ];
        let q = query();
        let result = rank(&NormalizedPatient::new(&q), &records);
        let order: Vec<usize> = result.ranked.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn top_n_is_min_of_fifty_and_corpus_size() {
        let q = query();
        let patient = NormalizedPatient::new(&q);
        for size in [0usize, 1, 49, 50, 51, 120] {
            let records: Vec<HistoricalRecord> = (0..size).map(|i| record(i as f64, "cough")).collect();
            let result = rank(&patient, &records);
            assert_eq!(result.top_n, size.min(50));
            assert_eq!(result.cohort().len(), size.min(50));
            assert_eq!(result.ranked.len(), size);
        }
    }

    #[test]
    fn similar_count_spans_whole_corpus() {
        // 60 near-identical records: all similar, but only 50 in the cohort.
        let records: Vec<HistoricalRecord> = (0..60).map(|_| record(40.0, "cough")).collect();
        let q = query();
        let result = rank(&NormalizedPatient::new(&q), &records);
        assert_eq!(result.top_n, 50);
        assert_eq!(result.similar_patients_count, 60);
    }

    #[test]
    fn similar_count_uses_strict_threshold() {
        let q = query();
        let patient = NormalizedPatient::new(&q);
        // Age 40 exact, gender, hr, blood type match: 0.15+0.1+0.1+0.05 = 0.4,
        // no list overlap → 0.4, not similar.
        let below = record(40.0, "rash");
        let result = rank(&patient, &[below]);
        assert_eq!(result.similar_patients_count, 0);
    }

    #[test]
    fn cohort_records_resolve_indices() {
        let records = vec![record(80.0, "rash"), record(40.0, "cough")];
        let q = query();
        let result = rank(&NormalizedPatient::new(&q), &records);
        let cohort = result.cohort_records(&records);
        assert_eq!(cohort.len(), 2);
        assert_eq!(cohort[0].age, Some(40.0));
    }
}
