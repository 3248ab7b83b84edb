//! The recommendation engine: one `predict` pipeline over a shared corpus.
//!
//!   Corpus snapshot → Match → { Aggregate, Explain } → Interactions
//!
//! The corpus is held as an `Arc<Corpus>` behind a lock that is only taken
//! long enough to clone or swap the `Arc`. A request works on the snapshot
//! it cloned at entry, so a concurrent reload never exposes a half-built
//! corpus to it.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, warn};

use cohortrx_contracts::{
    error::{RecommenderError, RecommenderResult},
    patient::PatientQuery,
    prediction::{DataStatus, InteractionWarning, PredictionResponse},
};

use crate::aggregate;
use crate::corpus::Corpus;
use crate::explain;
use crate::interactions::check_interactions;
use crate::matcher;
use crate::similarity::NormalizedPatient;
use crate::traits::{CorpusSource, ReferenceData};

/// Drives matching, aggregation, explanation, and interaction checks.
///
/// Construct once per process and share behind an `Arc`. All methods take
/// `&self`.
pub struct Recommender {
    corpus: RwLock<Option<Arc<Corpus>>>,
    reference: Arc<dyn ReferenceData>,
}

impl Recommender {
    /// Create an engine with no corpus loaded. `predict` fails until
    /// `install` or `reload` succeeds.
    pub fn new(reference: Arc<dyn ReferenceData>) -> Self {
        Self {
            corpus: RwLock::new(None),
            reference,
        }
    }

    /// Create an engine with `corpus` already installed.
    pub fn with_corpus(reference: Arc<dyn ReferenceData>, corpus: Corpus) -> Self {
        let engine = Self::new(reference);
        engine.install(corpus);
        engine
    }

    /// Replace the corpus in a single swap. Returns the previous snapshot.
    pub fn install(&self, corpus: Corpus) -> Option<Arc<Corpus>> {
        let records = corpus.len();
        let next = Arc::new(corpus);
        // The guarded value is a single Arc, so a poisoned lock still holds a
        // consistent snapshot.
        let mut slot = self.corpus.write().unwrap_or_else(PoisonError::into_inner);
        let previous = slot.replace(next);
        info!(records, replaced = previous.is_some(), "corpus installed");
        previous
    }

    /// Load a fresh corpus from `source` and install it.
    ///
    /// On failure the current corpus stays in place.
    pub fn reload(&self, source: &dyn CorpusSource) -> RecommenderResult<DataStatus> {
        let origin = source.describe();
        match source.load() {
            Ok(corpus) => {
                let status = corpus.status();
                self.install(corpus);
                info!(origin = %origin, records = status.record_count, "corpus reloaded");
                Ok(status)
            }
            Err(e) => {
                warn!(origin = %origin, error = %e, "corpus reload failed, keeping current snapshot");
                Err(e)
            }
        }
    }

    /// The current corpus snapshot, if any.
    pub fn snapshot(&self) -> Option<Arc<Corpus>> {
        self.corpus
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Load state of the corpus.
    pub fn status(&self) -> DataStatus {
        self.snapshot().map(|c| c.status()).unwrap_or_default()
    }

    /// Recommend drugs for `query`.
    ///
    /// # Errors
    ///
    /// `CorpusUnavailable` if no corpus is installed, `InvalidQuery` if the
    /// query fails validation. An empty corpus or a cohort that names no
    /// drug is not an error: the response simply has empty lists.
    pub fn predict(&self, query: &PatientQuery) -> RecommenderResult<PredictionResponse> {
        query.validate()?;

        let corpus = self.snapshot().ok_or_else(|| RecommenderError::CorpusUnavailable {
            reason: "no dataset has been loaded".to_string(),
        })?;

        if corpus.is_empty() {
            debug!("corpus is empty, returning empty prediction");
            return Ok(PredictionResponse::default());
        }

        let records = corpus.records();
        let patient = NormalizedPatient::new(query);
        let matches = matcher::rank(&patient, records);
        debug!(
            corpus = records.len(),
            top_n = matches.top_n,
            similar = matches.similar_patients_count,
            "corpus ranked"
        );

        let recommendations =
            aggregate::recommend(query, matches.cohort(), records, self.reference.as_ref());

        let cohort = matches.cohort_records(records);
        let explanations = explain::explain(query, &cohort, corpus.schema());

        let interactions: Vec<InteractionWarning> = recommendations
            .iter()
            .flat_map(|rec| {
                check_interactions(
                    &rec.name,
                    &query.current_medications,
                    self.reference.interaction_rules(),
                )
            })
            .collect();

        debug!(
            recommendations = recommendations.len(),
            explanations = explanations.len(),
            interactions = interactions.len(),
            "prediction complete"
        );

        Ok(PredictionResponse {
            recommendations,
            explanations,
            interactions,
            similar_patients_count: matches.similar_patients_count,
        })
    }
}
