//! Trait seams between the engine and its collaborators.
//!
//! - `ReferenceData`: read-only clinical lookup tables (dosing text,
//!   interaction pairs, keyword fallback)
//! - `CorpusSource`: anything that can produce a fresh `Corpus`
//!
//! The engine never reaches for global tables or files directly; both are
//! injected so tests can substitute their own.

use cohortrx_contracts::{
    error::RecommenderResult,
    reference::{DrugProfile, FallbackRule, InteractionRule},
};

use crate::corpus::Corpus;

/// Static reference tables consulted by the aggregator and interaction checker.
///
/// Implementations must be immutable after construction. Lookups happen on
/// every request and must not perform I/O.
pub trait ReferenceData: Send + Sync {
    /// Look up display metadata for a drug.
    ///
    /// `drug` is already lowercased by the caller.
    fn drug_profile(&self, drug: &str) -> Option<&DrugProfile>;

    /// The known interacting pairs, in table order.
    fn interaction_rules(&self) -> &[InteractionRule];

    /// Keyword → drug fallback rows, in table order.
    ///
    /// Order matters: when two keywords map to the same drug, the first row
    /// to match seeds the tally.
    fn fallback_rules(&self) -> &[FallbackRule];
}

/// A loader that produces a complete corpus snapshot.
///
/// `load()` is only called at startup and on explicit reload; it may block
/// on I/O. A failed load must not leave a partially built corpus behind.
pub trait CorpusSource: Send + Sync {
    /// Load and parse the full corpus.
    fn load(&self) -> RecommenderResult<Corpus>;

    /// Human-readable origin, used in log lines (e.g. a file path).
    fn describe(&self) -> String;
}
