//! TOML-backed reference tables.
//!
//! `KnowledgeBase` loads a `KnowledgeConfig` from a TOML string or file,
//! normalises its keys, and implements `ReferenceData` for the engine.
//!
//! Load-time checks:
//!
//! 1. Drug names, interaction names, and fallback keywords are trimmed and
//!    lowercased; none may be empty (an empty fragment would substring-match
//!    every name).
//! 2. A drug name may appear only once in `[[drugs]]`.
//! 3. Fallback drugs keep their display casing.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use cohortrx_contracts::{
    error::{RecommenderError, RecommenderResult},
    reference::{DrugProfile, FallbackRule, InteractionRule},
};
use cohortrx_core::traits::ReferenceData;

use crate::table::KnowledgeConfig;

/// The reference tables shipped with the crate.
const DEFAULT_TABLES: &str = include_str!("../data/knowledge.toml");

/// Immutable reference tables, ready for lookup.
///
/// ```rust,ignore
/// use cohortrx_knowledge::KnowledgeBase;
///
/// let knowledge = KnowledgeBase::from_file(Path::new("config/knowledge.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    drugs: HashMap<String, DrugProfile>,
    interactions: Vec<InteractionRule>,
    fallback: Vec<FallbackRule>,
}

fn knowledge_error(reason: String) -> RecommenderError {
    RecommenderError::KnowledgeError { reason }
}

fn normalised_key(raw: &str, what: &str) -> RecommenderResult<String> {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        return Err(knowledge_error(format!("{what} must not be empty")));
    }
    Ok(key)
}

impl KnowledgeBase {
    /// The tables embedded at build time.
    pub fn builtin() -> RecommenderResult<Self> {
        Self::from_toml_str(DEFAULT_TABLES)
    }

    /// Parse `s` as TOML and build a `KnowledgeBase`.
    ///
    /// Returns `RecommenderError::KnowledgeError` if the TOML is malformed,
    /// does not match `KnowledgeConfig`, or fails the load-time checks.
    pub fn from_toml_str(s: &str) -> RecommenderResult<Self> {
        let config: KnowledgeConfig = toml::from_str(s)
            .map_err(|e| knowledge_error(format!("failed to parse reference TOML: {}", e)))?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as reference-table TOML.
    pub fn from_file(path: &Path) -> RecommenderResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            knowledge_error(format!(
                "failed to read reference file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validate and index an already deserialized config.
    pub fn from_config(config: KnowledgeConfig) -> RecommenderResult<Self> {
        let mut drugs = HashMap::with_capacity(config.drugs.len());
        for profile in config.drugs {
            let name = normalised_key(&profile.name, "drug name")?;
            if drugs.contains_key(&name) {
                return Err(knowledge_error(format!("drug '{name}' is listed more than once")));
            }
            drugs.insert(name.clone(), DrugProfile { name, ..profile });
        }

        let interactions = config
            .interactions
            .into_iter()
            .map(|rule| -> RecommenderResult<InteractionRule> {
                Ok(InteractionRule {
                    drug_a: normalised_key(&rule.drug_a, "interaction drug_a")?,
                    drug_b: normalised_key(&rule.drug_b, "interaction drug_b")?,
                    ..rule
                })
            })
            .collect::<RecommenderResult<Vec<_>>>()?;

        let fallback = config
            .fallback
            .into_iter()
            .map(|rule| -> RecommenderResult<FallbackRule> {
                if rule.drug.trim().is_empty() {
                    return Err(knowledge_error(format!(
                        "fallback keyword '{}' has no drug",
                        rule.keyword
                    )));
                }
                Ok(FallbackRule {
                    keyword: normalised_key(&rule.keyword, "fallback keyword")?,
                    drug: rule.drug.trim().to_string(),
                })
            })
            .collect::<RecommenderResult<Vec<_>>>()?;

        debug!(
            drugs = drugs.len(),
            interactions = interactions.len(),
            fallback = fallback.len(),
            "reference tables loaded"
        );

        Ok(Self {
            drugs,
            interactions,
            fallback,
        })
    }

    pub fn drug_count(&self) -> usize {
        self.drugs.len()
    }
}

impl ReferenceData for KnowledgeBase {
    fn drug_profile(&self, drug: &str) -> Option<&DrugProfile> {
        self.drugs.get(drug)
    }

    fn interaction_rules(&self) -> &[InteractionRule] {
        &self.interactions
    }

    fn fallback_rules(&self) -> &[FallbackRule] {
        &self.fallback
    }
}
