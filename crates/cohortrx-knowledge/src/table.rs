//! Reference table schema.
//!
//! A `KnowledgeConfig` is deserialized from TOML and holds three ordered
//! arrays. Array order is preserved: interaction warnings and fallback seeds
//! are produced in the order rows appear in the file.

use serde::{Deserialize, Serialize};

use cohortrx_contracts::reference::{DrugProfile, FallbackRule, InteractionRule};

/// The top-level structure deserialized from a reference-table TOML file.
///
/// Example:
/// ```toml
/// [[drugs]]
/// name = "lisinopril"
/// dosage = "10mg"
/// frequency = "Once daily"
/// conditions = "Hypertension, Heart Failure"
///
/// [[interactions]]
/// drug_a = "aspirin"
/// drug_b = "warfarin"
/// severity = "high"
/// description = "Increased bleeding risk"
///
/// [[fallback]]
/// keyword = "headache"
/// drug = "Aspirin"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    #[serde(default)]
    pub drugs: Vec<DrugProfile>,

    #[serde(default)]
    pub interactions: Vec<InteractionRule>,

    #[serde(default)]
    pub fallback: Vec<FallbackRule>,
}
