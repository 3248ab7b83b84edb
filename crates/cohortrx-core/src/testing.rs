//! Shared fixtures for unit tests.

use cohortrx_contracts::{
    patient::PatientQuery,
    prediction::Severity,
    reference::{DrugProfile, FallbackRule, InteractionRule},
};

use crate::traits::ReferenceData;

pub fn patient() -> PatientQuery {
    PatientQuery {
        age: 45,
        gender: "male".to_string(),
        heart_rate: 75,
        blood_type: "O+".to_string(),
        allergies: vec![],
        medical_history: vec!["hypertension".to_string()],
        symptoms: vec!["headache".to_string()],
        current_medications: vec!["aspirin".to_string()],
    }
}

/// A small in-memory reference table.
pub struct StaticReference {
    pub drugs: Vec<DrugProfile>,
    pub interactions: Vec<InteractionRule>,
    pub fallback: Vec<FallbackRule>,
}

fn drug(name: &str, dosage: &str, frequency: &str, conditions: &str) -> DrugProfile {
    DrugProfile {
        name: name.to_string(),
        dosage: dosage.to_string(),
        frequency: frequency.to_string(),
        conditions: conditions.to_string(),
    }
}

fn interaction(a: &str, b: &str, severity: Severity, description: &str) -> InteractionRule {
    InteractionRule {
        drug_a: a.to_string(),
        drug_b: b.to_string(),
        severity,
        description: description.to_string(),
    }
}

fn fallback(keyword: &str, drug: &str) -> FallbackRule {
    FallbackRule {
        keyword: keyword.to_string(),
        drug: drug.to_string(),
    }
}

impl Default for StaticReference {
    fn default() -> Self {
        Self {
            drugs: vec![
                drug("lisinopril", "10mg", "Once daily", "Hypertension, Heart Failure"),
                drug("aspirin", "81mg", "Once daily", "Cardiovascular Prevention"),
                drug("metformin", "500mg", "Twice daily with meals", "Type 2 Diabetes"),
            ],
            interactions: vec![
                interaction("aspirin", "warfarin", Severity::High, "Increased bleeding risk"),
                interaction("aspirin", "ibuprofen", Severity::Moderate, "Reduced aspirin effectiveness"),
                interaction("lisinopril", "potassium", Severity::Moderate, "Risk of hyperkalemia"),
                interaction("warfarin", "vitamin k", Severity::High, "Reduced anticoagulant effect"),
            ],
            fallback: vec![
                fallback("headache", "Aspirin"),
                fallback("fever", "Acetaminophen"),
                fallback("chest pain", "Aspirin"),
                fallback("hypertension", "Lisinopril"),
            ],
        }
    }
}

impl ReferenceData for StaticReference {
    fn drug_profile(&self, drug: &str) -> Option<&DrugProfile> {
        self.drugs.iter().find(|d| d.name == drug)
    }

    fn interaction_rules(&self) -> &[InteractionRule] {
        &self.interactions
    }

    fn fallback_rules(&self) -> &[FallbackRule] {
        &self.fallback
    }
}
