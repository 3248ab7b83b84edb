//! Drug-drug interaction detection.
//!
//! Names are matched by substring in both directions, so "aspirin" matches a
//! table entry "aspirin" as well as "low-dose aspirin" and "asp". This
//! catches brand and combination names at the price of false positives on
//! short fragments; callers should treat warnings as prompts for review.

use cohortrx_contracts::{prediction::InteractionWarning, reference::InteractionRule};

/// True if either string contains the other.
fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Title-case a medication name the way it is shown to users.
///
/// Letters following a non-letter start a new word: "vitamin k" → "Vitamin K".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Check one recommended drug against the patient's current medications.
///
/// For each rule, if `drug` overlaps `drug_a`, every medication overlapping
/// `drug_b` produces a warning; otherwise, if `drug` overlaps `drug_b`, the
/// medications are checked against `drug_a`.
///
/// Blank medications are dropped before matching. This narrows the
/// permissive substring rule on purpose: an empty string is a substring of
/// every table entry and would otherwise warn against every rule that
/// matches `drug`, with an empty `drug2`.
pub fn check_interactions(
    drug: &str,
    current_medications: &[String],
    rules: &[InteractionRule],
) -> Vec<InteractionWarning> {
    let drug_lower = drug.trim().to_lowercase();
    let meds: Vec<String> = current_medications
        .iter()
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect();

    let mut warnings = Vec::new();
    for rule in rules {
        let a = rule.drug_a.to_lowercase();
        let b = rule.drug_b.to_lowercase();

        let partner = if overlaps(&drug_lower, &a) {
            b
        } else if overlaps(&drug_lower, &b) {
            a
        } else {
            continue;
        };

        for med in meds.iter().filter(|m| overlaps(m, &partner)) {
            warnings.push(InteractionWarning {
                drug1: drug.to_string(),
                drug2: title_case(med),
                severity: rule.severity,
                description: rule.description.clone(),
            });
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use cohortrx_contracts::prediction::Severity;

    use super::*;
    use crate::testing::StaticReference;

    fn meds(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn aspirin_with_warfarin_is_high() {
        let rules = StaticReference::default().interactions;
        let warnings = check_interactions("Aspirin", &meds(&["warfarin"]), &rules);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].drug1, "Aspirin");
        assert_eq!(warnings[0].drug2, "Warfarin");
        assert_eq!(warnings[0].severity, Severity::High);
        assert_eq!(warnings[0].description, "Increased bleeding risk");
    }

    #[test]
    fn reverse_direction_matches_drug_b() {
        let rules = StaticReference::default().interactions;
        // Warfarin is drug_a in one rule and drug_b in another.
        let warnings = check_interactions("Warfarin", &meds(&["Aspirin", "Vitamin K"]), &rules);
        let pairs: Vec<(&str, Severity)> =
            warnings.iter().map(|w| (w.drug2.as_str(), w.severity)).collect();
        assert_eq!(pairs, vec![("Aspirin", Severity::High), ("Vitamin K", Severity::High)]);
    }

    #[test]
    fn substring_matching_is_symmetric() {
        let rules = StaticReference::default().interactions;
        // Candidate is a substring of the table entry...
        let shorter = check_interactions("aspir", &meds(&["warfarin"]), &rules);
        // ...or the table entry is a substring of the candidate.
        let longer = check_interactions("aspirin ec", &meds(&["warfarin"]), &rules);
        assert_eq!(shorter.len(), 1);
        assert_eq!(longer.len(), 1);
        assert_eq!(shorter[0].severity, longer[0].severity);
        assert_eq!(shorter[0].description, longer[0].description);
    }

    #[test]
    fn medication_substring_matches_too() {
        let rules = StaticReference::default().interactions;
        let warnings = check_interactions("Lisinopril", &meds(&["potassium chloride"]), &rules);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].drug2, "Potassium Chloride");
        assert_eq!(warnings[0].severity, Severity::Moderate);
    }

    #[test]
    fn one_drug_can_warn_against_several_medications() {
        let rules = StaticReference::default().interactions;
        let warnings = check_interactions("Aspirin", &meds(&["warfarin", "ibuprofen", "metformin"]), &rules);
        let descriptions: Vec<&str> = warnings.iter().map(|w| w.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Increased bleeding risk", "Reduced aspirin effectiveness"]);
    }

    #[test]
    fn unrelated_drug_produces_nothing() {
        let rules = StaticReference::default().interactions;
        assert!(check_interactions("Sertraline", &meds(&["warfarin"]), &rules).is_empty());
        assert!(check_interactions("Aspirin", &meds(&[]), &rules).is_empty());
    }

    #[test]
    fn blank_medications_are_ignored() {
        let rules = StaticReference::default().interactions;
        assert!(check_interactions("Aspirin", &meds(&["", "  "]), &rules).is_empty());
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("vitamin k"), "Vitamin K");
        assert_eq!(title_case("potassium-sparing diuretic"), "Potassium-Sparing Diuretic");
        assert_eq!(title_case("WARFARIN"), "Warfarin");
        assert_eq!(title_case("b12 complex"), "B12 Complex");
    }
}
