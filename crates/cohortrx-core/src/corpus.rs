//! The in-memory historical patient corpus.
//!
//! A `Corpus` is built once from tabular rows and never mutated. The engine
//! shares it behind an `Arc` and replaces it wholesale on reload.

use chrono::{DateTime, Utc};
use tracing::debug;

use cohortrx_contracts::prediction::DataStatus;

use crate::fields::{is_missing, TokenSet};

/// Column names the engine understands. Any other column is carried in the
/// schema for status reporting but otherwise ignored.
pub mod columns {
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const HEART_RATE: &str = "heart_rate";
    pub const BLOOD_TYPE: &str = "blood_type";
    pub const ALLERGIES: &str = "allergies";
    pub const MEDICAL_HISTORY: &str = "medical_history";
    pub const SYMPTOMS: &str = "symptoms";
    pub const CURRENT_MEDICATIONS: &str = "current_medications";
    pub const RECOMMENDED_DRUG: &str = "recommended_drug";
}

/// One historical patient row.
///
/// Optional fields are `None` when the column is absent or the cell is
/// missing or malformed. Token fields are empty in the same situations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalRecord {
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub heart_rate: Option<f64>,
    pub blood_type: Option<String>,
    pub allergies: TokenSet,
    pub medical_history: TokenSet,
    pub symptoms: TokenSet,
    pub current_medications: TokenSet,
    /// Raw cell value, trimmed. Blank and placeholder values are filtered by
    /// the aggregator, not here.
    pub recommended_drug: Option<String>,
}

/// The fixed column set of a loaded corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn has(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// A read-only snapshot of the historical records.
#[derive(Debug, Clone)]
pub struct Corpus {
    schema: Schema,
    records: Vec<HistoricalRecord>,
    malformed_fields: usize,
    loaded_at: DateTime<Utc>,
}

impl Corpus {
    /// Build a corpus from a header and string rows.
    ///
    /// Rows shorter than the header are padded with missing values. Numeric
    /// cells that fail to parse are treated as missing and counted in
    /// `malformed_fields`; they never abort the build.
    pub fn from_rows<I, R>(columns: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[String]>,
    {
        let schema = Schema::new(columns.into_iter().map(|c| c.trim().to_string()).collect());
        let layout = Layout::resolve(&schema);
        let mut malformed_fields = 0;

        let records = rows
            .into_iter()
            .map(|row| layout.parse_row(row.as_ref(), &mut malformed_fields))
            .collect::<Vec<_>>();

        debug!(
            records = records.len(),
            columns = schema.columns().len(),
            malformed_fields,
            "corpus built from rows"
        );

        Self {
            schema,
            records,
            malformed_fields,
            loaded_at: Utc::now(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of cells that were present but could not be parsed.
    pub fn malformed_fields(&self) -> usize {
        self.malformed_fields
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn status(&self) -> DataStatus {
        DataStatus {
            loaded: true,
            record_count: self.records.len(),
            columns: self.schema.columns().to_vec(),
        }
    }
}

// ── Row parsing ───────────────────────────────────────────────────────────────

/// Column positions of the fields the engine reads, resolved once per build.
struct Layout {
    age: Option<usize>,
    gender: Option<usize>,
    heart_rate: Option<usize>,
    blood_type: Option<usize>,
    allergies: Option<usize>,
    medical_history: Option<usize>,
    symptoms: Option<usize>,
    current_medications: Option<usize>,
    recommended_drug: Option<usize>,
}

impl Layout {
    fn resolve(schema: &Schema) -> Self {
        Self {
            age: schema.position(columns::AGE),
            gender: schema.position(columns::GENDER),
            heart_rate: schema.position(columns::HEART_RATE),
            blood_type: schema.position(columns::BLOOD_TYPE),
            allergies: schema.position(columns::ALLERGIES),
            medical_history: schema.position(columns::MEDICAL_HISTORY),
            symptoms: schema.position(columns::SYMPTOMS),
            current_medications: schema.position(columns::CURRENT_MEDICATIONS),
            recommended_drug: schema.position(columns::RECOMMENDED_DRUG),
        }
    }

    fn parse_row(&self, row: &[String], malformed: &mut usize) -> HistoricalRecord {
        let cell = |pos: Option<usize>| pos.and_then(|i| row.get(i)).map(String::as_str);
        let tokens = |pos: Option<usize>| cell(pos).map(TokenSet::parse).unwrap_or_default();

        HistoricalRecord {
            age: parse_number(cell(self.age), malformed),
            gender: text(cell(self.gender)),
            heart_rate: parse_number(cell(self.heart_rate), malformed),
            blood_type: text(cell(self.blood_type)),
            allergies: tokens(self.allergies),
            medical_history: tokens(self.medical_history),
            symptoms: tokens(self.symptoms),
            current_medications: tokens(self.current_medications),
            recommended_drug: cell(self.recommended_drug).map(|v| v.trim().to_string()),
        }
    }
}

fn text(raw: Option<&str>) -> Option<String> {
    raw.filter(|v| !is_missing(v)).map(|v| v.trim().to_string())
}

/// Parse an integer or decimal cell. Non-finite or unparseable values count
/// as malformed and are treated as missing.
fn parse_number(raw: Option<&str>, malformed: &mut usize) -> Option<f64> {
    let raw = raw.filter(|v| !is_missing(v))?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            *malformed += 1;
            None
        }
    }
}
