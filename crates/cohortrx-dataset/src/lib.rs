//! # cohortrx-dataset
//!
//! Loads the historical patient corpus from a headed CSV file.
//!
//! The header row becomes the corpus column set, in file order. Rows may be
//! shorter or longer than the header; missing cells are treated as missing
//! values. Cell-level problems (an age of "forty") are recovered by the
//! corpus builder and only reported as a count. File-level problems (no such
//! file, invalid UTF-8) fail the whole load so that a partial corpus is
//! never installed.

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{info, warn};

use cohortrx_contracts::error::{RecommenderError, RecommenderResult};
use cohortrx_core::{traits::CorpusSource, Corpus};

/// A `CorpusSource` backed by a CSV file on disk.
///
/// ```rust,ignore
/// use cohortrx_dataset::CsvCorpusSource;
///
/// let source = CsvCorpusSource::new("data/ehr_synthetic_max_features.csv");
/// engine.reload(&source)?;
/// ```
#[derive(Debug, Clone)]
pub struct CsvCorpusSource {
    path: PathBuf,
}

impl CsvCorpusSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for CsvCorpusSource {
    fn load(&self) -> RecommenderResult<Corpus> {
        load_path(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Read a CSV corpus from `path`.
pub fn load_path(path: &Path) -> RecommenderResult<Corpus> {
    let origin = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| RecommenderError::DatasetLoad {
        path: origin.clone(),
        reason: e.to_string(),
    })?;
    load_reader(file, &origin)
}

/// Read a CSV corpus from any reader. `origin` names the input in errors
/// and log lines.
pub fn load_reader<R: Read>(reader: R, origin: &str) -> RecommenderResult<Corpus> {
    let load_error = |e: csv::Error| RecommenderError::DatasetLoad {
        path: origin.to_string(),
        reason: e.to_string(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = reader
        .headers()
        .map_err(load_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let rows = reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect::<Vec<String>>())
                .map_err(load_error)
        })
        .collect::<RecommenderResult<Vec<_>>>()?;

    let corpus = Corpus::from_rows(columns, rows);

    if corpus.malformed_fields() > 0 {
        warn!(
            origin,
            malformed_fields = corpus.malformed_fields(),
            "dataset contains unparseable numeric cells; treated as missing"
        );
    }
    info!(
        origin,
        records = corpus.len(),
        columns = ?corpus.schema().columns(),
        "loaded patient dataset"
    );

    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = "\
patient_id,age,gender,heart_rate,blood_type,allergies,medical_history,symptoms,current_medications,recommended_drug
1,45,Male,72,O+,None,Hypertension,\"Headache, Dizziness\",Aspirin,Lisinopril
2,61,Female,88,A-,Penicillin;Latex,Type 2 Diabetes,Fatigue,,Metformin
3,forty,Male,,B+,,,Cough,,
";

    #[test]
    fn loads_header_and_rows() {
        let corpus = load_reader(SAMPLE.as_bytes(), "sample").unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.schema().columns()[0], "patient_id");
        assert_eq!(corpus.schema().columns().len(), 10);

        let first = &corpus.records()[0];
        assert_eq!(first.age, Some(45.0));
        assert!(first.symptoms.contains("headache"));
        assert!(first.symptoms.contains("dizziness"));
        assert_eq!(first.recommended_drug.as_deref(), Some("Lisinopril"));

        let second = &corpus.records()[1];
        assert!(second.allergies.contains("penicillin"));
        assert!(second.allergies.contains("latex"));
    }

    #[test]
    fn current_medications_are_tokenised() {
        let corpus = load_reader(SAMPLE.as_bytes(), "sample").unwrap();
        let first = &corpus.records()[0];
        assert_eq!(first.current_medications.len(), 1);
        assert!(first.current_medications.contains("aspirin"));
        assert!(corpus.records()[1].current_medications.is_empty());
    }

    #[test]
    fn malformed_cells_are_counted_not_fatal() {
        let corpus = load_reader(SAMPLE.as_bytes(), "sample").unwrap();
        let third = &corpus.records()[2];
        assert_eq!(third.age, None);
        assert_eq!(third.heart_rate, None);
        assert_eq!(corpus.malformed_fields(), 1);
    }

    #[test]
    fn ragged_rows_are_tolerated() {
        let csv = "age,gender,symptoms\n30,female\n40,male,cough,extra\n";
        let corpus = load_reader(csv.as_bytes(), "ragged").unwrap();
        assert_eq!(corpus.len(), 2);
        assert!(corpus.records()[0].symptoms.is_empty());
        assert!(corpus.records()[1].symptoms.contains("cough"));
    }

    #[test]
    fn header_only_file_is_an_empty_corpus() {
        let corpus = load_reader("age,gender\n".as_bytes(), "empty").unwrap();
        assert!(corpus.is_empty());
        assert_eq!(corpus.status().columns, vec!["age", "gender"]);
    }

    #[test]
    fn invalid_utf8_fails_the_load() {
        let bytes: &[u8] = b"age,gender\n45,\xff\xfe\n";
        let err = load_reader(bytes, "binary").unwrap_err();
        assert!(matches!(err, RecommenderError::DatasetLoad { .. }));
    }

    #[test]
    fn missing_file_is_dataset_load_error() {
        let source = CsvCorpusSource::new("/nonexistent/ehr.csv");
        let err = source.load().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ehr.csv"));
    }

    #[test]
    fn source_loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let source = CsvCorpusSource::new(file.path());
        assert_eq!(source.describe(), file.path().display().to_string());
        assert_eq!(source.load().unwrap().len(), 3);
    }
}
