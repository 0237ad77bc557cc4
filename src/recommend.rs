//! Recommendation table — disease label → treatment/prevention guidance.
//!
//! Lookup is total: labels missing from the table get a built-in fallback
//! record, so every prediction carries guidance of some shape.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Reserved label for low-confidence or unmapped predictions. The table may
/// carry its own entry under this key; it wins over the built-in fallback.
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("cannot read recommendations file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid recommendations file: {0}")]
    Parse(String),
}

/// Guidance for one disease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub overview: String,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
}

impl RecommendationRecord {
    /// Built-in record for labels with no table entry.
    pub fn fallback() -> Self {
        Self {
            overview: "Information not available.".to_string(),
            treatment: vec!["No specific treatment found.".to_string()],
            prevention: vec!["No specific prevention methods found.".to_string()],
        }
    }
}

/// Immutable mapping from disease label to recommendation record.
#[derive(Debug, Clone)]
pub struct RecommendationTable {
    records: HashMap<String, RecommendationRecord>,
}

impl RecommendationTable {
    /// Load the table from a JSON object keyed by disease label.
    pub fn load(path: &Path) -> Result<Self, RecommendationError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RecommendationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let records: HashMap<String, RecommendationRecord> =
            serde_json::from_str(&raw).map_err(|e| RecommendationError::Parse(e.to_string()))?;

        if records.is_empty() {
            return Err(RecommendationError::Parse(
                "recommendations file is empty".into(),
            ));
        }

        Ok(Self { records })
    }

    /// Build a table directly from records (tests, fixtures).
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, RecommendationRecord)>,
        S: Into<String>,
    {
        Self {
            records: records
                .into_iter()
                .map(|(label, rec)| (label.into(), rec))
                .collect(),
        }
    }

    /// Resolve a label to its record. Total — unmapped labels (including an
    /// `Unknown` with no table entry) get the built-in fallback.
    pub fn resolve(&self, label: &str) -> RecommendationRecord {
        self.records
            .get(label)
            .cloned()
            .unwrap_or_else(RecommendationRecord::fallback)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_record(overview: &str) -> RecommendationRecord {
        RecommendationRecord {
            overview: overview.to_string(),
            treatment: vec!["Spray copper fungicide weekly.".to_string()],
            prevention: vec!["Rotate crops every season.".to_string()],
        }
    }

    #[test]
    fn resolve_known_label() {
        let table =
            RecommendationTable::from_records([("Tomato_Blight", sample_record("Blight."))]);
        let rec = table.resolve("Tomato_Blight");
        assert_eq!(rec.overview, "Blight.");
    }

    #[test]
    fn resolve_missing_label_is_total() {
        let table =
            RecommendationTable::from_records([("Tomato_Blight", sample_record("Blight."))]);
        let rec = table.resolve("Never_Seen_Before");
        assert_eq!(rec, RecommendationRecord::fallback());
        assert!(!rec.overview.is_empty());
        assert!(!rec.treatment.is_empty());
        assert!(!rec.prevention.is_empty());
    }

    #[test]
    fn unknown_prefers_table_entry_over_fallback() {
        let table = RecommendationTable::from_records([(
            UNKNOWN_LABEL,
            sample_record("Could not identify the disease."),
        )]);
        let rec = table.resolve(UNKNOWN_LABEL);
        assert_eq!(rec.overview, "Could not identify the disease.");
    }

    #[test]
    fn unknown_without_table_entry_uses_fallback() {
        let table =
            RecommendationTable::from_records([("Tomato_Blight", sample_record("Blight."))]);
        assert_eq!(table.resolve(UNKNOWN_LABEL), RecommendationRecord::fallback());
    }

    #[test]
    fn loads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "Apple_Scab": {
                    "overview": "Fungal disease of apple leaves.",
                    "treatment": ["Apply fungicide."],
                    "prevention": ["Prune for airflow."]
                }
            }"#,
        )
        .unwrap();

        let table = RecommendationTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.resolve("Apple_Scab").overview,
            "Fungal disease of apple leaves."
        );
    }

    #[test]
    fn rejects_records_with_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"Apple_Scab": {"overview": "no lists"}}"#)
            .unwrap();
        assert!(matches!(
            RecommendationTable::load(file.path()),
            Err(RecommendationError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RecommendationTable::load(Path::new("/nonexistent/recommendations.json"))
            .unwrap_err();
        assert!(matches!(err, RecommendationError::Io { .. }));
    }
}
