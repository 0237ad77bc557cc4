//! Class-index table — model output index → disease label.
//!
//! Loaded once at startup from the JSON file emitted alongside the trained
//! model (`{"0": "Apple_Scab", "1": "Corn_Common_Rust", ...}`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LabelTableError {
    #[error("cannot read class index file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid class index file: {0}")]
    Parse(String),
}

/// Immutable mapping from model output index to disease label.
#[derive(Debug, Clone)]
pub struct ClassIndexTable {
    names: HashMap<usize, String>,
}

impl ClassIndexTable {
    /// Load the table from a JSON object with stringified integer keys.
    pub fn load(path: &Path) -> Result<Self, LabelTableError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LabelTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|e| LabelTableError::Parse(e.to_string()))?;

        let mut names = HashMap::with_capacity(parsed.len());
        for (key, name) in parsed {
            let index: usize = key.parse().map_err(|_| {
                LabelTableError::Parse(format!("class index key is not an integer: {key:?}"))
            })?;
            names.insert(index, name);
        }

        if names.is_empty() {
            return Err(LabelTableError::Parse("class index file is empty".into()));
        }

        Ok(Self { names })
    }

    /// Build a table directly from entries (tests, fixtures).
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(i, name)| (i, name.into()))
                .collect(),
        }
    }

    /// Label for a model output index, if the index is known.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
