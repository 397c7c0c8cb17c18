//! Patient records and the static record store.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::category::Category;

/// A single flat entry of a sub-collection (one note, one lab, ...).
pub type Entry = Map<String, Value>;

/// Record store errors.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid dataset shape: {0}")]
    InvalidShape(String),
}

pub type RecordResult<T> = Result<T, RecordError>;

/// Identifier of a patient in the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One patient's data: category key → ordered list of entries.
///
/// Key order is the order of the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientRecord {
    sections: Map<String, Value>,
}

impl PatientRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object, rejecting any other shape.
    pub fn from_value(value: Value) -> RecordResult<Self> {
        match value {
            Value::Object(sections) => Ok(Self { sections }),
            other => Err(RecordError::InvalidShape(format!(
                "patient record must be an object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Section keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Entries stored under `key`.
    ///
    /// Absent keys and non-array values yield an empty list; non-object
    /// elements are skipped.
    pub fn entries(&self, key: &str) -> Vec<&Entry> {
        match self.sections.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
            _ => Vec::new(),
        }
    }

    /// Entries for a category, in source order.
    pub fn section(&self, category: Category) -> Vec<&Entry> {
        self.entries(category.key())
    }

    /// The single demographics entry, if present.
    pub fn demographics(&self) -> Option<&Entry> {
        self.section(Category::Demographics).into_iter().next()
    }

    /// Replace (or append) a category's entries.
    pub fn set_section(&mut self, category: Category, entries: Vec<Entry>) {
        let items = entries.into_iter().map(Value::Object).collect();
        self.sections
            .insert(category.key().to_string(), Value::Array(items));
    }
}

/// Read-only mapping from patient identifier to patient record.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    patients: HashMap<PatientId, PatientRecord>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the dataset from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> RecordResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parse a dataset document: `{ "<patient_id>": { "<category>": [...] } }`.
    pub fn from_json_str(json: &str) -> RecordResult<Self> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(map) = root else {
            return Err(RecordError::InvalidShape(format!(
                "dataset root must be an object, found {}",
                json_kind(&root)
            )));
        };

        let mut patients = HashMap::with_capacity(map.len());
        for (id, value) in map {
            let record = PatientRecord::from_value(value).map_err(|e| match e {
                RecordError::InvalidShape(msg) => {
                    RecordError::InvalidShape(format!("patient {}: {}", id, msg))
                }
                other => other,
            })?;
            patients.insert(PatientId::new(id), record);
        }

        Ok(Self { patients })
    }

    /// Exact-key lookup.
    pub fn get(&self, id: &str) -> Option<&PatientRecord> {
        self.patients.get(&PatientId::new(id))
    }

    /// Whether the identifier is a key of the store.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// All identifiers, sorted.
    pub fn ids(&self) -> Vec<&PatientId> {
        let mut ids: Vec<_> = self.patients.keys().collect();
        ids.sort();
        ids
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
