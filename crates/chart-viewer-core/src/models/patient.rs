//! Local patient index models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A row of the local patient index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexedPatient {
    /// Autoincrement row ID
    pub id: i64,
    /// Patient name
    pub name: String,
    /// Free-form symptoms payload, stored as JSON text
    pub symptoms: Value,
}

/// Insertion payload for the local patient index.
///
/// Both fields are optional at the wire level so that a missing field can be
/// reported as a validation failure instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symptoms: Option<Value>,
}

impl NewPatient {
    pub fn new(name: impl Into<String>, symptoms: Value) -> Self {
        Self {
            name: Some(name.into()),
            symptoms: Some(symptoms),
        }
    }

    /// Return `(name, symptoms)` when both are present and non-empty.
    pub fn validated(&self) -> Option<(&str, &Value)> {
        let name = self.name.as_deref().filter(|n| !n.is_empty())?;
        let symptoms = self.symptoms.as_ref().filter(|s| match s {
            Value::Null => false,
            Value::String(text) => !text.is_empty(),
            _ => true,
        })?;
        Some((name, symptoms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validated() {
        let ok = NewPatient::new("Ada", json!(["cough"]));
        assert_eq!(ok.validated(), Some(("Ada", &json!(["cough"]))));

        let missing_name: NewPatient = serde_json::from_value(json!({"symptoms": "fever"})).unwrap();
        assert!(missing_name.validated().is_none());

        let empty_symptoms = NewPatient::new("Ada", json!(""));
        assert!(empty_symptoms.validated().is_none());

        let null_symptoms = NewPatient::new("Ada", Value::Null);
        assert!(null_symptoms.validated().is_none());
    }
}
