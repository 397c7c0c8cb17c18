//! Local patient index operations.

use rusqlite::{params, OptionalExtension, Row};
use serde_json::Value;

use super::{Database, DbError, DbResult};
use crate::models::{IndexedPatient, NewPatient};

/// Message returned when an insert lacks a name or symptoms.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and symptoms are required";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<IndexedPatient> {
    let raw: String = row.get(2)?;
    // Rows written by other tools may hold plain text rather than JSON.
    let symptoms = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
    Ok(IndexedPatient {
        id: row.get(0)?,
        name: row.get(1)?,
        symptoms,
    })
}

/// Escape LIKE wildcards so the query is a literal substring.
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

impl Database {
    /// Insert a patient and return the stored row.
    pub fn insert_patient(&self, patient: &NewPatient) -> DbResult<IndexedPatient> {
        let (name, symptoms) = patient
            .validated()
            .ok_or_else(|| DbError::Constraint(REQUIRED_FIELDS_MESSAGE.into()))?;

        self.conn.execute(
            "INSERT INTO patients (name, symptoms) VALUES (?1, ?2)",
            params![name, serde_json::to_string(symptoms)?],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_patient(id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a patient by row ID.
    pub fn get_patient(&self, id: i64) -> DbResult<Option<IndexedPatient>> {
        self.conn
            .query_row(
                "SELECT id, name, symptoms FROM patients WHERE id = ?",
                [id],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Search patients whose name contains `fragment` (case-insensitive).
    ///
    /// An empty fragment matches every patient.
    pub fn search_patients(&self, fragment: &str) -> DbResult<Vec<IndexedPatient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, symptoms
            FROM patients
            WHERE name LIKE ? ESCAPE '\'
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([like_pattern(fragment)], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let stored = db
            .insert_patient(&NewPatient::new("Ada Lovelace", json!(["cough", "fever"])))
            .unwrap();
        assert!(stored.id > 0);

        let retrieved = db.get_patient(stored.id).unwrap().unwrap();
        assert_eq!(retrieved, stored);
        assert_eq!(retrieved.symptoms, json!(["cough", "fever"]));

        assert!(db.get_patient(stored.id + 100).unwrap().is_none());
    }

    #[test]
    fn test_ids_increase() {
        let db = setup_db();
        let a = db.insert_patient(&NewPatient::new("A", json!("x"))).unwrap();
        let b = db.insert_patient(&NewPatient::new("B", json!("y"))).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_insert_requires_fields() {
        let db = setup_db();

        let missing = NewPatient {
            name: Some("Ada".into()),
            symptoms: None,
        };
        assert!(matches!(
            db.insert_patient(&missing),
            Err(DbError::Constraint(msg)) if msg == REQUIRED_FIELDS_MESSAGE
        ));
        assert!(db.search_patients("").unwrap().is_empty());
    }

    #[test]
    fn test_search_substring() {
        let db = setup_db();
        db.insert_patient(&NewPatient::new("Maxine Doe", json!("a"))).unwrap();
        db.insert_patient(&NewPatient::new("Tom Maxwell", json!("b"))).unwrap();
        db.insert_patient(&NewPatient::new("Luna", json!("c"))).unwrap();

        let results = db.search_patients("max").unwrap();
        let names: Vec<_> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Maxine Doe", "Tom Maxwell"]);

        assert_eq!(db.search_patients("").unwrap().len(), 3);
        assert!(db.search_patients("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_search_wildcards_are_literal() {
        let db = setup_db();
        db.insert_patient(&NewPatient::new("100% Smith", json!("a"))).unwrap();
        db.insert_patient(&NewPatient::new("Jo_Ann", json!("b"))).unwrap();
        db.insert_patient(&NewPatient::new("JoeAnn", json!("c"))).unwrap();

        assert_eq!(db.search_patients("%").unwrap().len(), 1);
        let underscore = db.search_patients("o_A").unwrap();
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].name, "Jo_Ann");
    }

    #[test]
    fn test_plain_text_symptoms_read_back() {
        let db = setup_db();
        db.conn()
            .execute(
                "INSERT INTO patients (name, symptoms) VALUES ('Legacy', 'headache')",
                [],
            )
            .unwrap();

        let found = db.search_patients("Legacy").unwrap();
        assert_eq!(found[0].symptoms, json!("headache"));
    }
}
