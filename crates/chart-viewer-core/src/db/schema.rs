//! SQLite schema definition.

/// Schema for the local patient index.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    symptoms TEXT NOT NULL                       -- JSON document
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);
"#;
