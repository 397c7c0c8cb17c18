//! Session scope and login resolution.

use thiserror::Error;

use crate::models::{PatientId, RecordStore};

/// Login errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Invalid Patient ID")]
    InvalidIdentifier,
}

/// Resolve a user-supplied identifier against the record store.
///
/// The lookup is an exact key match; callers trim their own input.
pub fn resolve(store: &RecordStore, candidate: &str) -> Result<PatientId, LoginError> {
    if store.contains(candidate) {
        Ok(PatientId::new(candidate))
    } else {
        Err(LoginError::InvalidIdentifier)
    }
}

/// Owns the selected patient for one viewer session.
///
/// Set on login, cleared on logout. Screens receive the identifier from here
/// explicitly; nothing else holds it.
#[derive(Debug, Clone)]
pub struct Session {
    session_id: uuid::Uuid,
    patient_id: Option<PatientId>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with no patient selected.
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4(),
            patient_id: None,
        }
    }

    /// Correlation ID for log lines.
    pub fn session_id(&self) -> uuid::Uuid {
        self.session_id
    }

    pub fn patient_id(&self) -> Option<&PatientId> {
        self.patient_id.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.patient_id.is_some()
    }

    /// Select a patient.
    pub fn select(&mut self, patient_id: PatientId) {
        self.patient_id = Some(patient_id);
    }

    /// Drop the selected patient.
    pub fn clear(&mut self) {
        self.patient_id = None;
    }
}
