//! HTTP error mapping for the index service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use chart_viewer_core::db::{DbError, REQUIRED_FIELDS_MESSAGE};

/// Index service errors.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Database lock poisoned")]
    LockPoisoned,
}

pub type IndexResult<T> = Result<T, IndexError>;

impl IndexError {
    pub fn missing_fields() -> Self {
        IndexError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())
    }

    /// Text of the `error` field in the response body.
    pub fn message(&self) -> String {
        match self {
            IndexError::Db(DbError::Constraint(msg)) => msg.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            IndexError::Validation(_) | IndexError::Db(DbError::Constraint(_)) => {
                StatusCode::BAD_REQUEST
            }
            IndexError::Db(_) | IndexError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IndexError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Index request failed");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(IndexError::missing_fields().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            IndexError::Db(DbError::Constraint("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(IndexError::LockPoisoned.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_constraint_message_is_bare() {
        let err = IndexError::Db(DbError::Constraint(REQUIRED_FIELDS_MESSAGE.into()));
        assert_eq!(err.message(), REQUIRED_FIELDS_MESSAGE);
        assert_eq!(IndexError::missing_fields().message(), REQUIRED_FIELDS_MESSAGE);
    }
}
