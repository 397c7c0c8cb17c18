use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use chart_viewer_core::{IndexedPatient, NewPatient};

use crate::error::{IndexError, IndexResult};
use crate::SharedDb;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    name: Option<String>,
}

pub async fn search_patients(
    State(db): State<SharedDb>,
    Query(params): Query<SearchParams>,
) -> IndexResult<Json<Vec<IndexedPatient>>> {
    let fragment = params.name.unwrap_or_default();
    let db = db.lock().map_err(|_| IndexError::LockPoisoned)?;
    let patients = db.search_patients(&fragment)?;
    debug!(name = %fragment, count = patients.len(), "Patient search");
    Ok(Json(patients))
}

pub async fn create_patient(
    State(db): State<SharedDb>,
    body: Result<Json<NewPatient>, JsonRejection>,
) -> IndexResult<(StatusCode, Json<IndexedPatient>)> {
    let Json(patient) = body.map_err(|_| IndexError::missing_fields())?;
    if patient.validated().is_none() {
        return Err(IndexError::missing_fields());
    }

    let db = db.lock().map_err(|_| IndexError::LockPoisoned)?;
    let stored = db.insert_patient(&patient)?;
    info!(id = stored.id, "Patient indexed");
    Ok((StatusCode::CREATED, Json(stored)))
}
