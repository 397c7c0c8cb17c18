//! Local patient index service.
//!
//! ```text
//! GET  /api/patients?name=<substring>  → 200 [{id, name, symptoms}]
//! POST /api/patients {name, symptoms}  → 201 {id, name, symptoms}
//!                                      → 400 {"error": "Name and symptoms are required"}
//! storage failures                     → 500 {"error": "<cause>"}
//! ```
//!
//! One SQLite connection is shared behind a mutex; writes are serialized there.

pub mod error;
pub mod handlers;

use std::sync::{Arc, Mutex};

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use chart_viewer_core::Database;

pub use error::{IndexError, IndexResult};

/// Database handle shared across requests.
pub type SharedDb = Arc<Mutex<Database>>;

/// Build the service router.
pub fn router(db: SharedDb) -> Router {
    Router::new()
        .route(
            "/api/patients",
            get(handlers::search_patients).post(handlers::create_patient),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}
