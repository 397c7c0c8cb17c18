//! In-process backend for tests and offline runs.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use chart_viewer_core::PatientId;

use crate::client::{AnswerBackend, AssistantError, AssistantResult, QueryRequest};

#[derive(Debug, Clone)]
enum Reply {
    Answer(String),
    Status(u16),
}

/// Backend that returns a canned reply and records every request.
///
/// A gated backend holds each answer until [`MockBackend::release`] is called.
#[derive(Debug)]
pub struct MockBackend {
    reply: Reply,
    requests: Mutex<Vec<QueryRequest>>,
    prepared: Mutex<Vec<PatientId>>,
    gate: Option<Arc<Notify>>,
}

impl MockBackend {
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            reply: Reply::Answer(answer.into()),
            requests: Mutex::new(Vec::new()),
            prepared: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Backend whose every call fails with an HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            reply: Reply::Status(status),
            requests: Mutex::new(Vec::new()),
            prepared: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Let one held answer through.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Patients prepared so far.
    pub fn prepared(&self) -> Vec<PatientId> {
        self.prepared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl AnswerBackend for MockBackend {
    async fn prepare(&self, patient_id: &PatientId) -> AssistantResult<Value> {
        self.prepared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(patient_id.clone());
        Ok(json!({ "patient_id": patient_id }))
    }

    async fn answer(&self, request: &QueryRequest) -> AssistantResult<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.reply {
            Reply::Answer(answer) => Ok(answer.clone()),
            Reply::Status(status) => Err(AssistantError::Status(*status)),
        }
    }
}
