//! Chat bridge for one patient-data screen visit.
//!
//! Appends the user's question to the log, forwards it to the backend and
//! appends whatever comes back. Failures never escape: they turn into a fixed
//! assistant message. At most one question is in flight at a time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use chart_viewer_core::{ChatLog, ChatMessage, PatientId};

use crate::client::{AnswerBackend, AssistantResult, QueryRequest};
use crate::modes::ModelMode;

/// Assistant message appended when a question could not be answered.
pub const ERROR_MESSAGE: &str = "Error fetching response.";

/// What happened to a submitted question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskOutcome {
    /// Blank question; nothing was sent or logged.
    Ignored,
    /// Another question is still in flight; nothing was sent or logged.
    Busy,
    Answered,
    /// The backend failed and the error message was logged instead.
    Failed,
}

/// A question that holds the slot and has been logged, not yet answered.
///
/// The slot is free again once this is dropped.
struct Pending {
    request: QueryRequest,
    permit: OwnedSemaphorePermit,
}

pub struct ChatBridge<B> {
    backend: Arc<B>,
    log: Mutex<ChatLog>,
    slot: Arc<Semaphore>,
}

impl<B: AnswerBackend> ChatBridge<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            log: Mutex::new(ChatLog::new()),
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    fn lock_log(&self) -> MutexGuard<'_, ChatLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the log.
    pub fn log(&self) -> ChatLog {
        self.lock_log().clone()
    }

    /// Whether a question is awaiting its answer.
    pub fn is_pending(&self) -> bool {
        self.slot.available_permits() == 0
    }

    fn begin(
        &self,
        question: &str,
        patient_id: &PatientId,
        model_mode: ModelMode,
    ) -> Result<Pending, AskOutcome> {
        if question.trim().is_empty() {
            return Err(AskOutcome::Ignored);
        }
        let permit = Arc::clone(&self.slot)
            .try_acquire_owned()
            .map_err(|_| AskOutcome::Busy)?;

        self.lock_log().push(ChatMessage::user(question));
        Ok(Pending {
            request: QueryRequest::new(patient_id, question, model_mode),
            permit,
        })
    }

    fn complete(&self, result: AssistantResult<String>) -> AskOutcome {
        let (message, outcome) = match result {
            Ok(answer) => (ChatMessage::assistant(answer), AskOutcome::Answered),
            Err(e) => {
                warn!(error = %e, "Assistant query failed");
                (ChatMessage::assistant(ERROR_MESSAGE), AskOutcome::Failed)
            }
        };
        self.lock_log().push(message);
        outcome
    }

    /// Ask a question and wait for the answer.
    pub async fn ask(
        &self,
        question: &str,
        patient_id: &PatientId,
        model_mode: ModelMode,
    ) -> AskOutcome {
        let pending = match self.begin(question, patient_id, model_mode) {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };
        let result = self.backend.answer(&pending.request).await;
        let outcome = self.complete(result);
        drop(pending.permit);
        outcome
    }
}

impl<B: AnswerBackend + 'static> ChatBridge<B> {
    /// Ask a question in the background.
    ///
    /// The task keeps only a weak reference to the bridge: if the bridge is
    /// gone when the answer arrives, the answer is dropped and the task
    /// yields `None`.
    pub fn submit(
        self: &Arc<Self>,
        question: &str,
        patient_id: &PatientId,
        model_mode: ModelMode,
    ) -> Result<JoinHandle<Option<AskOutcome>>, AskOutcome> {
        let pending = self.begin(question, patient_id, model_mode)?;
        let backend = Arc::clone(&self.backend);
        let bridge = Arc::downgrade(self);

        let Pending { request, permit } = pending;

        Ok(tokio::spawn(async move {
            let result = backend.answer(&request).await;
            let outcome = match bridge.upgrade() {
                Some(bridge) => Some(bridge.complete(result)),
                None => {
                    debug!("Chat closed before the answer arrived, discarding");
                    None
                }
            };
            // Held until the answer is logged.
            drop(permit);
            outcome
        }))
    }
}
