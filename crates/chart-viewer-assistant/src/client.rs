//! HTTP client for the question-answering service.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use chart_viewer_core::PatientId;

use crate::modes::ModelMode;

/// Assistant service errors.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Assistant returned HTTP {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AssistantResult<T> = Result<T, AssistantError>;

/// Body of `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    pub patient_id: String,
    pub query: String,
    pub model_mode: ModelMode,
}

impl QueryRequest {
    pub fn new(patient_id: &PatientId, query: impl Into<String>, model_mode: ModelMode) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            query: query.into(),
            model_mode,
        }
    }
}

/// Body returned by `/query` and `/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerResponse {
    pub answer: String,
}

/// Anything that can answer chat questions about a patient.
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// Load a patient's data before the first question.
    async fn prepare(&self, patient_id: &PatientId) -> AssistantResult<Value>;

    async fn answer(&self, request: &QueryRequest) -> AssistantResult<String>;
}

/// reqwest client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl AssistantClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` on every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AssistantResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Ask the service to load a patient's data ahead of questions.
    ///
    /// The returned document is informational only.
    pub async fn prepare_patient(&self, patient_id: &PatientId) -> AssistantResult<Value> {
        debug!(patient_id = %patient_id, "Preparing patient on assistant");
        let response = self
            .request(Method::GET, "/get_patient")
            .query(&[("patient_id", patient_id.as_str())])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Ask one question.
    pub async fn query(&self, request: &QueryRequest) -> AssistantResult<AnswerResponse> {
        let response = self.request(Method::POST, "/query").json(request).send().await?;
        Self::decode(response).await
    }

    /// Liveness ping.
    pub async fn health(&self) -> AssistantResult<String> {
        let response = self.request(Method::POST, "/health").send().await?;
        Self::decode::<AnswerResponse>(response).await.map(|r| r.answer)
    }
}

#[async_trait]
impl AnswerBackend for AssistantClient {
    async fn prepare(&self, patient_id: &PatientId) -> AssistantResult<Value> {
        self.prepare_patient(patient_id).await
    }

    async fn answer(&self, request: &QueryRequest) -> AssistantResult<String> {
        self.query(request).await.map(|r| r.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_request_wire_shape() {
        let request = QueryRequest::new(&PatientId::new("P1"), "Any allergies?", ModelMode::Reasoning);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"patient_id": "P1", "query": "Any allergies?", "model_mode": "reasoning"})
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = AssistantClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
