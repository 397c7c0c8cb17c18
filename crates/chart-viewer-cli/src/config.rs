//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

use chart_viewer_assistant::{AssistantClient, ModelMode};

/// Read-only patient chart viewer.
#[derive(Parser, Debug, Clone)]
#[command(name = "chart-viewer", version, about)]
pub struct Config {
    /// Patient dataset JSON: `{ "<patient_id>": { "<category>": [...] } }`
    #[arg(long, env = "CHART_DATA")]
    pub data: PathBuf,

    /// Base URL of the question-answering service
    #[arg(long, env = "ASSISTANT_URL", default_value = "http://127.0.0.1:5000")]
    pub assistant_url: String,

    /// Bearer token for the question-answering service
    #[arg(long, env = "ASSISTANT_TOKEN")]
    pub assistant_token: Option<String>,

    /// Initial model mode: fast, reasoning or goldilocks
    #[arg(long, env = "MODEL_MODE", default_value = "fast")]
    pub model_mode: ModelMode,
}

impl Config {
    pub fn assistant_client(&self) -> AssistantClient {
        let client = AssistantClient::new(&self.assistant_url);
        match &self.assistant_token {
            Some(token) => client.with_bearer_token(token),
            None => client,
        }
    }
}
