use crate::transcript::{ConfidenceTier, Source};

/// Successful answer from the chat endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatAnswer {
    pub text: String,
    pub sources: Vec<Source>,
    pub confidence: Option<ConfidenceTier>,
}

/// Successful ingestion acknowledgement from an upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub message: String,
    pub filename: Option<String>,
    pub chunk_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub document_count: u64,
}

/// Why a backend request did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// Backend was reached and answered with a failure message.
    Application(String),
    /// Network, timeout or unparseable payload; the message is local.
    Transport(String),
}

impl RequestFailure {
    pub fn message(&self) -> &str {
        match self {
            RequestFailure::Application(message) | RequestFailure::Transport(message) => message,
        }
    }
}
