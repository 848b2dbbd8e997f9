use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub type RequestId = u64;

/// Body of a successful `POST /chat`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    #[serde(default)]
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceRef {
    pub source: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub similarity_score: f64,
}

/// Body of a successful upload (file or text).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub chunks_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusReply {
    #[serde(default)]
    pub total_documents: u64,
}

/// File contents read from disk, ready for a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ChatCompleted {
        request_id: RequestId,
        result: Result<ChatReply, TransportError>,
    },
    UploadCompleted {
        upload_id: RequestId,
        result: Result<UploadReply, TransportError>,
    },
    StatusProbed {
        probe_id: RequestId,
        result: Result<StatusReply, TransportError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// True when the backend answered but reported a failure.
    pub fn is_application(&self) -> bool {
        matches!(self.kind, FailureKind::Application { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Non-success HTTP status; the message comes from the response body.
    Application { status: u16 },
    InvalidUrl,
    Timeout,
    Network,
    MalformedPayload,
    ReadFile,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Application { status } => write!(f, "backend error (http {status})"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedPayload => write!(f, "malformed payload"),
            FailureKind::ReadFile => write!(f, "could not read file"),
        }
    }
}
