use std::time::Duration;

use quickdocs_logging::{qd_debug, qd_warn};
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{ChatReply, FailureKind, FileUpload, StatusReply, TransportError, UploadReply};

const UPLOAD_FILE_PATH: &str = "upload-file";
const UPLOAD_CMS_PATH: &str = "upload-cms";
const CHAT_PATH: &str = "chat";
const STATUS_PATH: &str = "status";

/// Endpoint used to ingest raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRoute {
    /// `POST /upload-cms` with a `content` field.
    #[default]
    Cms,
    /// `POST /upload-file` with a `content` field, for backends without a
    /// dedicated text endpoint.
    FileEndpoint,
}

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub connect_timeout: Duration,
    /// Applies to uploads and chat; ingestion can take a while server side.
    pub request_timeout: Duration,
    pub status_timeout: Duration,
    pub text_route: TextRoute,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            status_timeout: Duration::from_secs(10),
            text_route: TextRoute::default(),
        }
    }
}

/// Boundary between the session and the retrieval backend. Every call is a
/// single attempt; `base` is the backend address current when it was issued.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn upload_file(&self, base: &str, file: FileUpload)
        -> Result<UploadReply, TransportError>;

    async fn upload_text(&self, base: &str, content: &str) -> Result<UploadReply, TransportError>;

    async fn chat(&self, base: &str, query: &str) -> Result<ChatReply, TransportError>;

    async fn probe_status(&self, base: &str) -> Result<StatusReply, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: TransportSettings,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        base: &str,
        path: &str,
        form: Form,
    ) -> Result<T, TransportError> {
        let url = endpoint(base, path)?;
        qd_debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .timeout(self.settings.request_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_body(response).await
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn upload_file(
        &self,
        base: &str,
        file: FileUpload,
    ) -> Result<UploadReply, TransportError> {
        let part = Part::bytes(file.bytes).file_name(file.filename);
        let form = Form::new().part("file", part);
        self.post_form(base, UPLOAD_FILE_PATH, form).await
    }

    async fn upload_text(&self, base: &str, content: &str) -> Result<UploadReply, TransportError> {
        let path = match self.settings.text_route {
            TextRoute::Cms => UPLOAD_CMS_PATH,
            TextRoute::FileEndpoint => UPLOAD_FILE_PATH,
        };
        let form = Form::new().text("content", content.to_string());
        self.post_form(base, path, form).await
    }

    async fn chat(&self, base: &str, query: &str) -> Result<ChatReply, TransportError> {
        let form = Form::new().text("query", query.to_string());
        self.post_form(base, CHAT_PATH, form).await
    }

    async fn probe_status(&self, base: &str) -> Result<StatusReply, TransportError> {
        let url = endpoint(base, STATUS_PATH)?;
        let response = self
            .client
            .get(url)
            .timeout(self.settings.status_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_body(response).await
    }
}

/// Failure body shapes the backend uses: uploads answer `{message}`, chat
/// answers `{response}`, framework errors answer `{detail}`.
#[derive(Debug, Default, Deserialize)]
struct FailureBody {
    message: Option<String>,
    response: Option<String>,
    detail: Option<serde_json::Value>,
}

impl FailureBody {
    fn into_message(self) -> Option<String> {
        self.message.or(self.response).or_else(|| {
            self.detail.map(|detail| match detail {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            })
        })
    }
}

fn endpoint(base: &str, path: &str) -> Result<Url, TransportError> {
    let joined = format!("{}/{}", base.trim().trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|err| TransportError::new(FailureKind::InvalidUrl, format!("{joined}: {err}")))
}

async fn read_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    classify(status, &body)
}

fn classify<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, TransportError> {
    if !status.is_success() {
        let message = serde_json::from_slice::<FailureBody>(body)
            .ok()
            .and_then(FailureBody::into_message)
            .unwrap_or_else(|| status.to_string());
        qd_warn!("backend answered {}: {}", status, message);
        return Err(TransportError::new(
            FailureKind::Application {
                status: status.as_u16(),
            },
            message,
        ));
    }
    serde_json::from_slice(body).map_err(|err| {
        TransportError::new(
            FailureKind::MalformedPayload,
            format!("unexpected response from backend: {err}"),
        )
    })
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, "request timed out");
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
