use crate::{
    ChatAnswer, NoticeId, RequestFailure, RequestId, StatusReport, UploadPayload, UploadReceipt,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted a chat message.
    MessageSubmitted(String),
    /// User asked to ingest a file or a block of text.
    UploadRequested(UploadPayload),
    /// Startup, periodic poll or explicit request for a status probe.
    StatusRefreshRequested,
    /// User saved a new backend address in the settings.
    BackendAddressSubmitted(String),
    /// Outcome of saving a validated backend address.
    BackendAddressPersisted {
        address: String,
        result: Result<(), String>,
    },
    /// User cleared the conversation.
    NewSessionRequested,
    /// Transport completion for a chat request.
    ChatCompleted {
        request_id: RequestId,
        result: Result<ChatAnswer, RequestFailure>,
    },
    /// Transport completion for an upload.
    UploadCompleted {
        upload_id: RequestId,
        result: Result<UploadReceipt, RequestFailure>,
        /// Local wall-clock label of the completion, shown as "last updated".
        finished_at: Option<String>,
    },
    /// Transport completion for a status probe.
    StatusProbed {
        probe_id: RequestId,
        result: Result<StatusReport, RequestFailure>,
    },
    /// Expiry timer for a notice fired.
    NoticeExpired { notice_id: NoticeId },
}
