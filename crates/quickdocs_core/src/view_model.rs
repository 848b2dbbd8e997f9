use crate::{Connectivity, Notice, RequestId, TranscriptEntry, UploadStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRowView {
    pub upload_id: RequestId,
    pub label: String,
    pub status: UploadStatus,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub backend_address: String,
    pub connectivity: Connectivity,
    pub document_count: Option<u64>,
    pub last_ingested_at: Option<String>,
    pub transcript: Vec<TranscriptEntry>,
    pub notice: Option<Notice>,
    pub uploads: Vec<UploadRowView>,
    pub chats_in_flight: usize,
    pub uploads_in_flight: usize,
}
