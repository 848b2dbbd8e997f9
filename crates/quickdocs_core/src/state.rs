use std::collections::BTreeMap;
use std::time::Duration;

use crate::notice::{Notice, NoticeId, Severity};
use crate::transcript::{EntryId, NewEntry, Transcript, TranscriptEntry};
use crate::upload::{UploadKind, UploadStatus, UploadTask};
use crate::view_model::{AppViewModel, UploadRowView};
use crate::{BackendAddress, Config, Effect, StatusReport};

/// Identifier shared by chat requests, uploads and status probes.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// No probe has completed against the current address yet.
    #[default]
    Unknown,
    Connected,
    /// Backend answered the probe with a failure status.
    Error,
    /// Backend could not be reached.
    Offline,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    config: Config,
    transcript: Transcript,
    /// Outstanding chat requests and the placeholder each one owns.
    pending_chats: BTreeMap<RequestId, EntryId>,
    uploads: BTreeMap<RequestId, UploadTask>,
    notice: Option<Notice>,
    connectivity: Connectivity,
    document_count: Option<u64>,
    last_ingested_at: Option<String>,
    last_probe_applied: Option<RequestId>,
    /// Probes issued before the last address change target the old backend.
    min_probe_id: RequestId,
    next_request_id: RequestId,
    next_notice_id: NoticeId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        self.transcript.snapshot()
    }

    pub fn upload_status(&self, upload_id: RequestId) -> Option<UploadStatus> {
        self.uploads.get(&upload_id).map(UploadTask::status)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let uploads: Vec<UploadRowView> = self
            .uploads
            .values()
            .map(|task| UploadRowView {
                upload_id: task.id,
                label: match &task.kind {
                    UploadKind::File { name } => name.clone(),
                    UploadKind::Text => "text content".to_string(),
                },
                status: task.status(),
            })
            .collect();
        let uploads_in_flight = uploads
            .iter()
            .filter(|row| row.status == UploadStatus::InFlight)
            .count();

        AppViewModel {
            backend_address: self.config.backend_address.to_string(),
            connectivity: self.connectivity,
            document_count: self.document_count,
            last_ingested_at: self.last_ingested_at.clone(),
            transcript: self.transcript.snapshot().to_vec(),
            notice: self.notice.clone(),
            uploads,
            chats_in_flight: self.pending_chats.len(),
            uploads_in_flight,
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub(crate) fn append_entry(&mut self, entry: NewEntry) -> EntryId {
        self.mark_dirty();
        self.transcript.append(entry)
    }

    /// Appends the user's message and a pending placeholder owned by the new
    /// request.
    pub(crate) fn begin_chat(&mut self, query: &str, placeholder: &str) -> RequestId {
        self.append_entry(NewEntry::user(query));
        let placeholder_id = self.append_entry(NewEntry::placeholder(placeholder));
        let request_id = self.next_request_id();
        self.pending_chats.insert(request_id, placeholder_id);
        request_id
    }

    /// Removes the placeholder of an outstanding chat. Returns false when the
    /// request is unknown, e.g. issued before a new session was started.
    pub(crate) fn finish_chat(&mut self, request_id: RequestId) -> bool {
        match self.pending_chats.remove(&request_id) {
            Some(placeholder_id) => {
                self.transcript.remove_by_id(placeholder_id);
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    pub(crate) fn begin_upload(&mut self, kind: UploadKind) -> RequestId {
        let upload_id = self.next_request_id();
        let mut task = UploadTask::new(upload_id, kind);
        task.start();
        self.uploads.insert(upload_id, task);
        self.mark_dirty();
        upload_id
    }

    /// Moves an in-flight upload to its terminal state and returns its kind.
    pub(crate) fn finish_upload(&mut self, upload_id: RequestId, succeeded: bool) -> Option<UploadKind> {
        let task = self.uploads.get_mut(&upload_id)?;
        if !task.finish(succeeded) {
            return None;
        }
        let kind = task.kind.clone();
        self.mark_dirty();
        Some(kind)
    }

    pub(crate) fn set_last_ingested(&mut self, at: String) {
        self.last_ingested_at = Some(at);
        self.mark_dirty();
    }

    pub(crate) fn set_backend_address(&mut self, address: BackendAddress) {
        if self.config.backend_address != address {
            self.connectivity = Connectivity::Unknown;
            self.document_count = None;
            self.min_probe_id = self.next_request_id + 1;
        }
        self.config.backend_address = address;
        self.mark_dirty();
    }

    /// Applies a probe result unless a newer probe has already been applied
    /// or the probe was sent to a previous backend address.
    pub(crate) fn apply_status(
        &mut self,
        probe_id: RequestId,
        outcome: Result<StatusReport, Connectivity>,
    ) {
        if probe_id < self.min_probe_id
            || self.last_probe_applied.is_some_and(|last| probe_id < last)
        {
            return;
        }
        self.last_probe_applied = Some(probe_id);

        let (connectivity, document_count) = match outcome {
            Ok(report) => (Connectivity::Connected, Some(report.document_count)),
            Err(connectivity) => (connectivity, self.document_count),
        };
        if connectivity != self.connectivity || document_count != self.document_count {
            self.connectivity = connectivity;
            self.document_count = document_count;
            self.mark_dirty();
        }
    }

    /// Replaces the current notice and returns the effect that expires it.
    pub(crate) fn show_notice(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        ttl: Duration,
    ) -> Effect {
        self.next_notice_id += 1;
        let notice_id = self.next_notice_id;
        self.notice = Some(Notice {
            id: notice_id,
            message: message.into(),
            severity,
        });
        self.mark_dirty();
        Effect::ExpireNotice {
            notice_id,
            after: ttl,
        }
    }

    pub(crate) fn expire_notice(&mut self, notice_id: NoticeId) {
        if self.notice.as_ref().is_some_and(|notice| notice.id == notice_id) {
            self.notice = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn start_new_session(&mut self) {
        self.transcript.clear();
        self.pending_chats.clear();
        self.uploads.clear();
        self.notice = None;
        self.mark_dirty();
    }
}
