//! QuickDocs core: pure session state machine and view-model helpers.
mod config;
mod effect;
mod msg;
mod notice;
mod reply;
mod state;
mod transcript;
mod update;
mod upload;
mod view_model;

pub use config::{BackendAddress, Config, ConfigError, DEFAULT_BACKEND_ADDRESS, SETTINGS_KEY};
pub use effect::Effect;
pub use msg::Msg;
pub use notice::{Notice, NoticeId, Severity, NOTICE_TTL, TEXT_NOTICE_TTL};
pub use reply::{ChatAnswer, RequestFailure, StatusReport, UploadReceipt};
pub use state::{AppState, Connectivity, RequestId};
pub use transcript::{
    Citations, ConfidenceTier, EntryId, NewEntry, Role, Source, Transcript, TranscriptEntry,
};
pub use update::{update, THINKING_PLACEHOLDER};
pub use upload::{UploadKind, UploadPayload, UploadStatus, UploadTask};
pub use view_model::{AppViewModel, UploadRowView};
