use std::path::PathBuf;
use std::time::Duration;

use crate::{NoticeId, RequestId};

/// Work the session asks the platform to perform. Request effects carry the
/// backend address that was current when they were issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendChat {
        request_id: RequestId,
        base_url: String,
        query: String,
    },
    UploadFile {
        upload_id: RequestId,
        base_url: String,
        path: PathBuf,
    },
    UploadText {
        upload_id: RequestId,
        base_url: String,
        content: String,
    },
    ProbeStatus {
        probe_id: RequestId,
        base_url: String,
    },
    PersistBackendAddress {
        address: String,
    },
    /// Deliver `Msg::NoticeExpired { notice_id }` after `after` has elapsed.
    ExpireNotice {
        notice_id: NoticeId,
        after: Duration,
    },
}
