use std::time::Duration;

pub type NoticeId = u64;

/// How long notices from file, chat and settings flows stay visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);
/// How long notices from text upload flows stay visible.
pub const TEXT_NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Loading,
    Success,
    Error,
}

/// Single-slot, auto-expiring status message shown outside the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub message: String,
    pub severity: Severity,
}
