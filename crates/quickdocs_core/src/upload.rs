use std::path::{Path, PathBuf};

use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPayload {
    File(PathBuf),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadKind {
    File { name: String },
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub id: RequestId,
    pub kind: UploadKind,
    status: UploadStatus,
}

impl UploadTask {
    pub fn new(id: RequestId, kind: UploadKind) -> Self {
        Self {
            id,
            kind,
            status: UploadStatus::Idle,
        }
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    /// `Idle -> InFlight`. Returns false for any other starting state.
    pub fn start(&mut self) -> bool {
        if self.status != UploadStatus::Idle {
            return false;
        }
        self.status = UploadStatus::InFlight;
        true
    }

    /// `InFlight -> Succeeded | Failed`. Terminal states are never left.
    pub fn finish(&mut self, succeeded: bool) -> bool {
        if self.status != UploadStatus::InFlight {
            return false;
        }
        self.status = if succeeded {
            UploadStatus::Succeeded
        } else {
            UploadStatus::Failed
        };
        true
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_moves_forward_only() {
        let mut task = UploadTask::new(1, UploadKind::Text);
        assert!(!task.finish(true));
        assert!(task.start());
        assert!(!task.start());
        assert!(task.finish(false));
        assert_eq!(task.status(), UploadStatus::Failed);
        assert!(!task.finish(true));
        assert_eq!(task.status(), UploadStatus::Failed);
    }

    #[test]
    fn display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("/tmp/docs/policy.pdf")), "policy.pdf");
    }
}
