use std::io;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;

use quickdocs_logging::{qd_info, qd_warn};

use crate::{EngineEvent, FailureKind, FileUpload, RequestId, Transport, TransportError};

/// Receives request completions from the engine thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Chat {
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
}

/// Runs transport calls on a background tokio runtime. Each command is
/// spawned independently, so completions arrive in whatever order the
/// backend answers.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(transport: Arc<dyn Transport>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("quickdocs-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let transport = transport.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(transport.as_ref(), command, sink.as_ref()).await;
                    });
                }
                qd_info!("engine command channel closed; shutting down");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn send_chat(&self, request_id: RequestId, base_url: impl Into<String>, query: impl Into<String>) {
        self.submit(EngineCommand::Chat {
            request_id,
            base_url: base_url.into(),
            query: query.into(),
        });
    }

    pub fn upload_file(&self, upload_id: RequestId, base_url: impl Into<String>, path: PathBuf) {
        self.submit(EngineCommand::UploadFile {
            upload_id,
            base_url: base_url.into(),
            path,
        });
    }

    pub fn upload_text(&self, upload_id: RequestId, base_url: impl Into<String>, content: impl Into<String>) {
        self.submit(EngineCommand::UploadText {
            upload_id,
            base_url: base_url.into(),
            content: content.into(),
        });
    }

    pub fn probe_status(&self, probe_id: RequestId, base_url: impl Into<String>) {
        self.submit(EngineCommand::ProbeStatus {
            probe_id,
            base_url: base_url.into(),
        });
    }

    fn submit(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            qd_warn!("engine thread is gone; dropping command");
        }
    }
}

async fn handle_command(transport: &dyn Transport, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Chat {
            request_id,
            base_url,
            query,
        } => {
            let result = transport.chat(&base_url, &query).await;
            log_outcome("chat", request_id, &result);
            sink.emit(EngineEvent::ChatCompleted { request_id, result });
        }
        EngineCommand::UploadFile {
            upload_id,
            base_url,
            path,
        } => {
            let result = match read_upload(&path).await {
                Ok(file) => transport.upload_file(&base_url, file).await,
                Err(err) => Err(err),
            };
            log_outcome("upload-file", upload_id, &result);
            sink.emit(EngineEvent::UploadCompleted { upload_id, result });
        }
        EngineCommand::UploadText {
            upload_id,
            base_url,
            content,
        } => {
            let result = transport.upload_text(&base_url, &content).await;
            log_outcome("upload-text", upload_id, &result);
            sink.emit(EngineEvent::UploadCompleted { upload_id, result });
        }
        EngineCommand::ProbeStatus { probe_id, base_url } => {
            let result = transport.probe_status(&base_url).await;
            log_outcome("status", probe_id, &result);
            sink.emit(EngineEvent::StatusProbed { probe_id, result });
        }
    }
}

async fn read_upload(path: &Path) -> Result<FileUpload, TransportError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| TransportError::new(FailureKind::ReadFile, format!("{}: {err}", path.display())))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(FileUpload { filename, bytes })
}

fn log_outcome<T>(operation: &str, id: RequestId, result: &Result<T, TransportError>) {
    match result {
        Ok(_) => qd_info!("{} #{} succeeded", operation, id),
        Err(err) => qd_warn!("{} #{} failed: {}", operation, id, err),
    }
}
