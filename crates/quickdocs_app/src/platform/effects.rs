use std::sync::Arc;
use std::thread;

use chrono::Local;
use quickdocs_core::{
    ChatAnswer, ConfidenceTier, Config, Effect, Msg, RequestFailure, Source, StatusReport,
    UploadReceipt,
};
use quickdocs_engine::{
    ChatReply, EngineEvent, EngineHandle, EventSink, ReqwestTransport, StatusReply, Transport,
    TransportError, TransportSettings, UploadReply,
};
use quickdocs_logging::{qd_error, qd_info};

use super::persistence::ConfigStore;

/// Delivers a message to the main loop from any thread.
pub type Dispatch = Arc<dyn Fn(Msg) + Send + Sync>;

pub struct EffectRunner {
    engine: EngineHandle,
    config_store: ConfigStore,
    dispatch: Dispatch,
}

impl EffectRunner {
    pub fn new(
        dispatch: Dispatch,
        config_store: ConfigStore,
        settings: TransportSettings,
    ) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(settings)?;
        Self::with_transport(dispatch, config_store, Arc::new(transport))
    }

    pub fn with_transport(
        dispatch: Dispatch,
        config_store: ConfigStore,
        transport: Arc<dyn Transport>,
    ) -> anyhow::Result<Self> {
        let sink = Arc::new(MsgSink {
            dispatch: dispatch.clone(),
        });
        let engine = EngineHandle::new(transport, sink)?;
        Ok(Self {
            engine,
            config_store,
            dispatch,
        })
    }

    pub fn config(&self) -> Config {
        self.config_store.get()
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendChat {
                    request_id,
                    base_url,
                    query,
                } => {
                    qd_info!("SendChat request_id={} query_len={}", request_id, query.len());
                    self.engine.send_chat(request_id, base_url, query);
                }
                Effect::UploadFile {
                    upload_id,
                    base_url,
                    path,
                } => {
                    qd_info!("UploadFile upload_id={} path={:?}", upload_id, path);
                    self.engine.upload_file(upload_id, base_url, path);
                }
                Effect::UploadText {
                    upload_id,
                    base_url,
                    content,
                } => {
                    qd_info!("UploadText upload_id={} content_len={}", upload_id, content.len());
                    self.engine.upload_text(upload_id, base_url, content);
                }
                Effect::ProbeStatus { probe_id, base_url } => {
                    self.engine.probe_status(probe_id, base_url);
                }
                Effect::PersistBackendAddress { address } => {
                    let result = self.config_store.set(&address).map_err(|err| {
                        qd_error!("Failed to save backend address {}: {}", address, err);
                        err.to_string()
                    });
                    if result.is_ok() {
                        qd_info!("Backend address saved: {}", address);
                    }
                    (self.dispatch)(Msg::BackendAddressPersisted { address, result });
                }
                Effect::ExpireNotice { notice_id, after } => {
                    let dispatch = self.dispatch.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        dispatch(Msg::NoticeExpired { notice_id });
                    });
                }
            }
        }
    }
}

struct MsgSink {
    dispatch: Dispatch,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        (self.dispatch)(map_event(event));
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ChatCompleted { request_id, result } => Msg::ChatCompleted {
            request_id,
            result: result.map(map_answer).map_err(map_failure),
        },
        EngineEvent::UploadCompleted { upload_id, result } => {
            let finished_at = result
                .is_ok()
                .then(|| Local::now().format("%H:%M:%S").to_string());
            Msg::UploadCompleted {
                upload_id,
                result: result.map(map_receipt).map_err(map_failure),
                finished_at,
            }
        }
        EngineEvent::StatusProbed { probe_id, result } => Msg::StatusProbed {
            probe_id,
            result: result
                .map(|StatusReply { total_documents }| StatusReport {
                    document_count: total_documents,
                })
                .map_err(map_failure),
        },
    }
}

fn map_answer(reply: ChatReply) -> ChatAnswer {
    ChatAnswer {
        text: reply.response,
        sources: reply
            .sources
            .into_iter()
            .map(|source| Source {
                label: source.source,
                file_type: source.file_type,
                similarity: source.similarity_score,
            })
            .collect(),
        confidence: reply.confidence.as_deref().map(ConfidenceTier::from_label),
    }
}

fn map_receipt(reply: UploadReply) -> UploadReceipt {
    UploadReceipt {
        message: reply.message,
        filename: reply.filename,
        chunk_count: reply.chunks_count,
    }
}

fn map_failure(err: TransportError) -> RequestFailure {
    if err.is_application() {
        RequestFailure::Application(err.message)
    } else {
        RequestFailure::Transport(err.message)
    }
}
