//! QuickDocs engine: backend transport and request execution.
mod engine;
mod persist;
mod transport;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use persist::{AtomicFile, PersistError};
pub use transport::{ReqwestTransport, TextRoute, Transport, TransportSettings};
pub use types::{
    ChatReply, EngineEvent, FailureKind, FileUpload, RequestId, SourceRef, StatusReply,
    TransportError, UploadReply,
};
