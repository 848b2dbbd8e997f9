use crate::upload::display_name;
use crate::{
    AppState, BackendAddress, Citations, ConfidenceTier, Connectivity, Effect, Msg, NewEntry,
    RequestFailure, RequestId, Severity, UploadKind, UploadPayload, UploadReceipt, NOTICE_TTL,
    TEXT_NOTICE_TTL,
};

/// Text of the pending assistant entry shown while a chat is in flight.
pub const THINKING_PLACEHOLDER: &str = "Thinking...";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::MessageSubmitted(text) => send_message(&mut state, &text),
        Msg::UploadRequested(payload) => upload_artifact(&mut state, payload),
        Msg::StatusRefreshRequested => vec![probe_status(&mut state)],
        Msg::BackendAddressSubmitted(raw) => update_backend_address(&mut state, &raw),
        Msg::BackendAddressPersisted { address, result } => {
            backend_address_persisted(&mut state, &address, result)
        }
        Msg::NewSessionRequested => {
            state.start_new_session();
            Vec::new()
        }
        Msg::ChatCompleted { request_id, result } => {
            // The placeholder goes first so a request never shows two entries.
            if state.finish_chat(request_id) {
                state.append_entry(answer_entry(result));
            }
            Vec::new()
        }
        Msg::UploadCompleted {
            upload_id,
            result,
            finished_at,
        } => upload_completed(&mut state, upload_id, result, finished_at),
        Msg::StatusProbed { probe_id, result } => {
            let outcome = result.map_err(|failure| match failure {
                RequestFailure::Application(_) => Connectivity::Error,
                RequestFailure::Transport(_) => Connectivity::Offline,
            });
            state.apply_status(probe_id, outcome);
            Vec::new()
        }
        Msg::NoticeExpired { notice_id } => {
            state.expire_notice(notice_id);
            Vec::new()
        }
    };

    (state, effects)
}

fn send_message(state: &mut AppState, text: &str) -> Vec<Effect> {
    let query = text.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let request_id = state.begin_chat(query, THINKING_PLACEHOLDER);
    vec![Effect::SendChat {
        request_id,
        base_url: base_url(state),
        query: query.to_string(),
    }]
}

fn answer_entry(result: Result<crate::ChatAnswer, RequestFailure>) -> NewEntry {
    match result {
        Ok(answer) => {
            let tier = answer.confidence.unwrap_or(ConfidenceTier::Low);
            NewEntry::assistant(answer.text, Citations::new(answer.sources, tier))
        }
        Err(RequestFailure::Application(message)) => {
            NewEntry::assistant_error(format!("❌ {message}"))
        }
        Err(RequestFailure::Transport(detail)) => NewEntry::assistant_error(format!(
            "❌ Connection error: {detail}. Please check your settings and make sure the backend is running."
        )),
    }
}

fn upload_artifact(state: &mut AppState, payload: UploadPayload) -> Vec<Effect> {
    match payload {
        UploadPayload::Text(content) => {
            let content = content.trim();
            if content.is_empty() {
                return vec![state.show_notice(
                    "Please enter some content first!",
                    Severity::Error,
                    TEXT_NOTICE_TTL,
                )];
            }
            let upload_id = state.begin_upload(UploadKind::Text);
            vec![
                Effect::UploadText {
                    upload_id,
                    base_url: base_url(state),
                    content: content.to_string(),
                },
                state.show_notice(
                    "📝 Processing your text content...",
                    Severity::Loading,
                    TEXT_NOTICE_TTL,
                ),
            ]
        }
        UploadPayload::File(path) => {
            if path.as_os_str().is_empty() {
                return vec![state.show_notice(
                    "Please select a file first!",
                    Severity::Error,
                    NOTICE_TTL,
                )];
            }
            let upload_id = state.begin_upload(UploadKind::File {
                name: display_name(&path),
            });
            vec![
                Effect::UploadFile {
                    upload_id,
                    base_url: base_url(state),
                    path,
                },
                state.show_notice(
                    "📤 Uploading and processing your file...",
                    Severity::Loading,
                    NOTICE_TTL,
                ),
            ]
        }
    }
}

fn upload_completed(
    state: &mut AppState,
    upload_id: RequestId,
    result: Result<UploadReceipt, RequestFailure>,
    finished_at: Option<String>,
) -> Vec<Effect> {
    if state.upload_status(upload_id).is_none() {
        // Issued before the session was reset: nothing to show, but the
        // backend still ingested the document.
        return match result {
            Ok(_) => vec![probe_status(state)],
            Err(_) => Vec::new(),
        };
    }
    let Some(kind) = state.finish_upload(upload_id, result.is_ok()) else {
        return Vec::new();
    };
    let ttl = match kind {
        UploadKind::File { .. } => NOTICE_TTL,
        UploadKind::Text => TEXT_NOTICE_TTL,
    };

    match result {
        Ok(receipt) => {
            let summary = match &kind {
                UploadKind::File { name } => format!(
                    "📁 Successfully uploaded \"{}\" with {} text chunks!",
                    receipt.filename.as_deref().unwrap_or(name),
                    receipt.chunk_count
                ),
                UploadKind::Text => format!(
                    "📝 Successfully processed your text content with {} text chunks!",
                    receipt.chunk_count
                ),
            };
            state.append_entry(NewEntry::system(summary));
            if let Some(at) = finished_at {
                state.set_last_ingested(at);
            }
            vec![
                state.show_notice(format!("✅ {}", receipt.message), Severity::Success, ttl),
                probe_status(state),
            ]
        }
        Err(RequestFailure::Application(message)) => {
            vec![state.show_notice(format!("❌ {message}"), Severity::Error, ttl)]
        }
        Err(RequestFailure::Transport(detail)) => vec![state.show_notice(
            format!("❌ Connection error: {detail}"),
            Severity::Error,
            ttl,
        )],
    }
}

/// The address only takes effect once it has been saved.
fn update_backend_address(state: &mut AppState, raw: &str) -> Vec<Effect> {
    match BackendAddress::parse(raw) {
        Ok(address) => vec![Effect::PersistBackendAddress {
            address: address.to_string(),
        }],
        Err(_) => vec![invalid_address_notice(state)],
    }
}

fn backend_address_persisted(
    state: &mut AppState,
    address: &str,
    result: Result<(), String>,
) -> Vec<Effect> {
    if let Err(reason) = result {
        return vec![state.show_notice(
            format!("❌ Failed to save API URL: {reason}"),
            Severity::Error,
            NOTICE_TTL,
        )];
    }
    let Ok(address) = BackendAddress::parse(address) else {
        return vec![invalid_address_notice(state)];
    };
    state.set_backend_address(address);
    vec![
        state.show_notice("API URL updated successfully!", Severity::Success, NOTICE_TTL),
        probe_status(state),
    ]
}

fn invalid_address_notice(state: &mut AppState) -> Effect {
    state.show_notice("Please enter a valid URL", Severity::Error, NOTICE_TTL)
}

fn probe_status(state: &mut AppState) -> Effect {
    Effect::ProbeStatus {
        probe_id: state.next_request_id(),
        base_url: base_url(state),
    }
}

fn base_url(state: &AppState) -> String {
    state.config().backend_address.to_string()
}
