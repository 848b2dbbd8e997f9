use std::sync::Once;

use quickdocs_core::{
    update, AppState, Connectivity, Effect, Msg, RequestFailure, RequestId, Role, StatusReport,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(quickdocs_logging::initialize_for_tests);
}

fn request_probe(state: AppState) -> (AppState, RequestId) {
    let (state, effects) = update(state, Msg::StatusRefreshRequested);
    match effects.as_slice() {
        [Effect::ProbeStatus { probe_id, .. }] => (state, *probe_id),
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn successful_probe_marks_connected_with_count() {
    init_logging();
    let (state, probe_id) = request_probe(AppState::new());

    let (mut state, effects) = update(
        state,
        Msg::StatusProbed {
            probe_id,
            result: Ok(StatusReport { document_count: 7 }),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.connectivity, Connectivity::Connected);
    assert_eq!(view.document_count, Some(7));
    assert!(state.consume_dirty());
}

#[test]
fn failures_degrade_indicator_only() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::MessageSubmitted("hi".to_string()));
    let before = state.transcript().to_vec();

    let (state, probe_id) = request_probe(state);
    let (state, _) = update(
        state,
        Msg::StatusProbed {
            probe_id,
            result: Err(RequestFailure::Transport("connection refused".to_string())),
        },
    );
    assert_eq!(state.view().connectivity, Connectivity::Offline);

    let (state, probe_id) = request_probe(state);
    let (state, _) = update(
        state,
        Msg::StatusProbed {
            probe_id,
            result: Err(RequestFailure::Application("500".to_string())),
        },
    );
    assert_eq!(state.view().connectivity, Connectivity::Error);
    assert_eq!(state.transcript(), before.as_slice());
    assert!(state.transcript().iter().all(|e| e.role != Role::System));
    assert!(state.notice().is_none());
}

#[test]
fn stale_probe_result_is_ignored() {
    init_logging();
    let (state, older) = request_probe(AppState::new());
    let (state, newer) = request_probe(state);

    let (state, _) = update(
        state,
        Msg::StatusProbed {
            probe_id: newer,
            result: Ok(StatusReport { document_count: 3 }),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::StatusProbed {
            probe_id: older,
            result: Err(RequestFailure::Transport("timeout".to_string())),
        },
    );

    assert_eq!(state.view().connectivity, Connectivity::Connected);
    assert_eq!(state.view().document_count, Some(3));
    state.consume_dirty();

    let (mut state, _) = update(
        state,
        Msg::StatusProbed {
            probe_id: newer,
            result: Ok(StatusReport { document_count: 3 }),
        },
    );
    assert!(!state.consume_dirty());
}

#[test]
fn status_from_previous_address_is_ignored() {
    init_logging();
    let (state, old_probe) = request_probe(AppState::new());

    let (state, _) = update(
        state,
        Msg::BackendAddressPersisted {
            address: "http://dead.example:8000".to_string(),
            result: Ok(()),
        },
    );
    let (state, _) = update(
        state,
        Msg::StatusProbed {
            probe_id: old_probe,
            result: Ok(StatusReport { document_count: 9 }),
        },
    );

    let view = state.view();
    assert_eq!(view.connectivity, Connectivity::Unknown);
    assert_eq!(view.document_count, None);

    let (state, new_probe) = request_probe(state);
    let (state, _) = update(
        state,
        Msg::StatusProbed {
            probe_id: new_probe,
            result: Err(RequestFailure::Transport("connection refused".to_string())),
        },
    );
    assert_eq!(state.view().connectivity, Connectivity::Offline);
}
