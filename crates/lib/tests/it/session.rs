use chatbox::{ChatSession, RequestState, SessionError, SubmitError};

use crate::helpers::test_session;

#[test]
fn test_new_session_is_idle_and_empty() {
    let session = ChatSession::new();
    assert_eq!(session.state(), RequestState::Idle);
    assert!(session.transcript().is_empty());
    assert!(session.status().is_none());
}

#[test]
fn test_overlapping_requests_are_rejected() {
    let mut session = test_session();
    let request = session.begin_request().unwrap();

    let err = session.submit("second").unwrap_err();
    assert!(err.is_request_pending());
    assert_eq!(err.module(), "session");
    assert_eq!(session.begin_request().unwrap_err(), SessionError::RequestPending);

    let outcome = session.controller().submit(request.snapshot(), "first");
    session.complete_request(request, outcome).unwrap();
    assert_eq!(session.transcript().len(), 2);
    assert!(session.begin_request().is_ok());
}

#[test]
fn test_status_reports_start_and_finish() {
    let mut session = test_session();
    session.submit("hello").unwrap();
    assert_eq!(
        session.status(),
        Some("Sending request at 2024-01-01 00:00:00   &   Complete the request at 2024-01-01 00:00:01")
    );
}

#[test]
fn test_empty_message_surfaces_notice() {
    let mut session = test_session();
    session.submit("kept").unwrap();

    let request = session.begin_request().unwrap();
    let outcome = session.controller().submit(request.snapshot(), "");
    assert_eq!(
        session.complete_request(request, outcome).unwrap_err(),
        SubmitError::EmptyInput
    );
    assert_eq!(session.status(), Some("Error: No Message"));
    assert_eq!(session.transcript().len(), 2);
    assert!(!session.is_pending());
}

#[test]
fn test_snapshot_is_stable_while_pending() {
    let mut session = test_session();
    session.submit("one").unwrap();

    let request = session.begin_request().unwrap();
    assert!(request.snapshot().shares_storage_with(session.transcript()));
    assert_eq!(request.started_at(), "2024-01-01 00:00:02");

    let outcome = session.controller().submit(request.snapshot(), "two plot");
    session.complete_request(request, outcome).unwrap();
    assert_eq!(session.transcript().len(), 5);
}

#[test]
fn test_sessions_are_isolated() {
    let mut alice = test_session();
    let mut bob = test_session();
    alice.submit("for alice").unwrap();
    bob.submit("for bob").unwrap();

    assert_eq!(alice.transcript().entries()[0].message(), Some("for alice"));
    assert_eq!(bob.transcript().len(), 2);
    assert_eq!(bob.transcript().entries()[0].message(), Some("for bob"));
}

#[test]
fn test_abandoned_request_reenables_submission() {
    let mut session = test_session();
    let request = session.begin_request().unwrap();
    assert_eq!(session.status(), Some("Sending request"));
    drop(request);

    assert!(!session.is_pending());
    assert!(session.status().is_none());
    session.submit("after drop").unwrap();
    assert_eq!(session.transcript().len(), 2);
}
