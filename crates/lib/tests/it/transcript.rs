use chatbox::{
    ChatEntry, EntryKind, PlotPoint, Sender, SubmitError, Transcript, TranscriptController, submit,
};

use crate::helpers::transcript_from;

#[test]
fn test_empty_submission_leaves_transcript_unchanged() {
    let transcript = transcript_from(&["earlier"]);
    let before = transcript.clone();

    assert_eq!(submit(&transcript, ""), Err(SubmitError::EmptyInput));
    assert_eq!(transcript, before);
    assert!(transcript.shares_storage_with(&before));
}

#[test]
fn test_hello_produces_two_entries() {
    let transcript = submit(&Transcript::new(), "hello").unwrap();
    assert_eq!(
        transcript.entries(),
        &[
            ChatEntry::text(Sender::User, "hello"),
            ChatEntry::text(Sender::Server, "hello"),
        ]
    );
}

#[test]
fn test_plot_request_appends_five_point_plot() {
    let transcript = submit(&Transcript::new(), "show me a plot").unwrap();
    assert_eq!(transcript.len(), 3);

    let last = transcript.last().unwrap();
    assert_eq!(last.sender(), Sender::Server);
    assert_eq!(last.kind(), EntryKind::Plot);

    let points = &last.plot_data().unwrap().points;
    assert_eq!(points.len(), 5);
    assert_eq!(
        points.as_slice(),
        [(1.0, 2.0), (2.0, 1.0), (3.0, 4.0), (4.0, 3.0), (5.0, 5.0)].map(PlotPoint::from)
    );
}

#[test]
fn test_submit_never_mutates_input() {
    let first = transcript_from(&["one"]);
    let second = submit(&first, "two").unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 4);
    assert_eq!(&second.entries()[..2], first.entries());
}

#[test]
fn test_history_accumulates_in_order() {
    let transcript = transcript_from(&["a", "plot b", "c"]);
    let summary: Vec<(Sender, EntryKind)> =
        transcript.iter().map(|e| (e.sender(), e.kind())).collect();
    assert_eq!(
        summary,
        [
            (Sender::User, EntryKind::Text),
            (Sender::Server, EntryKind::Text),
            (Sender::User, EntryKind::Text),
            (Sender::Server, EntryKind::Text),
            (Sender::Server, EntryKind::Plot),
            (Sender::User, EntryKind::Text),
            (Sender::Server, EntryKind::Text),
        ]
    );
}

#[test]
fn test_responder_is_replaceable() {
    let controller =
        TranscriptController::new().with_responder(|m: &str| -> String { format!("ack: {m}") });
    let transcript = controller.submit(&Transcript::new(), "ping").unwrap();
    assert_eq!(transcript.entries()[1].message(), Some("ack: ping"));
}

#[test]
fn test_transcript_json_roundtrip() {
    let transcript = transcript_from(&["plot <ABC>x</ABC>"]);
    let json = serde_json::to_string(&transcript).unwrap();
    let restored: Transcript = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, transcript);
}
