use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use chatbox::{ChatSession, Clock, Segment, SegmentKind, Transcript, submit};

/// Clock that starts at 2024-01-01 00:00:00 UTC and moves one second per read.
#[derive(Debug)]
pub struct SteppingClock {
    millis: AtomicU64,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            millis: AtomicU64::new(1_704_067_200_000),
        }
    }
}

impl Clock for SteppingClock {
    fn now_millis(&self) -> u64 {
        self.millis.fetch_add(1_000, Ordering::SeqCst)
    }
}

/// Creates a session whose status timestamps are predictable.
pub fn test_session() -> ChatSession {
    ChatSession::new().with_clock(Arc::new(SteppingClock::new()))
}

/// Submits each message in turn, starting from an empty transcript.
pub fn transcript_from(messages: &[&str]) -> Transcript {
    messages.iter().fold(Transcript::new(), |t, m| {
        submit(&t, m).expect("Failed to submit message")
    })
}

/// Short-hand for comparing segment lists in assertions.
pub fn kinds(segments: &[Segment]) -> Vec<SegmentKind> {
    segments.iter().map(|s| s.kind).collect()
}
