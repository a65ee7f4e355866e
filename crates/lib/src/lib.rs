//!
//! Chatbox: the core of a single-page chat interface.
//!
//! This library holds everything the chat page needs apart from the UI
//! framework. All of it is plain data and pure functions, so any front end
//! can drive it.
//!
//! ## Core Concepts
//!
//! * **Segments (`segment::Segment`)**: A message is split into plain-text runs and verbatim
//!   `<ABC>...</ABC>` tagged blocks (optionally preceded by an XML declaration) by [`segment()`].
//! * **Transcript (`transcript::Transcript`)**: The append-only, ordered log of chat entries for
//!   one session. Each entry is either a text message or a plot payload from the user or the server.
//! * **Controller (`transcript::TranscriptController`)**: [`submit()`] appends the user's message,
//!   the server's reply (an echo by default, see `transcript::Responder`), and a sample plot when
//!   the message mentions `plot`.
//! * **Render nodes (`render::RenderNode`)**: [`render()`] projects a transcript into sender labels,
//!   colours, and segment lists or plot data for display.
//! * **Sessions (`session::ChatSession`)**: Session-scoped state that guards against overlapping
//!   submissions and keeps the request status line.

pub mod clock;
pub mod constants;
pub mod plot;
pub mod render;
pub mod segment;
pub mod session;
pub mod transcript;

pub use clock::{Clock, SystemClock};
pub use plot::{PlotData, PlotPoint};
pub use render::{RenderBody, RenderNode, render};
pub use segment::{Segment, SegmentKind, segment};
pub use session::{ChatSession, PendingRequest, RequestState, SessionError};
pub use transcript::{
    ChatEntry, EchoResponder, EntryKind, Payload, Responder, Sender, SubmitError, Transcript,
    TranscriptController, submit,
};

/// Result type used throughout the chatbox library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the chatbox library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured submission errors from the transcript module
    #[error(transparent)]
    Submit(transcript::SubmitError),

    /// Structured request-guard errors from the session module
    #[error(transparent)]
    Session(session::SessionError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Submit(_) => "transcript",
            Error::Session(_) => "session",
        }
    }

    /// Check if this error is the empty-message rejection.
    pub fn is_empty_input(&self) -> bool {
        match self {
            Error::Submit(submit_err) => submit_err.is_empty_input(),
            Error::Session(_) => false,
        }
    }

    /// Check if this error indicates a request is already in flight.
    pub fn is_request_pending(&self) -> bool {
        match self {
            Error::Session(session_err) => session_err.is_request_pending(),
            Error::Submit(_) => false,
        }
    }

    /// Check if this error was caused by the user's input.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Submit(_))
    }

    /// Check if this error is a conflict with another request.
    pub fn is_conflict(&self) -> bool {
        self.is_request_pending()
    }
}
