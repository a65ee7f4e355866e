//! Session-scoped chat state.
//!
//! A [`ChatSession`] owns one transcript, the idle/awaiting-response flag
//! that gates submission, and the status line shown next to the submit
//! control.
//!
//! Requests run in two phases so the transcript work can happen outside any
//! lock the caller holds around the session. The session stays busy only
//! while the [`PendingRequest`] ticket is alive; dropping an unfinished
//! ticket re-enables submission.
//!
//! ```
//! use chatbox::ChatSession;
//!
//! let mut session = ChatSession::new();
//! let request = session.begin_request().unwrap();
//! assert!(session.is_pending());
//!
//! let outcome = session.controller().submit(request.snapshot(), "hello");
//! session.complete_request(request, outcome).unwrap();
//! assert_eq!(session.transcript().len(), 2);
//! assert!(!session.is_pending());
//! ```

mod errors;

use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    clock::{Clock, SystemClock},
    constants::{STATUS_DONE, STATUS_NO_MESSAGE, STATUS_WORKING},
    render::{RenderNode, render},
    transcript::{SubmitError, Transcript, TranscriptController},
};

pub use errors::SessionError;

/// Whether the session is waiting on a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    AwaitingResponse,
}

/// Ticket for an outstanding request.
///
/// Carries the transcript as it was when the request began. Hand it back to
/// [`ChatSession::complete_request`] to finish the request. A ticket that is
/// dropped instead (a cancelled handler, a panicking responder) abandons the
/// request and leaves the transcript as it was.
#[derive(Debug)]
pub struct PendingRequest {
    snapshot: Transcript,
    started_at: String,
    ticket: Arc<()>,
}

impl PendingRequest {
    pub fn snapshot(&self) -> &Transcript {
        &self.snapshot
    }

    /// Formatted time at which the request began.
    pub fn started_at(&self) -> &str {
        &self.started_at
    }
}

/// One user's chat state.
#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Transcript,
    in_flight: Weak<()>,
    status: Option<String>,
    controller: TranscriptController,
    clock: Arc<dyn Clock>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            in_flight: Weak::new(),
            status: None,
            controller: TranscriptController::new(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_controller(mut self, controller: TranscriptController) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn controller(&self) -> &TranscriptController {
        &self.controller
    }

    pub fn state(&self) -> RequestState {
        if self.in_flight.strong_count() > 0 {
            RequestState::AwaitingResponse
        } else {
            RequestState::Idle
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state() == RequestState::AwaitingResponse
    }

    /// Status line for the UI, if any request has been made.
    ///
    /// While a request is outstanding this is `Sending request`. Otherwise it
    /// describes the last request that was completed.
    pub fn status(&self) -> Option<&str> {
        if self.is_pending() {
            Some(STATUS_WORKING)
        } else {
            self.status.as_deref()
        }
    }

    /// Render the current transcript.
    pub fn render(&self) -> Vec<RenderNode> {
        render(&self.transcript)
    }

    /// Mark a request as outstanding and snapshot the transcript.
    ///
    /// Fails while another request is pending.
    pub fn begin_request(&mut self) -> std::result::Result<PendingRequest, SessionError> {
        if self.is_pending() {
            tracing::warn!("Rejected submission while a request is pending");
            return Err(SessionError::RequestPending);
        }

        let ticket = Arc::new(());
        self.in_flight = Arc::downgrade(&ticket);
        Ok(PendingRequest {
            snapshot: self.transcript.clone(),
            started_at: self.clock.timestamp(),
            ticket,
        })
    }

    /// Finish `request` with the controller's `outcome`.
    ///
    /// Submission is re-enabled either way. On success the new transcript
    /// replaces the current one. On failure the transcript is kept and the
    /// error is returned after the status line is updated.
    pub fn complete_request(
        &mut self,
        request: PendingRequest,
        outcome: std::result::Result<Transcript, SubmitError>,
    ) -> std::result::Result<&Transcript, SubmitError> {
        if Weak::ptr_eq(&self.in_flight, &Arc::downgrade(&request.ticket)) {
            self.in_flight = Weak::new();
        }
        match outcome {
            Ok(transcript) => {
                let finished_at = self.clock.timestamp();
                self.status = Some(format!(
                    "{STATUS_WORKING} at {}   &   {STATUS_DONE} at {finished_at}",
                    request.started_at
                ));
                tracing::info!(
                    entries = transcript.len(),
                    added = transcript.len().saturating_sub(request.snapshot.len()),
                    "Request completed"
                );
                self.transcript = transcript;
                Ok(&self.transcript)
            }
            Err(e) => {
                self.status = Some(STATUS_NO_MESSAGE.to_string());
                tracing::info!("Request failed: {e}");
                Err(e)
            }
        }
    }

    /// Run a whole request for `message` with this session's controller.
    pub fn submit(&mut self, message: &str) -> Result<&Transcript> {
        let request = self.begin_request()?;
        let outcome = self.controller.submit(request.snapshot(), message);
        Ok(self.complete_request(request, outcome)?)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
