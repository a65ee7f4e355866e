//! Submitting user messages to a transcript.

use std::sync::Arc;

use super::{ChatEntry, Sender, SubmitError, Transcript};
use crate::{constants::PLOT_TRIGGER, plot::PlotData};

/// Produces the server's reply to a user message.
///
/// This is the hook for a real response backend. The default
/// [`EchoResponder`] sends the message back unchanged.
pub trait Responder: Send + Sync {
    fn respond(&self, message: &str) -> String;
}

/// Replies with the user's message, verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoResponder;

impl Responder for EchoResponder {
    fn respond(&self, message: &str) -> String {
        message.to_string()
    }
}

impl<F> Responder for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn respond(&self, message: &str) -> String {
        self(message)
    }
}

/// Applies a user message to a transcript.
///
/// Each accepted message appends a user entry and a server reply. It also
/// appends a plot entry when the message contains the plot trigger.
#[derive(Clone)]
pub struct TranscriptController {
    responder: Arc<dyn Responder>,
    plot_trigger: String,
}

impl TranscriptController {
    pub fn new() -> Self {
        Self {
            responder: Arc::new(EchoResponder),
            plot_trigger: PLOT_TRIGGER.to_string(),
        }
    }

    /// Replace the reply generator.
    pub fn with_responder(mut self, responder: impl Responder + 'static) -> Self {
        self.responder = Arc::new(responder);
        self
    }

    /// Replace the substring that requests a plot.
    pub fn with_plot_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.plot_trigger = trigger.into();
        self
    }

    pub fn plot_trigger(&self) -> &str {
        &self.plot_trigger
    }

    /// Whether `message` asks for a plot.
    ///
    /// This is a plain substring test. An empty trigger never fires.
    pub fn wants_plot(&self, message: &str) -> bool {
        !self.plot_trigger.is_empty() && message.contains(self.plot_trigger.as_str())
    }

    /// Return `transcript` extended with the entries produced by `message`.
    pub fn submit(&self, transcript: &Transcript, message: &str) -> Result<Transcript, SubmitError> {
        if message.is_empty() {
            tracing::debug!("Rejected empty submission");
            return Err(SubmitError::EmptyInput);
        }

        let mut entries = vec![
            ChatEntry::text(Sender::User, message),
            ChatEntry::text(Sender::Server, self.responder.respond(message)),
        ];
        if self.wants_plot(message) {
            entries.push(ChatEntry::plot(Sender::Server, PlotData::sample()));
        }

        tracing::debug!(
            appended = entries.len(),
            previous = transcript.len(),
            "Submitted message"
        );
        Ok(transcript.extended(entries))
    }
}

impl Default for TranscriptController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TranscriptController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptController")
            .field("plot_trigger", &self.plot_trigger)
            .finish_non_exhaustive()
    }
}

/// Submit `message` with the default echo controller.
pub fn submit(transcript: &Transcript, message: &str) -> Result<Transcript, SubmitError> {
    TranscriptController::new().submit(transcript, message)
}
