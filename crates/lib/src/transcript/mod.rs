//! Chat transcript model.
//!
//! A [`Transcript`] is the ordered, append-only log of [`ChatEntry`] values
//! for one session. Appending produces a new transcript. The entries sit
//! behind a shared pointer, so snapshots handed to an in-flight request stay
//! valid and cheap to clone.

mod controller;
mod errors;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{SERVER_COLOR, USER_COLOR},
    plot::PlotData,
};

pub use controller::{EchoResponder, Responder, TranscriptController, submit};
pub use errors::SubmitError;

/// Who produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    User,
    Server,
}

impl Sender {
    /// Label shown in front of the entry.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "User",
            Sender::Server => "Server",
        }
    }

    /// Colour the label is drawn in.
    pub fn color(&self) -> &'static str {
        match self {
            Sender::User => USER_COLOR,
            Sender::Server => SERVER_COLOR,
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Payload discriminant of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Text,
    Plot,
}

/// Entry content. Text entries carry a message, plot entries carry data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Payload {
    Text(String),
    Plot(PlotData),
}

/// One immutable line of the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    sender: Sender,
    payload: Payload,
}

impl ChatEntry {
    pub fn text(sender: Sender, message: impl Into<String>) -> Self {
        Self {
            sender,
            payload: Payload::Text(message.into()),
        }
    }

    pub fn plot(sender: Sender, data: PlotData) -> Self {
        Self {
            sender,
            payload: Payload::Plot(data),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn kind(&self) -> EntryKind {
        match self.payload {
            Payload::Text(_) => EntryKind::Text,
            Payload::Plot(_) => EntryKind::Plot,
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The message text, present only for text entries.
    pub fn message(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(message) => Some(message),
            Payload::Plot(_) => None,
        }
    }

    /// The plot data, present only for plot entries.
    pub fn plot_data(&self) -> Option<&PlotData> {
        match &self.payload {
            Payload::Plot(data) => Some(data),
            Payload::Text(_) => None,
        }
    }
}

/// Ordered, append-only sequence of chat entries.
///
/// Insertion order is display order. Cloning shares the underlying entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Arc<Vec<ChatEntry>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    /// Return a new transcript with `entries` appended after the existing ones.
    ///
    /// `self` is left untouched.
    pub fn extended(&self, entries: impl IntoIterator<Item = ChatEntry>) -> Self {
        let mut next: Vec<ChatEntry> = self.entries.as_ref().clone();
        next.extend(entries);
        Self {
            entries: Arc::new(next),
        }
    }

    /// Whether `self` and `other` share the same entry storage.
    pub fn shares_storage_with(&self, other: &Transcript) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl FromIterator<ChatEntry> for Transcript {
    fn from_iter<I: IntoIterator<Item = ChatEntry>>(iter: I) -> Self {
        Self {
            entries: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a ChatEntry;
    type IntoIter = std::slice::Iter<'a, ChatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
