//! Projection of a transcript into framework-neutral render nodes.

use serde::{Deserialize, Serialize};

use crate::{
    plot::PlotData,
    segment::{Segment, segment},
    transcript::{ChatEntry, Payload, Transcript},
};

/// What goes under an entry's sender label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RenderBody {
    Segments(Vec<Segment>),
    Plot(PlotData),
}

/// Display description of one transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub sender_label: String,
    pub sender_color: String,
    pub body: RenderBody,
}

impl From<&ChatEntry> for RenderNode {
    fn from(entry: &ChatEntry) -> Self {
        let sender = entry.sender();
        let body = match entry.payload() {
            Payload::Text(message) => RenderBody::Segments(segment(message)),
            Payload::Plot(data) => RenderBody::Plot(data.clone()),
        };
        Self {
            sender_label: sender.label().to_string(),
            sender_color: sender.color().to_string(),
            body,
        }
    }
}

/// Render every entry of `transcript`, in order.
pub fn render(transcript: &Transcript) -> Vec<RenderNode> {
    transcript.iter().map(RenderNode::from).collect()
}
