//! Message segmentation.
//!
//! A chat message is split into a flat, ordered list of [`Segment`]s so the
//! UI can render tagged XML payloads apart from the surrounding prose.
//!
//! A tagged run is an optional XML declaration (`<?xml ... ?>`), optional
//! whitespace, and then a `<ABC>...</ABC>` block. Both the declaration and
//! the block body are matched lazily and may span lines. The run is kept
//! verbatim. The plain text between runs is trimmed, and dropped when
//! nothing is left.
//!
//! ```
//! use chatbox::segment::{Segment, segment};
//!
//! let segments = segment("pre <ABC>x</ABC> post");
//! assert_eq!(
//!     segments,
//!     vec![
//!         Segment::plain("pre"),
//!         Segment::tagged("<ABC>x</ABC>"),
//!         Segment::plain("post"),
//!     ]
//! );
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static TAGGED_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();

fn tagged_block_regex() -> &'static Regex {
    TAGGED_BLOCK_REGEX.get_or_init(|| {
        Regex::new(
            r"(?xs)
            (?: <\?xml .*? \?> \s* )?   # optional XML declaration
            <ABC> .*? </ABC>            # first closing tag ends the block
            ",
        )
        .expect("Failed to compile tagged block regex")
    })
}

/// How a segment should be laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Ordinary prose, trimmed of surrounding whitespace.
    PlainText,
    /// A verbatim `<ABC>` block, with its XML declaration if one preceded it.
    TaggedBlock,
}

/// A contiguous span of a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub content: String,
}

impl Segment {
    /// Create a plain-text segment.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::PlainText,
            content: content.into(),
        }
    }

    /// Create a tagged-block segment.
    pub fn tagged(content: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::TaggedBlock,
            content: content.into(),
        }
    }

    pub fn is_tagged(&self) -> bool {
        self.kind == SegmentKind::TaggedBlock
    }
}

/// Split `message` into plain-text and tagged-block segments in source order.
pub fn segment(message: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for found in tagged_block_regex().find_iter(message) {
        push_plain(&mut segments, &message[last_end..found.start()]);
        segments.push(Segment::tagged(found.as_str()));
        last_end = found.end();
    }
    push_plain(&mut segments, &message[last_end..]);

    tracing::debug!(
        len = message.len(),
        segments = segments.len(),
        "Segmented message"
    );
    segments
}

fn push_plain(segments: &mut Vec<Segment>, gap: &str) {
    let trimmed = gap.trim();
    if !trimmed.is_empty() {
        segments.push(Segment::plain(trimmed));
    }
}
