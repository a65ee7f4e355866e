use chatbox::{Segment, SegmentKind, segment};

use crate::helpers::kinds;

#[test]
fn test_plain_text_without_blocks_is_single_trimmed_segment() {
    for s in ["hello", "  padded  ", "multi\nline\n", "<AB>not a tag</AB>", "</ABC> reversed <ABC>"] {
        assert_eq!(segment(s), vec![Segment::plain(s.trim())], "input: {s:?}");
    }
}

#[test]
fn test_blank_inputs_yield_nothing() {
    for s in ["", " ", "\n\n", "\t \r\n"] {
        assert!(segment(s).is_empty(), "input: {s:?}");
    }
}

#[test]
fn test_exact_block() {
    assert_eq!(
        segment("<ABC>hello</ABC>"),
        vec![Segment::tagged("<ABC>hello</ABC>")]
    );
}

#[test]
fn test_block_between_prose() {
    assert_eq!(
        segment("pre <ABC>x</ABC> post"),
        vec![
            Segment::plain("pre"),
            Segment::tagged("<ABC>x</ABC>"),
            Segment::plain("post"),
        ]
    );
}

#[test]
fn test_multiline_report() {
    let message = "\
Here is the result:

<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<ABC>
  <row id=\"1\"/>
  <row id=\"2\"/>
</ABC>

And a second one: <ABC>tail</ABC>
Thanks!";

    let segments = segment(message);
    assert_eq!(
        kinds(&segments),
        [
            SegmentKind::PlainText,
            SegmentKind::TaggedBlock,
            SegmentKind::PlainText,
            SegmentKind::TaggedBlock,
            SegmentKind::PlainText,
        ]
    );
    assert_eq!(segments[0].content, "Here is the result:");
    assert!(segments[1].content.starts_with("<?xml version"));
    assert!(segments[1].content.ends_with("</ABC>"));
    assert_eq!(segments[2].content, "And a second one:");
    assert_eq!(segments[3].content, "<ABC>tail</ABC>");
    assert_eq!(segments[4].content, "Thanks!");
}

#[test]
fn test_segments_cover_message_without_overlap() {
    let message = "a <ABC>1</ABC> b\n<?xml v?><ABC>2</ABC>c";
    let segments = segment(message);

    // Every segment appears in the message, in order, without overlapping.
    let mut cursor = 0;
    for s in &segments {
        let found = message[cursor..]
            .find(&s.content)
            .expect("segment must appear after the previous one");
        assert!(message[cursor..cursor + found].trim().is_empty());
        cursor += found + s.content.len();
    }
    assert!(message[cursor..].trim().is_empty());
}

#[test]
fn test_segmentation_is_deterministic() {
    let message = "x <ABC>y</ABC> z";
    assert_eq!(segment(message), segment(message));
}
