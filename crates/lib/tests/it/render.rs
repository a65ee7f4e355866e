use chatbox::{PlotData, RenderBody, Segment, Transcript, render};

use crate::helpers::transcript_from;

#[test]
fn test_render_matches_entries() {
    let transcript = transcript_from(&["plot this: <ABC>data</ABC>"]);
    let nodes = render(&transcript);

    assert_eq!(nodes.len(), transcript.len());
    let labels: Vec<_> = nodes.iter().map(|n| n.sender_label.as_str()).collect();
    assert_eq!(labels, ["User", "Server", "Server"]);

    let expected = RenderBody::Segments(vec![
        Segment::plain("plot this:"),
        Segment::tagged("<ABC>data</ABC>"),
    ]);
    assert_eq!(nodes[0].body, expected);
    assert_eq!(nodes[1].body, expected);
    assert_eq!(nodes[2].body, RenderBody::Plot(PlotData::sample()));
}

#[test]
fn test_render_twice_is_identical() {
    let transcript = transcript_from(&["one", "two plot", "<ABC>3</ABC>"]);
    assert_eq!(render(&transcript), render(&transcript));
}

#[test]
fn test_render_empty_transcript() {
    assert!(render(&Transcript::new()).is_empty());
}

#[test]
fn test_render_node_json_shape() {
    let nodes = render(&transcript_from(&["hi"]));
    let json = serde_json::to_value(&nodes[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "sender_label": "User",
            "sender_color": "#007BFF",
            "body": {
                "type": "segments",
                "data": [{"kind": "plain_text", "content": "hi"}]
            }
        })
    );
}
