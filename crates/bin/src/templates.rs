//! HTML templates for web interface
//!
//! Simple inline HTML templates without a template engine.

use chatbox::{PlotData, RenderBody, RenderNode, Segment, SegmentKind};

/// Common CSS styles for all pages
const COMMON_STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        margin: 0;
        background: #f5f5f5;
    }
    .container {
        max-width: 1000px;
        margin: 0 auto;
        padding: 10px 20px;
    }
    #chat-box {
        overflow: auto;
        max-height: 70vh;
        padding: 10px;
        background: white;
        border-radius: 8px;
        box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    .message {
        margin-bottom: 15px;
    }
    .sender {
        font-size: 20px;
        font-weight: bold;
    }
    pre.plain {
        white-space: pre-wrap;
        margin: 0;
        padding: 0;
    }
    .tagged {
        background-color: rgba(211, 211, 211, 0.2);
        padding: 2px;
        margin: 0;
        border-radius: 2px;
    }
    .tagged pre {
        white-space: pre-wrap;
        margin: 0;
        padding: 10px;
    }
    .empty {
        color: #666;
        font-style: italic;
    }
    #input-area {
        position: fixed;
        bottom: 0;
        left: 0;
        right: 0;
        padding: 10px;
        background: white;
        border-top: 1px solid #ddd;
    }
    textarea {
        width: 100%;
        height: 150px;
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 4px;
        font-size: 14px;
        box-sizing: border-box;
        resize: vertical;
    }
    button {
        background: #0066cc;
        color: white;
        padding: 10px 20px;
        margin-top: 8px;
        border: none;
        border-radius: 4px;
        cursor: pointer;
        font-size: 14px;
        font-weight: bold;
    }
    button:hover {
        background: #0052a3;
    }
    button:disabled {
        background: #999;
        cursor: default;
    }
    .reset-btn {
        background: #999;
        float: right;
    }
    #send-info {
        margin-top: 8px;
        color: #555;
        font-size: 13px;
    }
"#;

const PLOT_WIDTH: f64 = 480.0;
const PLOT_HEIGHT: f64 = 320.0;
const PLOT_MARGIN: f64 = 40.0;

/// Render the chat page
pub fn chat_page(nodes: &[RenderNode], status: Option<&str>, pending: bool) -> String {
    let transcript_html = if nodes.is_empty() {
        r#"<p class="empty">No messages yet.</p>"#.to_string()
    } else {
        nodes.iter().map(render_node).collect()
    };

    let status_html = status.map(html_escape).unwrap_or_default();
    let disabled = if pending { " disabled" } else { "" };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Chatbox</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <div class="container">
        <div id="chat-box">
            {transcript_html}
        </div>
    </div>
    <div id="input-area">
        <form method="POST" action="/reset">
            <button type="submit" class="reset-btn">New Chat</button>
        </form>
        <form method="POST" action="/send"
              onsubmit="this.querySelector('button').disabled = true; document.getElementById('send-info').textContent = 'Sending request';">
            <textarea id="user-input" name="message" placeholder="Please Enter Message..." autofocus></textarea>
            <button type="submit" id="send-button"{disabled}>Submit</button>
        </form>
        <div id="send-info">{status_html}</div>
    </div>
    <script>
        var box = document.getElementById('chat-box');
        box.scrollTop = box.scrollHeight;
    </script>
</body>
</html>"#
    )
}

/// Render the statistics page
pub fn stats_page(session_count: usize) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Chatbox Server Statistics</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <div class="container">
        <h1>Chatbox Server Statistics</h1>
        <div class="stat"><strong>Active Sessions:</strong> {session_count}</div>
        <p class="empty">Transcripts are private to each session.</p>
    </div>
</body>
</html>"#
    )
}

/// Render one transcript entry with its sender label
fn render_node(node: &RenderNode) -> String {
    let body = match &node.body {
        RenderBody::Segments(segments) => segments.iter().map(render_segment).collect(),
        RenderBody::Plot(data) => render_plot(data),
    };
    format!(
        r#"<div class="message"><span class="sender" style="color: {};">{}:</span>{}</div>"#,
        html_escape(&node.sender_color),
        html_escape(&node.sender_label),
        body
    )
}

fn render_segment(segment: &Segment) -> String {
    let content = html_escape(&segment.content);
    match segment.kind {
        SegmentKind::PlainText => format!(r#"<pre class="plain">{content}</pre>"#),
        SegmentKind::TaggedBlock => format!(r#"<div class="tagged"><pre>{content}</pre></div>"#),
    }
}

/// Render scatter data as an inline SVG chart
fn render_plot(data: &PlotData) -> String {
    let Some(((min_x, min_y), (max_x, max_y))) = data.bounds() else {
        return r#"<p class="empty">Empty plot.</p>"#.to_string();
    };
    let (min_x, max_x) = padded_range(min_x, max_x);
    let (min_y, max_y) = padded_range(min_y, max_y);

    let inner_w = PLOT_WIDTH - 2.0 * PLOT_MARGIN;
    let inner_h = PLOT_HEIGHT - 2.0 * PLOT_MARGIN;
    let sx = |x: f64| PLOT_MARGIN + (x - min_x) / (max_x - min_x) * inner_w;
    let sy = |y: f64| PLOT_HEIGHT - PLOT_MARGIN - (y - min_y) / (max_y - min_y) * inner_h;

    let points: String = data
        .points
        .iter()
        .map(|p| {
            format!(
                r##"<circle cx="{:.1}" cy="{:.1}" r="5" fill="#636EFA"><title>({}, {})</title></circle>"##,
                sx(p.x),
                sy(p.y),
                p.x,
                p.y
            )
        })
        .collect();

    let bottom = PLOT_HEIGHT - PLOT_MARGIN;
    let right = PLOT_WIDTH - PLOT_MARGIN;
    format!(
        r##"<svg class="plot" width="{PLOT_WIDTH}" height="{PLOT_HEIGHT}" viewBox="0 0 {PLOT_WIDTH} {PLOT_HEIGHT}" xmlns="http://www.w3.org/2000/svg">
    <rect x="{PLOT_MARGIN}" y="{PLOT_MARGIN}" width="{inner_w}" height="{inner_h}" fill="#E5ECF6"/>
    <line x1="{PLOT_MARGIN}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="#444"/>
    <line x1="{PLOT_MARGIN}" y1="{PLOT_MARGIN}" x2="{PLOT_MARGIN}" y2="{bottom}" stroke="#444"/>
    <text x="{mid_x}" y="{label_y}" text-anchor="middle">{x_label}</text>
    <text x="12" y="{mid_y}" text-anchor="middle" transform="rotate(-90 12 {mid_y})">{y_label}</text>
    <text x="{PLOT_MARGIN}" y="{tick_y}" text-anchor="middle" font-size="11">{min_x}</text>
    <text x="{right}" y="{tick_y}" text-anchor="middle" font-size="11">{max_x}</text>
    <text x="{tick_x}" y="{bottom}" text-anchor="end" font-size="11">{min_y}</text>
    <text x="{tick_x}" y="{PLOT_MARGIN}" text-anchor="end" font-size="11">{max_y}</text>
    {points}
</svg>"##,
        mid_x = PLOT_WIDTH / 2.0,
        mid_y = PLOT_HEIGHT / 2.0,
        label_y = PLOT_HEIGHT - 8.0,
        tick_y = bottom + 14.0,
        tick_x = PLOT_MARGIN - 4.0,
        x_label = html_escape(&data.x_label),
        y_label = html_escape(&data.y_label),
    )
}

/// Widen a value range by one unit on each side so points never sit on the frame.
fn padded_range(min: f64, max: f64) -> (f64, f64) {
    (min - 1.0, max + 1.0)
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
