use crate::transcript::collapse_whitespace;
use crate::{GenerationRequest, Segment, style};

pub const DEFAULT_TITLE: &str = "Video Summary";
const DEFAULT_CLOSING: &str = "That covers the main points discussed in this video.";

const MAX_TITLE_CHARS: usize = 70;
const MIN_TITLE_SOURCE_CHARS: usize = 5;
const OVERVIEW_SEGMENTS: usize = 6;
const CLOSING_SEGMENTS: usize = 6;
const MAX_KEY_POINTS: usize = 5;
const KEY_POINT_WINDOW: usize = 3;

const SOURCE_NOTE_FULL: &str =
    "This article was generated from the video's full transcript.";
const SOURCE_NOTE_TRUNCATED: &str =
    "This article was generated from the video's transcript, which was truncated to fit processing limits.";

/// Deterministically build a structured article from transcript segments.
///
/// The document always carries the same six parts in the same order: title
/// heading, Overview, target-length statement, Key Points, Closing, Source
/// Notes. No network access.
pub fn synthesize(request: &GenerationRequest) -> String {
    let segments = &request.segments;

    let title = pick_title(segments);
    let overview = overview_section(request);
    let key_points = sample_key_points(segments);
    let closing = closing_section(segments);
    let source_note = if request.truncated {
        SOURCE_NOTE_TRUNCATED
    } else {
        SOURCE_NOTE_FULL
    };

    let mut doc = String::new();
    doc.push_str(&format!("# {title}\n\n"));
    doc.push_str("## Overview\n");
    doc.push_str(&overview);
    doc.push_str("\n\n");
    doc.push_str(&format!("Target length: {}.\n\n", request.length.word_target()));
    doc.push_str("## Key Points\n");
    for point in &key_points {
        doc.push_str(&format!("- {point}\n"));
    }
    doc.push_str("\n## Closing\n");
    doc.push_str(&closing);
    doc.push_str("\n\n## Source Notes\n");
    doc.push_str(source_note);
    doc.push('\n');
    doc
}

/// First segment with more than 5 characters of cleaned text, capped at 70
fn pick_title(segments: &[Segment]) -> String {
    for segment in segments {
        let cleaned = collapse_whitespace(&segment.text);
        if cleaned.chars().count() > MIN_TITLE_SOURCE_CHARS {
            if cleaned.chars().count() > MAX_TITLE_CHARS {
                let mut capped: String = cleaned.chars().take(MAX_TITLE_CHARS).collect();
                capped.push('…');
                return capped;
            }
            return cleaned;
        }
    }
    DEFAULT_TITLE.to_string()
}

fn join_cleaned(segments: &[Segment]) -> String {
    collapse_whitespace(
        &segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn overview_section(request: &GenerationRequest) -> String {
    let descriptor = style::build_style_descriptor(
        &request.style_preset,
        &request.style_detail,
        &request.language,
    );
    let lead = join_cleaned(&request.segments[..request.segments.len().min(OVERVIEW_SEGMENTS)]);

    match (descriptor.is_empty(), lead.is_empty()) {
        (true, _) => lead,
        (false, true) => descriptor,
        (false, false) => format!("{descriptor}\n{lead}"),
    }
}

/// Sample up to 5 key points by stepping through the segments in strides of
/// floor(n / 5), each point a cleaned 3-segment window.
fn sample_key_points(segments: &[Segment]) -> Vec<String> {
    let mut points = Vec::new();
    if segments.is_empty() {
        return points;
    }

    let stride = (segments.len() / MAX_KEY_POINTS).max(1);
    let mut index = 0;
    while index < segments.len() && points.len() < MAX_KEY_POINTS {
        let end = (index + KEY_POINT_WINDOW).min(segments.len());
        let point = join_cleaned(&segments[index..end]);
        if !point.is_empty() {
            points.push(point);
        }
        index += stride;
    }
    points
}

fn closing_section(segments: &[Segment]) -> String {
    let tail_start = segments.len().saturating_sub(CLOSING_SEGMENTS);
    let closing = join_cleaned(&segments[tail_start..]);
    if closing.is_empty() {
        DEFAULT_CLOSING.to_string()
    } else {
        closing
    }
}
