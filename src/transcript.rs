use crate::Segment;

/// Maximum number of characters fed into article generation
pub const MAX_TRANSCRIPT_CHARS: usize = 12_000;

/// Appended when the transcript had to be cut at the limit
pub const TRUNCATION_MARKER: char = '…';

#[derive(Debug, Clone)]
pub struct NormalizedTranscript {
    pub text: String,
    pub truncated: bool,
}

/// Collapse runs of whitespace to single spaces and trim the ends
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join ordered segments into one cleaned text blob, capped at
/// MAX_TRANSCRIPT_CHARS with a trailing ellipsis when cut.
pub fn normalize(segments: &[Segment]) -> NormalizedTranscript {
    let joined = segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let collapsed = collapse_whitespace(&joined);

    if collapsed.chars().count() > MAX_TRANSCRIPT_CHARS {
        let mut text: String = collapsed.chars().take(MAX_TRANSCRIPT_CHARS).collect();
        text.push(TRUNCATION_MARKER);
        NormalizedTranscript { text, truncated: true }
    } else {
        NormalizedTranscript {
            text: collapsed,
            truncated: false,
        }
    }
}
