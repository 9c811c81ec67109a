pub mod article;
pub mod config;
pub mod fallback;
pub mod llm;
pub mod server;
pub mod style;
pub mod transcript;
pub mod youtube;

use serde::Serialize;
use url::Url;

/// A single captioned segment
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Target article length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl ArticleLength {
    /// Parse a user-supplied length choice; anything unrecognized means medium
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim().to_ascii_lowercase().as_str() {
            "short" => ArticleLength::Short,
            "long" => ArticleLength::Long,
            _ => ArticleLength::Medium,
        }
    }

    pub fn word_target(&self) -> &'static str {
        match self {
            ArticleLength::Short => "300-450 words",
            ArticleLength::Medium => "600-900 words",
            ArticleLength::Long => "1000-1400 words",
        }
    }
}

/// Everything the article generator needs for one request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub transcript: String,
    pub segments: Vec<Segment>,
    pub style_preset: String,
    pub style_detail: String,
    pub length: ArticleLength,
    pub language: String,
    pub truncated: bool,
}

/// Extract video ID from various YouTube URL formats.
///
/// Tries a structured URL parse first, then falls back to pattern matching.
/// Returns None when no id-like token of at least 6 characters is found.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // Bare 11-character video ID
    if regex::Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap().is_match(input) {
        return Some(input.to_string());
    }

    if let Some(id) = extract_from_parsed_url(input) {
        return Some(id);
    }

    extract_by_pattern(input)
}

fn is_id_like(token: &str) -> bool {
    token.len() >= 6 && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn extract_from_parsed_url(input: &str) -> Option<String> {
    let parsed = Url::parse(input).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").or_else(|| host.strip_prefix("m.")).unwrap_or(host);

    if host == "youtu.be" {
        let first = parsed.path_segments()?.next()?;
        return is_id_like(first).then(|| first.to_string());
    }

    if host == "youtube.com" {
        if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "v") {
            if is_id_like(&v) {
                return Some(v.into_owned());
            }
        }
        let segments: Vec<&str> = parsed.path_segments()?.collect();
        if segments.len() >= 2
            && matches!(segments[0], "shorts" | "live" | "embed")
            && is_id_like(segments[1])
        {
            return Some(segments[1].to_string());
        }
    }

    None
}

fn extract_by_pattern(input: &str) -> Option<String> {
    // youtube.com/watch?v=ID
    if let Some(caps) = regex::Regex::new(r"(?:youtube\.com/watch\?.*v=)([a-zA-Z0-9_-]{6,})")
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtu.be/ID
    if let Some(caps) = regex::Regex::new(r"youtu\.be/([a-zA-Z0-9_-]{6,})")
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtube.com/shorts/ID, /live/ID, /embed/ID
    if let Some(caps) = regex::Regex::new(r"youtube\.com/(?:shorts|live|embed)/([a-zA-Z0-9_-]{6,})")
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_video_id() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123xy&t=5"),
            Some("abc123xy".to_string())
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(extract_video_id("https://youtu.be/abc123xy"), Some("abc123xy".to_string()));
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_shorts_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_live_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/live/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_mobile_host() {
        assert_eq!(
            extract_video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_not_a_url() {
        assert_eq!(extract_video_id("not a url"), None);
    }

    #[test]
    fn test_invalid_token() {
        assert_eq!(extract_video_id("not-a-valid-id"), None);
    }

    #[test]
    fn test_short_token_rejected() {
        assert_eq!(extract_video_id("https://youtu.be/abc"), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(extract_video_id("  dQw4w9WgXcQ  "), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_length_from_choice() {
        assert_eq!(ArticleLength::from_choice("short"), ArticleLength::Short);
        assert_eq!(ArticleLength::from_choice("LONG"), ArticleLength::Long);
        assert_eq!(ArticleLength::from_choice("medium"), ArticleLength::Medium);
        assert_eq!(ArticleLength::from_choice("gibberish"), ArticleLength::Medium);
        assert_eq!(ArticleLength::from_choice(""), ArticleLength::Medium);
    }

    #[test]
    fn test_length_word_targets() {
        assert_eq!(ArticleLength::Short.word_target(), "300-450 words");
        assert_eq!(ArticleLength::Medium.word_target(), "600-900 words");
        assert_eq!(ArticleLength::Long.word_target(), "1000-1400 words");
    }
}
