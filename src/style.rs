use crate::transcript::collapse_whitespace;

pub const MAX_PRESET_CHARS: usize = 240;
pub const MAX_DETAIL_CHARS: usize = 500;
pub const MAX_LANGUAGE_CHARS: usize = 40;

/// Language sentinel meaning "follow the video's language"
pub const AUTO_LANGUAGE: &str = "auto";

const DELIMITER: &str = " | ";

/// Whitespace-normalize, then cut to at most max_chars
fn clamp(input: &str, max_chars: usize) -> String {
    let normalized = collapse_whitespace(input);
    if normalized.chars().count() > max_chars {
        normalized.chars().take(max_chars).collect()
    } else {
        normalized
    }
}

/// Build a bounded descriptor string from user style preferences.
///
/// Non-empty parts are joined with a fixed delimiter; the language clause is
/// omitted when language is empty or "auto".
pub fn build_style_descriptor(preset: &str, detail: &str, language: &str) -> String {
    let preset = clamp(preset, MAX_PRESET_CHARS);
    let detail = clamp(detail, MAX_DETAIL_CHARS);
    let language = clamp(language, MAX_LANGUAGE_CHARS);

    let mut parts = Vec::new();
    if !preset.is_empty() {
        parts.push(format!("Style: {preset}"));
    }
    if !detail.is_empty() {
        parts.push(format!("Details: {detail}"));
    }
    if !language.is_empty() && !language.eq_ignore_ascii_case(AUTO_LANGUAGE) {
        parts.push(format!("Language: {language}"));
    }
    parts.join(DELIMITER)
}
