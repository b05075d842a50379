//! Text normalization for extracted metadata.
//!
//! LLM output arrives with arbitrary whitespace and length. These helpers make
//! it deterministic before it is shown or validated:
//! - convert CRLF and CR to LF
//! - remove UTF-8 BOM if present
//! - trim surrounding whitespace
//! - cut to a character budget on a char boundary

/// Normalize a single free-text field.
pub fn normalize_text(input: &str) -> String {
    let s = input.trim_start_matches('\u{FEFF}');
    let s = s.replace("\r\n", "\n").replace('\r', "\n");
    s.trim().to_string()
}

/// Keep at most `max_chars` characters. Never splits a code point.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => input[..idx].to_string(),
        None => input.to_string(),
    }
}

/// Normalize tags: trim each, keep order, cap the count.
///
/// Blank tags are kept so that validation can report them; silently dropping
/// them would hide a malformed upstream response.
pub fn normalize_tags<I, S>(tags: I, max: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .take(max)
        .map(|t| normalize_text(t.as_ref()))
        .collect()
}
