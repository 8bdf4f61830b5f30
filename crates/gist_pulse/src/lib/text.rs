//! Text helpers shared by the pipeline and the API layer.

/// Reading speed assumed by [`reading_time_minutes`].
pub const WORDS_PER_MINUTE: usize = 200;

/// Collapses all whitespace runs (including newlines) to single spaces and
/// trims the ends.
pub fn sanitize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Hard-caps `text` at `max_chars` characters, replacing the tail with
/// `...`. Operates on chars, never splitting a multi-byte character.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated minutes to read `text`, never less than one.
pub fn reading_time_minutes(text: &str) -> usize {
    (word_count(text) / WORDS_PER_MINUTE).max(1)
}
