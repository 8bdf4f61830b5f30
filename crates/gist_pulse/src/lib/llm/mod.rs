pub mod groq;
pub mod summarizer;
pub mod transcriber;

use std::sync::LazyLock;

use regex::Regex;

static API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{10,}$").unwrap());

/// Shallow shape check for a Groq API key. Not an authorization check;
/// only catches obviously malformed input before it hits the wire.
pub fn is_plausible_api_key(key: &str) -> bool {
    API_KEY_RE.is_match(key)
}
