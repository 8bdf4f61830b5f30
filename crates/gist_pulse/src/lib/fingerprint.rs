//! Cache key derivation.
//!
//! The cache itself treats keys as opaque strings; this module is where the
//! service layer computes them, as a SHA-256 digest over every request
//! parameter that affects the produced summary.

use sha2::{Digest, Sha256};

use crate::SummaryStyle;

/// Fingerprint for a summarize request: same URL, style, length and
/// language always map to the same cache slot.
pub fn fingerprint(url: &str, style: SummaryStyle, length_words: u32, language: &str) -> String {
    digest(&format!(
        "{url}|{}|{length_words}|{language}",
        style.as_str()
    ))
}

/// Hex-encoded SHA-256 of an arbitrary string.
pub fn digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable() {
        let a = fingerprint("https://example.com", SummaryStyle::Balanced, 300, "english");
        let b = fingerprint("https://example.com", SummaryStyle::Balanced, 300, "english");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn any_parameter_changes_the_key() {
        let base = fingerprint("https://example.com", SummaryStyle::Balanced, 300, "english");
        assert_ne!(
            base,
            fingerprint("https://example.org", SummaryStyle::Balanced, 300, "english")
        );
        assert_ne!(
            base,
            fingerprint("https://example.com", SummaryStyle::Executive, 300, "english")
        );
        assert_ne!(
            base,
            fingerprint("https://example.com", SummaryStyle::Balanced, 500, "english")
        );
        assert_ne!(
            base,
            fingerprint("https://example.com", SummaryStyle::Balanced, 300, "french")
        );
    }
}
