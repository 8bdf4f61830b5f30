//! URL validation and classification.
//!
//! A request URL is either a YouTube video (transcription path) or any
//! other http(s) website (scraping path). Anything unparseable, without a
//! host, or on a non-http scheme is rejected up front.

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlKind {
    Youtube,
    Website,
}

impl UrlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlKind::Youtube => "youtube",
            UrlKind::Website => "website",
        }
    }
}

impl std::fmt::Display for UrlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses and classifies a raw URL string.
pub fn classify(raw: &str) -> Result<(url::Url, UrlKind), Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("URL is required".into()));
    }
    let parsed =
        url::Url::parse(trimmed).map_err(|_| Error::Validation("Invalid URL format".into()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Validation(format!(
            "Unsupported URL scheme '{}', expected http or https",
            parsed.scheme()
        )));
    }
    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| Error::Validation("URL must have a host".into()))?;

    let kind = if is_youtube_host(host) {
        UrlKind::Youtube
    } else {
        UrlKind::Website
    };
    Ok((parsed, kind))
}

fn is_youtube_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == "youtu.be" || host == "youtube.com" || host.ends_with(".youtube.com")
}

/// Extracts the YouTube video id from the common URL shapes: `watch?v=`,
/// `youtu.be/<id>`, `/shorts/<id>`, `/live/<id>` and `/embed/<id>`.
/// Used to give downloaded audio a stable on-disk name.
pub fn video_id(url: &url::Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let mut segments = url.path_segments()?;

    if host == "youtu.be" {
        return segments
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }
    if host != "youtube.com" && !host.ends_with(".youtube.com") {
        return None;
    }
    match segments.next()? {
        "watch" => url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned()),
        "shorts" | "live" | "embed" => segments
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> url::Url {
        url::Url::parse(raw).unwrap()
    }

    #[test]
    fn classifies_youtube_hosts() {
        for raw in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
        ] {
            let (_, kind) = classify(raw).unwrap();
            assert_eq!(kind, UrlKind::Youtube, "{raw}");
        }
    }

    #[test]
    fn classifies_everything_else_as_website() {
        let (_, kind) = classify("https://en.wikipedia.org/wiki/Rust").unwrap();
        assert_eq!(kind, UrlKind::Website);
    }

    #[test]
    fn rejects_invalid_input() {
        for raw in ["", "   ", "not a url", "ftp://example.com/file"] {
            let err = classify(raw).unwrap_err();
            assert_eq!(err.error_code(), "VALIDATION_ERROR", "{raw:?}");
        }
    }

    #[test]
    fn extracts_video_ids() {
        let cases = [
            ("https://www.youtube.com/watch?v=abc123XYZ_-", "abc123XYZ_-"),
            ("https://youtu.be/abc123XYZ_-", "abc123XYZ_-"),
            ("https://www.youtube.com/shorts/abc123XYZ_-", "abc123XYZ_-"),
            ("https://www.youtube.com/live/abc123XYZ_-", "abc123XYZ_-"),
            ("https://www.youtube.com/embed/abc123XYZ_-", "abc123XYZ_-"),
        ];
        for (raw, expected) in cases {
            assert_eq!(video_id(&parse(raw)).as_deref(), Some(expected), "{raw}");
        }
    }

    #[test]
    fn no_video_id_for_non_video_paths() {
        assert_eq!(video_id(&parse("https://www.youtube.com/@somechannel")), None);
        assert_eq!(video_id(&parse("https://example.com/watch?v=abc")), None);
        assert_eq!(video_id(&parse("https://www.youtube.com/watch")), None);
    }
}
