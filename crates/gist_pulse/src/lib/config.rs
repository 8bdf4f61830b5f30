//! Runtime configuration. The binary assembles an [`AppConfig`] from CLI
//! flags and environment variables; the library only sees the resolved
//! values.

use std::{path::PathBuf, time::Duration};

use crate::{error::Error, llm::is_plausible_api_key, SummaryStyle};

pub const DEFAULT_LANGUAGE: &str = "english";
pub const SUPPORTED_LANGUAGES: [&str; 6] = [
    "english",
    "spanish",
    "french",
    "german",
    "portuguese",
    "chinese",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub groq_api_key: String,
    pub summary_model: String,
    pub transcription_model: String,
    pub groq_base_url: String,
    pub groq_max_retries: u32,

    pub cache_enabled: bool,
    pub cache_ttl: Duration,

    pub rate_limit_enabled: bool,
    pub rate_limit_calls: usize,
    pub rate_limit_period: Duration,

    pub min_summary_length: u32,
    pub max_summary_length: u32,
    pub default_summary_length: u32,
    pub default_summary_style: SummaryStyle,
    pub default_language: String,

    pub max_content_chars: usize,
    pub chunk_duration_seconds: u16,

    pub history_enabled: bool,
    pub history_capacity: usize,

    pub workdir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            groq_api_key: String::new(),
            summary_model: crate::groq::DEFAULT_SUMMARY_MODEL.into(),
            transcription_model: crate::groq::DEFAULT_TRANSCRIPTION_MODEL.into(),
            groq_base_url: crate::groq::DEFAULT_BASE_URL.into(),
            groq_max_retries: 3,
            cache_enabled: true,
            cache_ttl: Duration::from_secs(3600),
            rate_limit_enabled: true,
            rate_limit_calls: 10,
            rate_limit_period: Duration::from_secs(60),
            min_summary_length: 100,
            max_summary_length: 1000,
            default_summary_length: 300,
            default_summary_style: SummaryStyle::Balanced,
            default_language: DEFAULT_LANGUAGE.into(),
            max_content_chars: 4000,
            chunk_duration_seconds: 900,
            history_enabled: true,
            history_capacity: 20,
            workdir: PathBuf::from("/var/tmp/gist-pulse"),
        }
    }
}

impl AppConfig {
    /// Rejects unusable configuration before any component is built.
    pub fn validate(&self) -> Result<(), Error> {
        if self.groq_api_key.trim().is_empty() {
            return Err(Error::Config("GROQ_API_KEY must be set".into()));
        }
        if !is_plausible_api_key(&self.groq_api_key) {
            return Err(Error::Config(
                "GROQ_API_KEY does not look like a valid key".into(),
            ));
        }
        if self.cache_ttl.is_zero() {
            return Err(Error::Config("cache TTL must be non-zero".into()));
        }
        if self.rate_limit_calls == 0 {
            return Err(Error::Config("rate limit max calls must be non-zero".into()));
        }
        if self.rate_limit_period.is_zero() {
            return Err(Error::Config("rate limit period must be non-zero".into()));
        }
        if self.min_summary_length > self.default_summary_length
            || self.default_summary_length > self.max_summary_length
        {
            return Err(Error::Config(format!(
                "summary lengths must satisfy min <= default <= max, got {} <= {} <= {}",
                self.min_summary_length, self.default_summary_length, self.max_summary_length
            )));
        }
        if self.max_content_chars == 0 {
            return Err(Error::Config("max content chars must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            groq_api_key: "gsk_testkey123456".into(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn default_with_key_validates() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn missing_or_malformed_key_is_rejected() {
        let mut config = valid_config();
        config.groq_api_key = String::new();
        assert!(config.validate().is_err());

        config.groq_api_key = "bad key!".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_durations_and_counts_are_rejected() {
        let mut config = valid_config();
        config.cache_ttl = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.rate_limit_calls = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.rate_limit_period = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_length_bounds_are_rejected() {
        let mut config = valid_config();
        config.default_summary_length = 50;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.default_summary_length = 2000;
        assert!(config.validate().is_err());
    }
}
