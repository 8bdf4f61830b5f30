//! HTTP surface: summarize plus a handful of introspection endpoints.
//!
//! All shared state lives in explicit [`ApiState`] instances rather than
//! globals; the cache and limiter do no locking of their own, so the state
//! wraps them in mutexes here.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    extract::{ConnectInfo, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use gist_guard::{RateLimiter, TtlCache};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    config::{AppConfig, SUPPORTED_LANGUAGES},
    error::Error,
    fingerprint,
    history::{History, HistoryEntry},
    llm::is_plausible_api_key,
    scrape::WebLoader,
    url::{self, UrlKind},
    yt::AudioHandler,
    Summarizer, SummaryOptions, SummaryPipeline, SummaryStyle, Transcriber,
};

pub struct ApiState<T, S, A, W>
where
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    W: WebLoader + Send + Sync + 'static,
{
    pipeline: Arc<SummaryPipeline<T, S, A, W>>,
    cache: Arc<Mutex<TtlCache<CachedSummary>>>,
    limiter: Arc<Mutex<RateLimiter>>,
    history: Arc<Mutex<History>>,
    config: Arc<AppConfig>,
}

impl<T, S, A, W> ApiState<T, S, A, W>
where
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    W: WebLoader + Send + Sync + 'static,
{
    pub fn new(
        pipeline: Arc<SummaryPipeline<T, S, A, W>>,
        config: AppConfig,
    ) -> Result<Self, Error> {
        let cache =
            TtlCache::new(config.cache_ttl).map_err(|e| Error::Config(e.to_string()))?;
        let limiter = RateLimiter::new(config.rate_limit_calls, config.rate_limit_period)
            .map_err(|e| Error::Config(e.to_string()))?;
        let history = History::new(config.history_capacity);

        Ok(Self {
            pipeline,
            cache: Arc::new(Mutex::new(cache)),
            limiter: Arc::new(Mutex::new(limiter)),
            history: Arc::new(Mutex::new(history)),
            config: Arc::new(config),
        })
    }
}

impl<T, S, A, W> Clone for ApiState<T, S, A, W>
where
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    W: WebLoader + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            cache: Arc::clone(&self.cache),
            limiter: Arc::clone(&self.limiter),
            history: Arc::clone(&self.history),
            config: Arc::clone(&self.config),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedSummary {
    summary: String,
    url_type: UrlKind,
    word_count: usize,
    reading_time: usize,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub url: String,
    #[serde(default)]
    pub style: Option<SummaryStyle>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub url: String,
    pub url_type: UrlKind,
    pub summary: String,
    pub word_count: usize,
    pub reading_time: usize,
    pub cached: bool,
    pub generated_at: DateTime<Utc>,
}

pub fn router<T, S, A, W>(state: ApiState<T, S, A, W>) -> Router
where
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    W: WebLoader + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/summarize", post(summarize::<T, S, A, W>))
        .route("/api/styles", get(styles))
        .route("/api/config", get(get_config::<T, S, A, W>))
        .route("/api/history", get(get_history::<T, S, A, W>))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "gist-pulse" }))
}

async fn styles() -> Json<serde_json::Value> {
    let styles: Vec<&str> = SummaryStyle::ALL.iter().map(|s| s.as_str()).collect();
    Json(serde_json::json!({ "styles": styles }))
}

async fn get_config<T, S, A, W>(
    State(state): State<ApiState<T, S, A, W>>,
) -> Json<serde_json::Value>
where
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    W: WebLoader + Send + Sync + 'static,
{
    let config = &state.config;
    let styles: Vec<&str> = SummaryStyle::ALL.iter().map(|s| s.as_str()).collect();
    Json(serde_json::json!({
        "min_summary_length": config.min_summary_length,
        "max_summary_length": config.max_summary_length,
        "default_summary_length": config.default_summary_length,
        "summary_styles": styles,
        "supported_languages": SUPPORTED_LANGUAGES,
        "summary_model": config.summary_model,
        "transcription_model": config.transcription_model,
    }))
}

async fn get_history<T, S, A, W>(
    State(state): State<ApiState<T, S, A, W>>,
) -> Json<serde_json::Value>
where
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    W: WebLoader + Send + Sync + 'static,
{
    let entries: Vec<HistoryEntry> = if state.config.history_enabled {
        state
            .history
            .lock()
            .unwrap()
            .newest_first()
            .cloned()
            .collect()
    } else {
        Vec::new()
    };
    Json(serde_json::json!({ "history": entries }))
}

#[tracing::instrument(skip(state, req), fields(url = %req.url))]
async fn summarize<T, S, A, W>(
    State(state): State<ApiState<T, S, A, W>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, Error>
where
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    W: WebLoader + Send + Sync + 'static,
{
    let config = &state.config;

    let (parsed, _) = url::classify(&req.url)?;

    let length = req.length.unwrap_or(config.default_summary_length);
    if !(config.min_summary_length..=config.max_summary_length).contains(&length) {
        return Err(Error::Validation(format!(
            "length must be between {} and {} words",
            config.min_summary_length, config.max_summary_length
        )));
    }
    if let Some(key) = req.api_key.as_deref() {
        if !is_plausible_api_key(key) {
            return Err(Error::Validation("Invalid API key format".into()));
        }
    }
    let style = req.style.unwrap_or(config.default_summary_style);
    let language = req
        .language
        .clone()
        .unwrap_or_else(|| config.default_language.clone());

    if config.rate_limit_enabled {
        let identifier = addr.ip().to_string();
        let mut limiter = state.limiter.lock().unwrap();
        if !limiter.is_allowed(&identifier) {
            let retry_after = retry_after_secs(limiter.retry_after(&identifier));
            tracing::warn!(%identifier, retry_after, "Request rate limited");
            return Err(Error::RateLimited { retry_after });
        }
    }

    let cache_key = fingerprint::fingerprint(parsed.as_str(), style, length, &language);
    if config.cache_enabled {
        let mut cache = state.cache.lock().unwrap();
        if let Some(hit) = cache.get(&cache_key) {
            tracing::info!("Serving summary from cache");
            return Ok(Json(SummarizeResponse {
                url: parsed.into(),
                url_type: hit.url_type,
                summary: hit.summary,
                word_count: hit.word_count,
                reading_time: hit.reading_time,
                cached: true,
                generated_at: Utc::now(),
            }));
        }
    }

    let options = SummaryOptions {
        style,
        length_words: length,
        language,
    };
    let summary = state.pipeline.summarize_url(parsed.as_str(), &options).await?;

    if config.cache_enabled {
        state.cache.lock().unwrap().set(
            cache_key,
            CachedSummary {
                summary: summary.summary.clone(),
                url_type: summary.url_type,
                word_count: summary.word_count,
                reading_time: summary.reading_time,
            },
        );
    }
    if config.history_enabled {
        state.history.lock().unwrap().push(HistoryEntry {
            url: summary.url.clone(),
            url_type: summary.url_type,
            style,
            summary: summary.summary.clone(),
            created_at: Utc::now(),
        });
    }

    tracing::info!(words = summary.word_count, "Summary generated");
    Ok(Json(SummarizeResponse {
        url: summary.url,
        url_type: summary.url_type,
        summary: summary.summary,
        word_count: summary.word_count,
        reading_time: summary.reading_time,
        cached: false,
        generated_at: Utc::now(),
    }))
}

/// `Retry-After` wants whole seconds; round any fraction up so a client
/// waiting the advertised time is never early.
fn retry_after_secs(wait: Duration) -> u64 {
    wait.as_secs() + u64::from(wait.subsec_nanos() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_after_rounds_fractions_up() {
        assert_eq!(retry_after_secs(Duration::ZERO), 0);
        assert_eq!(retry_after_secs(Duration::from_secs(58)), 58);
        assert_eq!(retry_after_secs(Duration::from_millis(58_200)), 59);
        assert_eq!(retry_after_secs(Duration::from_nanos(1)), 1);
    }
}
