//! Client for Groq's OpenAI-compatible API: Whisper transcription over
//! multipart upload and chat completions for summarization. Transient
//! failures are retried with exponential backoff, honoring any
//! `Retry-After` the API sends back.

use std::path::PathBuf;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_retry_after::RetryAfterMiddleware;
use serde::Deserialize;

use crate::{
    llm::summarizer::{Summarizer, SummaryOptions, SummaryResponse},
    llm::transcriber::{AudioInput, TranscribeResponse, Transcriber},
    yt::AudioSplitter,
};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_SUMMARY_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-large-v3";

#[derive(Clone)]
pub struct GroqClient<F: AudioSplitter> {
    client: ClientWithMiddleware,
    api_key: String,
    base_url: String,
    summary_model: String,
    transcription_model: String,
    splitter: F,
}

#[derive(Debug, thiserror::Error)]
pub enum GroqError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest_middleware::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Audio error: {0}")]
    Audio(String),
}

impl<F: AudioSplitter> GroqClient<F> {
    const SYSTEM_PROMPT: &'static str = include_str!("./prompts/system_0.txt");

    pub fn new(api_key: impl Into<String>, splitter: F, max_retries: u32) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
        let client = ClientBuilder::new(reqwest::Client::new())
            .with(RetryAfterMiddleware::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            summary_model: DEFAULT_SUMMARY_MODEL.into(),
            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.into(),
            splitter,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_models(
        mut self,
        summary_model: impl Into<String>,
        transcription_model: impl Into<String>,
    ) -> Self {
        self.summary_model = summary_model.into();
        self.transcription_model = transcription_model.into();
        self
    }

    pub async fn send_transcribe_request(
        &self,
        file: impl Into<PathBuf>,
        prompt: Option<String>,
    ) -> Result<TranscribeResponse, GroqError> {
        let audio_path = file.into();

        let bytes = tokio::fs::read(&audio_path).await?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("chunk.mp3")
            .mime_str("audio/mpeg")?;

        let mut form = reqwest::multipart::Form::new()
            .text("model", self.transcription_model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "segment")
            .part("file", part);

        if let Some(prompt) = prompt {
            form = form.text("prompt", prompt);
        }

        let resp = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GroqError::Api { status, message });
        }

        Ok(resp.json::<TranscribeResponse>().await?)
    }

    pub async fn send_completion_request(
        &self,
        user_content: impl Into<String>,
    ) -> Result<CompletionResponse, GroqError> {
        let body = serde_json::json!({
            "model": self.summary_model,
            "temperature": 0.5,
            "messages": [
                {
                    "role": "system",
                    "content": Self::SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(GroqError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl<F: AudioSplitter + Send + Sync> Transcriber for GroqClient<F> {
    type Error = GroqError;

    async fn transcribe(&self, input: AudioInput) -> Result<TranscribeResponse, GroqError> {
        let (file_path, chunks_dir_path, chunk_duration_seconds) = match input {
            AudioInput::File(path) => {
                return self.send_transcribe_request(path, None).await;
            }
            AudioInput::Chunked {
                file_path,
                chunks_dir_path,
                chunk_duration_seconds,
            } => (file_path, chunks_dir_path, chunk_duration_seconds),
        };

        let chunks_exist = std::fs::read_dir(&chunks_dir_path)
            .map(|mut entries| entries.any(|e| e.is_ok()))
            .unwrap_or(false);

        // chunk via ffmpeg if not already done
        if !chunks_exist {
            std::fs::create_dir_all(&chunks_dir_path)?;
            let base_name = file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| GroqError::Audio("Invalid file path".into()))?;

            tracing::info!("Splitting audio to chunks");
            self.splitter
                .split_to_chunks(
                    &file_path,
                    chunk_duration_seconds,
                    &chunks_dir_path.join(format!("{base_name}_%03d.mp3")),
                )
                .await
                .inspect_err(|e| tracing::error!(error = %e, "Failed to split audio to chunks"))
                .map_err(|e| GroqError::Audio(e.to_string()))?;
        }

        // collect and sort chunk files
        let mut chunks: Vec<PathBuf> = std::fs::read_dir(&chunks_dir_path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        chunks.sort();

        let mut all_segments = Vec::new();
        let mut all_text = String::new();
        let mut time_offset = 0.0_f64;
        let mut duration = 0.0_f64;
        let mut previous_text = None;

        for chunk in &chunks {
            // previous chunk's text threads through as the prompt so the
            // model keeps context across chunk boundaries
            let response = self
                .send_transcribe_request(chunk, previous_text)
                .await
                .inspect_err(|e| tracing::error!(error = %e, "Failed to transcribe audio"))?;

            duration += response.duration;

            if let Some(segments) = response.segments {
                for mut seg in segments {
                    seg.start += time_offset;
                    seg.end += time_offset;
                    all_segments.push(seg);
                }
            }

            all_text.push_str(&response.text);
            all_text.push(' ');
            previous_text = Some(response.text);
            time_offset += chunk_duration_seconds as f64;
        }

        Ok(TranscribeResponse {
            duration,
            text: all_text.trim().to_string(),
            segments: Some(all_segments),
        })
    }
}

impl<F: AudioSplitter + Send + Sync> Summarizer for GroqClient<F> {
    type Error = GroqError;

    async fn summarize(
        &self,
        content: &str,
        options: &SummaryOptions,
    ) -> Result<SummaryResponse, GroqError> {
        let prompt = options
            .style
            .prompt(content, options.length_words, &options.language);

        let response = self
            .send_completion_request(prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

        let summary = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| GroqError::Api {
                status: 0,
                message: "No content in response".into(),
            })?;

        Ok(SummaryResponse { summary })
    }
}
