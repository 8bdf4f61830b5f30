pub mod builder;

use std::{fs::remove_dir_all, path::PathBuf};

use serde::Serialize;

use crate::{
    error::Error,
    fingerprint,
    scrape::WebLoader,
    text,
    url::{self, UrlKind},
    yt::AudioHandler,
    AudioInput, Summarizer, SummaryOptions, Transcriber,
};

use builder::ChunkingConfig;

// The core URL-to-summary pipeline: classify, extract text, summarize.
pub struct SummaryPipeline<T, S, A, W>
where
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    W: WebLoader + Send + Sync + 'static,
{
    workdir: PathBuf,
    transcriber: T,
    summarizer: S,
    audio_handler: A,
    web_loader: W,
    chunking_config: Option<ChunkingConfig>,
    max_content_chars: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub url: String,
    pub url_type: UrlKind,
    pub summary: String,
    pub source_chars: usize,
    pub word_count: usize,
    pub reading_time: usize,
    pub truncated: bool,
}

impl<T, S, A, W> SummaryPipeline<T, S, A, W>
where
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    W: WebLoader + Send + Sync + 'static,
{
    #[tracing::instrument(skip(self, options))]
    pub async fn summarize_url(
        &self,
        raw_url: &str,
        options: &SummaryOptions,
    ) -> Result<Summary, Error> {
        let (parsed, kind) = url::classify(raw_url)?;

        let source = match kind {
            UrlKind::Youtube => self.transcribe_video(&parsed).await?,
            UrlKind::Website => self.load_website(&parsed).await?,
        };

        let source = text::sanitize(&source);
        let source_chars = source.chars().count();
        let truncated = source_chars > self.max_content_chars;
        let source = if truncated {
            tracing::info!(
                chars = source_chars,
                max = self.max_content_chars,
                "Content truncated"
            );
            text::truncate(&source, self.max_content_chars)
        } else {
            source
        };

        let summary_resp = self
            .summarizer
            .summarize(&source, options)
            .await
            .map_err(|e| Error::Summarization(format!("Failed to summarize content: {e:?}")))?;

        let summary = summary_resp.summary.trim().to_string();
        if summary.is_empty() {
            return Err(Error::Summarization(
                "Summarization resulted in empty output".into(),
            ));
        }

        Ok(Summary {
            url: parsed.into(),
            url_type: kind,
            word_count: text::word_count(&summary),
            reading_time: text::reading_time_minutes(&summary),
            summary,
            source_chars,
            truncated,
        })
    }

    /// Downloads the video's audio and runs it through the transcriber,
    /// chunked when chunking is configured.
    #[tracing::instrument(skip(self))]
    async fn transcribe_video(&self, video_url: &url::Url) -> Result<String, Error> {
        // stable on-disk name: the video id when the URL shape yields one,
        // a digest of the URL otherwise
        let base_name = url::video_id(video_url)
            .unwrap_or_else(|| fingerprint::digest(video_url.as_str())[..16].to_string());
        let audio_dl_path = self.workdir.join("audio");

        let audio_path = self
            .audio_handler
            .download(video_url.as_str(), &base_name, &audio_dl_path)
            .await
            .map_err(|e| Error::Youtube(format!("Failed to process YouTube video: {e:?}")))?;

        let audio_input = match &self.chunking_config {
            Some(config) => AudioInput::Chunked {
                chunk_duration_seconds: config.chunk_duration_seconds,
                chunks_dir_path: audio_dl_path.join(&base_name),
                file_path: audio_path,
            },
            None => AudioInput::File(audio_path),
        };

        let transcribe_resp = self
            .transcriber
            .transcribe(audio_input)
            .await
            .map_err(|e| Error::Transcription(format!("Failed to transcribe audio: {e:?}")))?;

        if transcribe_resp.text.trim().is_empty() {
            return Err(Error::Transcription(
                "Transcription resulted in empty text".into(),
            ));
        }
        Ok(transcribe_resp.text)
    }

    #[tracing::instrument(skip(self))]
    async fn load_website(&self, site_url: &url::Url) -> Result<String, Error> {
        let content = self
            .web_loader
            .load(site_url.as_str())
            .await
            .map_err(|e| Error::Website(format!("Failed to load website content: {e:?}")))?;

        if content.text.trim().is_empty() {
            return Err(Error::Website(
                "Website content is empty or not readable".into(),
            ));
        }
        Ok(match content.title {
            Some(title) => format!("{title}\n\n{}", content.text),
            None => content.text,
        })
    }
}

impl<T, S, A, W> Drop for SummaryPipeline<T, S, A, W>
where
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    W: WebLoader + Send + Sync + 'static,
{
    fn drop(&mut self) {
        let audio_path = self.workdir.join("audio");

        if audio_path.exists() {
            if let Err(e) = remove_dir_all(&audio_path) {
                tracing::warn!(error = ?e, path = ?audio_path, "Failed to clean up audio directory");
            } else {
                tracing::info!(path = ?audio_path, "Cleaned up audio directory");
            }
        }
    }
}
