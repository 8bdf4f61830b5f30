use std::path::PathBuf;

use crate::{scrape::WebLoader, yt::AudioHandler, Summarizer, SummaryPipeline, Transcriber};

#[derive(Debug)]
pub struct ChunkingConfig {
    pub chunk_duration_seconds: u16,
}

pub struct SummaryPipelineBuilder<T = (), S = (), A = (), W = ()> {
    workdir: PathBuf,
    transcriber: T,
    summarizer: S,
    audio_handler: A,
    web_loader: W,
    chunking_config: Option<ChunkingConfig>,
    max_content_chars: usize,
}

impl SummaryPipelineBuilder {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            transcriber: (),
            summarizer: (),
            audio_handler: (),
            web_loader: (),
            chunking_config: None,
            max_content_chars: 4000,
        }
    }
}

impl<T, S, A, W> SummaryPipelineBuilder<T, S, A, W> {
    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> SummaryPipelineBuilder<T2, S, A, W> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            transcriber,
            summarizer: self.summarizer,
            audio_handler: self.audio_handler,
            web_loader: self.web_loader,
            chunking_config: self.chunking_config,
            max_content_chars: self.max_content_chars,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> SummaryPipelineBuilder<T, S2, A, W> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            transcriber: self.transcriber,
            summarizer,
            audio_handler: self.audio_handler,
            web_loader: self.web_loader,
            chunking_config: self.chunking_config,
            max_content_chars: self.max_content_chars,
        }
    }

    pub fn audio_handler<A2: AudioHandler + Send + Sync + 'static>(
        self,
        audio_handler: A2,
    ) -> SummaryPipelineBuilder<T, S, A2, W> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            audio_handler,
            web_loader: self.web_loader,
            chunking_config: self.chunking_config,
            max_content_chars: self.max_content_chars,
        }
    }

    pub fn web_loader<W2: WebLoader + Send + Sync + 'static>(
        self,
        web_loader: W2,
    ) -> SummaryPipelineBuilder<T, S, A, W2> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            audio_handler: self.audio_handler,
            web_loader,
            chunking_config: self.chunking_config,
            max_content_chars: self.max_content_chars,
        }
    }

    pub fn with_chunking(mut self, chunk_duration_seconds: u16) -> Self {
        self.chunking_config = Some(ChunkingConfig {
            chunk_duration_seconds,
        });
        self
    }

    pub fn max_content_chars(mut self, max_content_chars: usize) -> Self {
        self.max_content_chars = max_content_chars;
        self
    }
}

impl<T, S, A, W> SummaryPipelineBuilder<T, S, A, W>
where
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: AudioHandler + Send + Sync + 'static,
    W: WebLoader + Send + Sync + 'static,
{
    pub fn build(self) -> SummaryPipeline<T, S, A, W> {
        SummaryPipeline {
            workdir: self.workdir,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            audio_handler: self.audio_handler,
            web_loader: self.web_loader,
            chunking_config: self.chunking_config,
            max_content_chars: self.max_content_chars,
        }
    }
}
