mod error;
mod llm;

pub mod api;
pub mod config;
pub mod fingerprint;
pub mod history;
pub mod pipeline;
pub mod scrape;
pub mod text;
pub mod tracing;
pub mod url;
pub mod yt;

pub use error::Error;
pub use llm::groq;
pub use llm::{
    is_plausible_api_key,
    summarizer::{Summarizer, SummaryOptions, SummaryResponse, SummaryStyle},
    transcriber::{AudioInput, TranscribeResponse, TranscribeSegment, Transcriber},
};
pub use pipeline::{builder::SummaryPipelineBuilder, Summary, SummaryPipeline};
