pub mod ytdlp;

use std::{
    future::Future,
    path::{Path, PathBuf},
};

/// Fetches a video's audio track to disk as mp3.
pub trait AudioHandler {
    fn download(
        &self,
        url: &str,
        base_name: &str,
        audio_dl_path: &Path,
    ) -> impl Future<Output = anyhow::Result<PathBuf>> + Send;
}

/// Splits an audio file into fixed-duration segments, used to keep
/// transcription uploads under the API's file size limit.
pub trait AudioSplitter {
    fn split_to_chunks(
        &self,
        file_path: &Path,
        chunk_duration_seconds: u16,
        output_template: &Path,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}
