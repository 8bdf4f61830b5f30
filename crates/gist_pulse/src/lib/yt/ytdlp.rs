//! yt-dlp and ffmpeg invoked as subprocesses. Both tools must be on the
//! PATH of the host running the service.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::process::Command;

use crate::yt::{AudioHandler, AudioSplitter};

#[derive(Debug, Clone, Default)]
pub struct YtDlp {
    cookies_path: Option<PathBuf>,
}

impl YtDlp {
    pub fn new(cookies_path: Option<PathBuf>) -> Self {
        Self { cookies_path }
    }
}

async fn run_command(mut cmd: Command, what: &str) -> anyhow::Result<()> {
    let output = cmd
        .output()
        .await
        .with_context(|| format!("Failed to spawn {what}"))?;
    if !output.status.success() {
        anyhow::bail!(
            "{what} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

impl AudioHandler for YtDlp {
    async fn download(
        &self,
        url: &str,
        base_name: &str,
        audio_dl_path: &Path,
    ) -> anyhow::Result<PathBuf> {
        tokio::fs::create_dir_all(audio_dl_path).await?;

        let audio_output_template = audio_dl_path.join(format!("{base_name}.%(ext)s"));
        let audio_mp3_path = audio_dl_path.join(format!("{base_name}.mp3"));

        // download audio if needed
        if !audio_mp3_path.exists() {
            let mut cmd = Command::new("yt-dlp");
            cmd.args([
                "-f",
                "bestaudio",
                "--extract-audio",
                "--audio-format",
                "mp3",
                "--audio-quality",
                "192K",
                "--no-playlist",
            ])
            .arg("-o")
            .arg(&audio_output_template)
            .arg(url);
            if let Some(cookies) = &self.cookies_path {
                cmd.arg("--cookies").arg(cookies);
            }

            run_command(cmd, "yt-dlp")
                .await
                .inspect_err(|e| tracing::error!(error = ?e, "Failed to download audio"))?;

            if !audio_mp3_path.exists() {
                anyhow::bail!(
                    "yt-dlp did not produce expected file: {}",
                    audio_mp3_path.display()
                );
            }
        } else {
            tracing::debug!("Audio already exists at {}", audio_mp3_path.display());
        }
        Ok(audio_mp3_path)
    }
}

impl AudioSplitter for YtDlp {
    async fn split_to_chunks(
        &self,
        file_path: &Path,
        chunk_duration_seconds: u16,
        output_template: &Path,
    ) -> anyhow::Result<()> {
        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-i")
            .arg(file_path)
            .args(["-f", "segment", "-segment_time"])
            .arg(chunk_duration_seconds.to_string())
            .args(["-c", "copy"])
            .arg(output_template);
        run_command(cmd, "ffmpeg").await
    }
}
