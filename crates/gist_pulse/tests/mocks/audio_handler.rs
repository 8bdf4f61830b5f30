use gist_pulse::yt::AudioHandler;
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

#[derive(Clone, Default)]
pub struct MockAudioHandler {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockAudioHandler {
    pub fn failing(msg: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl AudioHandler for MockAudioHandler {
    async fn download(
        &self,
        url: &str,
        base_name: &str,
        _audio_dl_path: &Path,
    ) -> anyhow::Result<PathBuf> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.calls.lock().unwrap().push(url.to_string());
        Ok(PathBuf::from(format!("/tmp/mock/{base_name}.mp3")))
    }
}
