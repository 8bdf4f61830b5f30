use gist_pulse::scrape::{WebContent, WebLoader};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockWebLoader {
    pub title: Option<String>,
    pub text: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockWebLoader {
    pub fn new(title: Option<&str>, text: &str) -> Self {
        Self {
            title: title.map(str::to_string),
            text: text.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            title: None,
            text: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl WebLoader for MockWebLoader {
    type Error = anyhow::Error;

    async fn load(&self, url: &str) -> Result<WebContent, Self::Error> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(WebContent {
            title: self.title.clone(),
            text: self.text.clone(),
        })
    }
}
