//! Website content extraction: fetch HTML and pull out the title and the
//! readable body text, skipping script/style subtrees.

use std::{fmt::Debug, future::Future, sync::LazyLock, time::Duration};

use scraper::{ElementRef, Html, Selector};

use crate::{error::Error, text};

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Seam for fetching website content, so tests can substitute a fake.
pub trait WebLoader {
    type Error: Debug;

    fn load(&self, url: &str) -> impl Future<Output = Result<WebContent, Self::Error>> + Send;
}

#[derive(Debug, Clone)]
pub struct WebContent {
    pub title: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: reqwest::Client,
}

impl WebScraper {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self { client })
    }
}

impl WebLoader for WebScraper {
    type Error = Error;

    async fn load(&self, url: &str) -> Result<WebContent, Error> {
        let resp = self
            .client
            .get(url)
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch website"))?
            .error_for_status()?;

        let body = resp.text().await?;
        Ok(extract_content(&body))
    }
}

/// Parses an HTML document into (title, sanitized body text).
pub fn extract_content(html: &str) -> WebContent {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| text::sanitize(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty());

    let mut body_text = String::new();
    if let Some(body) = document.select(&BODY_SELECTOR).next() {
        collect_text(body, &mut body_text);
    }

    WebContent {
        title,
        text: text::sanitize(&body_text),
    }
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    if matches!(el.value().name(), "script" | "style" | "noscript") {
        return;
    }
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            collect_text(child_el, out);
        } else if let Some(t) = child.value().as_text() {
            out.push_str(t);
            out.push(' ');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <html>
          <head>
            <title>  An   Example Page </title>
            <style>body { color: red; }</style>
          </head>
          <body>
            <h1>Heading</h1>
            <p>First paragraph.</p>
            <script>console.log("should not appear");</script>
            <div><p>Nested <b>bold</b> text.</p></div>
            <noscript>enable javascript</noscript>
          </body>
        </html>"#;

    #[test]
    fn extracts_title_and_body_text() {
        let content = extract_content(FIXTURE);
        assert_eq!(content.title.as_deref(), Some("An Example Page"));
        assert_eq!(content.text, "Heading First paragraph. Nested bold text.");
    }

    #[test]
    fn skips_script_style_and_noscript() {
        let content = extract_content(FIXTURE);
        assert!(!content.text.contains("should not appear"));
        assert!(!content.text.contains("color: red"));
        assert!(!content.text.contains("enable javascript"));
    }

    #[test]
    fn empty_document_yields_empty_content() {
        let content = extract_content("<html><body></body></html>");
        assert_eq!(content.title, None);
        assert!(content.text.is_empty());
    }
}
