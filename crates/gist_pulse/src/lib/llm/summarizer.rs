use std::{fmt::Debug, future::Future, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_LANGUAGE;

pub trait Summarizer {
    type Error: Debug;

    fn summarize(
        &self,
        content: &str,
        options: &SummaryOptions,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;
}

#[derive(Debug, Clone)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOptions {
    pub style: SummaryStyle,
    pub length_words: u32,
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle {
    Balanced,
    BulletPoints,
    Executive,
    Technical,
    Simplified,
}

impl SummaryStyle {
    pub const ALL: [SummaryStyle; 5] = [
        SummaryStyle::Balanced,
        SummaryStyle::BulletPoints,
        SummaryStyle::Executive,
        SummaryStyle::Technical,
        SummaryStyle::Simplified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryStyle::Balanced => "balanced",
            SummaryStyle::BulletPoints => "bullet_points",
            SummaryStyle::Executive => "executive",
            SummaryStyle::Technical => "technical",
            SummaryStyle::Simplified => "simplified",
        }
    }

    /// Builds the user prompt for this style. A language instruction is
    /// appended only when the caller asks for something other than the
    /// default language.
    pub fn prompt(&self, content: &str, length_words: u32, language: &str) -> String {
        let mut prompt = match self {
            SummaryStyle::Balanced => format!(
                "Provide a balanced summary of the following content in approximately \
                 {length_words} words. Cover the main points clearly and concisely."
            ),
            SummaryStyle::BulletPoints => "Summarize the following content as concise bullet \
                 points (5-8 points). Focus on key takeaways."
                .to_string(),
            SummaryStyle::Executive => format!(
                "Create an executive summary of the following content in {length_words} words. \
                 Include key findings and recommendations."
            ),
            SummaryStyle::Technical => format!(
                "Provide a technical summary of the following content in {length_words} words. \
                 Focus on technical details and specifications."
            ),
            SummaryStyle::Simplified => format!(
                "Explain the following content in simple terms ({length_words} words). \
                 Make it understandable to non-experts."
            ),
        };
        if !language.is_empty() && !language.eq_ignore_ascii_case(DEFAULT_LANGUAGE) {
            prompt.push_str(&format!(" Write the summary in {language}."));
        }
        prompt.push_str(&format!("\nContent: {content}\nSummary:"));
        prompt
    }
}

impl std::fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|style| style.as_str() == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "unknown summary style '{s}', expected one of: {}",
                    Self::ALL.iter().map(|style| style.as_str()).join(", ")
                )
            })
    }
}
