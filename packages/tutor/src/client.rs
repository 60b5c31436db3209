//! Client for the generative-language API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::TutorError;
use crate::prompts::{self, Language};

/// Model used when the configuration names none.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Shown in place of feedback when the request fails.
pub const FEEDBACK_FALLBACK: &str =
    "An error occurred while generating feedback. Please try again later.";

/// Shown in place of an explanation when the request fails.
pub const EXPLANATION_FALLBACK: &str =
    "An error occurred while generating the explanation. Please try again later.";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// AI help on a piece of student code.
///
/// Implementations never fail: any transport or decoding problem is
/// replaced by the fixed fallback text for the request kind.
#[async_trait]
pub trait Tutor: Send + Sync {
    /// Instructor-style critique of correctness, style and
    /// improvements, as markdown.
    async fn feedback(&self, code: &str, language: Language) -> String;

    /// One-sentence-per-block explanation of the code, as markdown.
    async fn explanation(&self, code: &str, language: Language) -> String;
}

/// [`Tutor`] backed by the hosted Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiTutor {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiTutor {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    async fn generate(&self, prompt: String) -> Result<String, TutorError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TutorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        reply_text(response.json().await?).ok_or(TutorError::EmptyReply)
    }
}

/// Concatenated text parts of the first candidate.
fn reply_text(reply: GenerateResponse) -> Option<String> {
    let text: String = reply
        .candidates
        .into_iter()
        .next()?
        .content
        .parts
        .into_iter()
        .map(|p| p.text)
        .collect();

    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl Tutor for GeminiTutor {
    #[instrument(skip(self, code), fields(model = %self.model))]
    async fn feedback(&self, code: &str, language: Language) -> String {
        match self.generate(prompts::feedback(code, language)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "feedback request failed");
                FEEDBACK_FALLBACK.to_string()
            }
        }
    }

    #[instrument(skip(self, code), fields(model = %self.model))]
    async fn explanation(&self, code: &str, language: Language) -> String {
        match self.generate(prompts::explanation(code, language)).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "explanation request failed");
                EXPLANATION_FALLBACK.to_string()
            }
        }
    }
}
