//! Translation provider seam and the Gemini implementation.

mod gemini;

pub use gemini::{
    GeminiTranslator, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, TRANSLATION_PROMPT,
};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a translation provider call. Never surfaced over HTTP.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("could not decode provider response: {0}")]
    Decode(String),
}

/// Turns original-language poem text into an English rendering.
#[async_trait]
pub trait Translator: Send + Sync {
    /// `Ok(None)` when the provider answered but carried no extractable text.
    async fn translate(&self, text: &str) -> Result<Option<String>, TranslateError>;
}
