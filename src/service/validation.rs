//! Request validation for poem payloads.

use crate::error::AppError;
use crate::model::{PoemDraft, PoemPayload};

pub struct PoemValidator;

impl PoemValidator {
    /// Validate a create/update body. `title`, `poet` and `content` must be present and non-blank.
    /// `language` may be absent; the application layer supplies the default.
    pub fn validate(payload: PoemPayload) -> Result<PoemDraft, AppError> {
        let title = required("title", payload.title)?;
        let poet = required("poet", payload.poet)?;
        let content = required("content", payload.content)?;
        Ok(PoemDraft {
            title,
            poet,
            poet_en: payload.poet_en,
            dynasty: payload.dynasty,
            content,
            translation: payload.translation,
            language: payload.language,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{} must not be blank", field))),
    }
}
