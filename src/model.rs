//! Poem record and request payload types.

use serde::{Deserialize, Serialize};

pub type PoemId = i32;

/// Language stored when a new poem arrives without one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// One row of `all_poems`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Poem {
    pub id: PoemId,
    pub title: String,
    pub poet: String,
    pub poet_en: Option<String>,
    pub dynasty: Option<String>,
    pub content: String,
    pub translation: Option<String>,
    pub language: String,
}

impl Poem {
    /// True when a non-empty translation is already stored.
    pub fn has_translation(&self) -> bool {
        self.translation.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Request body for create and update. Every field is optional here; `PoemValidator` decides
/// what is required. A client-supplied `id` is accepted and ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PoemPayload {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poet: Option<String>,
    #[serde(default)]
    pub poet_en: Option<String>,
    #[serde(default)]
    pub dynasty: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Validated payload: required fields are present and non-blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoemDraft {
    pub title: String,
    pub poet: String,
    pub poet_en: Option<String>,
    pub dynasty: Option<String>,
    pub content: String,
    pub translation: Option<String>,
    pub language: Option<String>,
}

impl PoemDraft {
    /// Resolve the language for insertion, falling back to `default` when absent or blank.
    pub fn into_new_poem(self, default: &str) -> NewPoem {
        let language = self
            .language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| default.to_string());
        NewPoem {
            title: self.title,
            poet: self.poet,
            poet_en: self.poet_en,
            dynasty: self.dynasty,
            content: self.content,
            translation: self.translation,
            language,
        }
    }
}

impl From<&Poem> for PoemDraft {
    fn from(p: &Poem) -> Self {
        PoemDraft {
            title: p.title.clone(),
            poet: p.poet.clone(),
            poet_en: p.poet_en.clone(),
            dynasty: p.dynasty.clone(),
            content: p.content.clone(),
            translation: p.translation.clone(),
            language: Some(p.language.clone()),
        }
    }
}

/// Poem ready for insertion; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPoem {
    pub title: String,
    pub poet: String,
    pub poet_en: Option<String>,
    pub dynasty: Option<String>,
    pub content: String,
    pub translation: Option<String>,
    pub language: String,
}
