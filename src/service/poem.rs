//! Application layer: default language on create and translation enrichment.

use super::access::PoemAccess;
use crate::error::AppError;
use crate::model::{Poem, PoemDraft, PoemId, DEFAULT_LANGUAGE};
use crate::store::PoemStore;
use crate::translate::Translator;
use std::sync::Arc;

#[derive(Clone)]
pub struct PoemService {
    access: PoemAccess,
    translator: Option<Arc<dyn Translator>>,
}

impl PoemService {
    /// `translator` is `None` when no provider is configured; enrichment then stores no
    /// translation.
    pub fn new(store: Arc<dyn PoemStore>, translator: Option<Arc<dyn Translator>>) -> Self {
        PoemService {
            access: PoemAccess::new(store),
            translator,
        }
    }

    pub async fn add_poem(&self, draft: PoemDraft) -> Result<Poem, AppError> {
        self.access.create(draft.into_new_poem(DEFAULT_LANGUAGE)).await
    }

    pub async fn get_all_poems(&self) -> Result<Vec<Poem>, AppError> {
        self.access.get_all().await
    }

    pub async fn get_poems_by_language(&self, language: &str) -> Result<Vec<Poem>, AppError> {
        self.access.get_by_language(language).await
    }

    pub async fn get_poem_by_id(&self, id: PoemId) -> Result<Option<Poem>, AppError> {
        self.access.get_by_id(id).await
    }

    pub async fn delete_poem_by_id(&self, id: PoemId) -> Result<bool, AppError> {
        self.access.delete_by_id(id).await
    }

    pub async fn update_poem_by_id(&self, id: PoemId, draft: &PoemDraft) -> Result<Poem, AppError> {
        self.access.update(id, draft).await
    }

    /// Fill in a missing translation. Returns `None` if `id` does not exist.
    /// A poem that already has a translation is returned as is, without calling the provider.
    pub async fn translate_poem(&self, id: PoemId) -> Result<Option<Poem>, AppError> {
        let Some(mut poem) = self.access.get_by_id(id).await? else {
            return Ok(None);
        };
        if poem.has_translation() {
            return Ok(Some(poem));
        }

        poem.translation = self.fetch_translation(&poem).await;
        let saved = self.access.update(id, &PoemDraft::from(&poem)).await?;
        Ok(Some(saved))
    }

    pub async fn is_db_alive(&self) -> Result<bool, AppError> {
        self.access.is_alive().await
    }

    /// Provider failures and empty answers both come back as `None`.
    async fn fetch_translation(&self, poem: &Poem) -> Option<String> {
        let Some(translator) = &self.translator else {
            tracing::warn!(id = poem.id, "no translation provider configured");
            return None;
        };
        match translator.translate(&poem.content).await {
            Ok(Some(text)) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                tracing::info!(id = poem.id, "translation provider returned no text");
                None
            }
            Err(e) => {
                tracing::warn!(id = poem.id, error = %e, "translation provider call failed");
                None
            }
        }
    }
}
