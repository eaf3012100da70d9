//! Access layer over the poem store: `(title, content)` uniqueness and not-found handling.

use crate::error::AppError;
use crate::model::{NewPoem, Poem, PoemDraft, PoemId};
use crate::store::PoemStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct PoemAccess {
    store: Arc<dyn PoemStore>,
}

impl PoemAccess {
    pub fn new(store: Arc<dyn PoemStore>) -> Self {
        PoemAccess { store }
    }

    /// Insert unless a poem with the same title and content exists.
    /// Returns the stored row with its id.
    pub async fn create(&self, poem: NewPoem) -> Result<Poem, AppError> {
        if self
            .store
            .exists_by_title_and_content(&poem.title, &poem.content, None)
            .await?
        {
            tracing::info!(title = %poem.title, "rejecting duplicate poem");
            return Err(duplicate(&poem.title));
        }
        let saved = self.store.insert(&poem).await?;
        tracing::debug!(id = saved.id, "poem created");
        Ok(saved)
    }

    pub async fn get_all(&self) -> Result<Vec<Poem>, AppError> {
        self.store.find_all().await
    }

    pub async fn get_by_language(&self, language: &str) -> Result<Vec<Poem>, AppError> {
        self.store.find_by_language(language).await
    }

    pub async fn get_by_id(&self, id: PoemId) -> Result<Option<Poem>, AppError> {
        self.store.find_by_id(id).await
    }

    /// Returns false without touching the store's rows when `id` does not exist.
    pub async fn delete_by_id(&self, id: PoemId) -> Result<bool, AppError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.store.delete_by_id(id).await
    }

    /// Overwrite title, poet, poet_en, dynasty, content and translation of `id`.
    /// `translation` is always overwritten, so a draft without one clears it. `language` is kept.
    pub async fn update(&self, id: PoemId, draft: &PoemDraft) -> Result<Poem, AppError> {
        let mut poem = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if self
            .store
            .exists_by_title_and_content(&draft.title, &draft.content, Some(id))
            .await?
        {
            tracing::info!(id, title = %draft.title, "rejecting update that duplicates a poem");
            return Err(duplicate(&draft.title));
        }

        poem.title = draft.title.clone();
        poem.poet = draft.poet.clone();
        poem.poet_en = draft.poet_en.clone();
        poem.dynasty = draft.dynasty.clone();
        poem.content = draft.content.clone();
        poem.translation = draft.translation.clone();

        self.store.save(&poem).await?.ok_or_else(|| not_found(id))
    }

    /// True if at least one record can be read.
    pub async fn is_alive(&self) -> Result<bool, AppError> {
        Ok(self.store.find_first().await?.is_some())
    }
}

fn duplicate(title: &str) -> AppError {
    AppError::Conflict(format!("poem '{}' with identical content already exists", title))
}

fn not_found(id: PoemId) -> AppError {
    AppError::NotFound(format!("poem {}", id))
}
