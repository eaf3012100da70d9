//! In-memory `PoemStore` for tests. Uniqueness is checked under the same lock as the write.

use super::PoemStore;
use crate::error::AppError;
use crate::model::{NewPoem, Poem, PoemId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct MemoryPoemStore {
    rows: Mutex<Vec<Poem>>,
    next_id: Mutex<PoemId>,
    writes: AtomicUsize,
}

impl MemoryPoemStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of insert/save/delete calls received, successful or not.
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn collides(rows: &[Poem], title: &str, content: &str, excluding: Option<PoemId>) -> bool {
        rows.iter()
            .any(|p| p.title == title && p.content == content && Some(p.id) != excluding)
    }
}

#[async_trait]
impl PoemStore for MemoryPoemStore {
    async fn find_all(&self) -> Result<Vec<Poem>, AppError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_language(&self, language: &str) -> Result<Vec<Poem>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|p| p.language == language).cloned().collect())
    }

    async fn find_by_id(&self, id: PoemId) -> Result<Option<Poem>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn find_first(&self) -> Result<Option<Poem>, AppError> {
        Ok(self.rows.lock().unwrap().first().cloned())
    }

    async fn exists_by_title_and_content(
        &self,
        title: &str,
        content: &str,
        excluding: Option<PoemId>,
    ) -> Result<bool, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(Self::collides(&rows, title, content, excluding))
    }

    async fn insert(&self, poem: &NewPoem) -> Result<Poem, AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        if Self::collides(&rows, &poem.title, &poem.content, None) {
            return Err(AppError::Conflict(format!("poem '{}' already exists", poem.title)));
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let stored = Poem {
            id: *next_id,
            title: poem.title.clone(),
            poet: poem.poet.clone(),
            poet_en: poem.poet_en.clone(),
            dynasty: poem.dynasty.clone(),
            content: poem.content.clone(),
            translation: poem.translation.clone(),
            language: poem.language.clone(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn save(&self, poem: &Poem) -> Result<Option<Poem>, AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        if Self::collides(&rows, &poem.title, &poem.content, Some(poem.id)) {
            return Err(AppError::Conflict(format!("poem '{}' already exists", poem.title)));
        }
        let Some(slot) = rows.iter_mut().find(|p| p.id == poem.id) else {
            return Ok(None);
        };
        *slot = poem.clone();
        Ok(Some(poem.clone()))
    }

    async fn delete_by_id(&self, id: PoemId) -> Result<bool, AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() != before)
    }
}

/// Skips the existence check so callers race straight into the write-time collision check,
/// as two concurrent requests would against the unique index.
#[derive(Default)]
pub(crate) struct UncheckedMemoryStore(pub(crate) MemoryPoemStore);

#[async_trait]
impl PoemStore for UncheckedMemoryStore {
    async fn find_all(&self) -> Result<Vec<Poem>, AppError> {
        self.0.find_all().await
    }

    async fn find_by_language(&self, language: &str) -> Result<Vec<Poem>, AppError> {
        self.0.find_by_language(language).await
    }

    async fn find_by_id(&self, id: PoemId) -> Result<Option<Poem>, AppError> {
        self.0.find_by_id(id).await
    }

    async fn find_first(&self) -> Result<Option<Poem>, AppError> {
        self.0.find_first().await
    }

    async fn exists_by_title_and_content(
        &self,
        _title: &str,
        _content: &str,
        _excluding: Option<PoemId>,
    ) -> Result<bool, AppError> {
        Ok(false)
    }

    async fn insert(&self, poem: &NewPoem) -> Result<Poem, AppError> {
        self.0.insert(poem).await
    }

    async fn save(&self, poem: &Poem) -> Result<Option<Poem>, AppError> {
        self.0.save(poem).await
    }

    async fn delete_by_id(&self, id: PoemId) -> Result<bool, AppError> {
        self.0.delete_by_id(id).await
    }
}
