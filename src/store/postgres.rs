//! `PoemStore` over a PostgreSQL pool.

use super::{PoemStore, POEMS_TABLE};
use crate::error::AppError;
use crate::model::{NewPoem, Poem, PoemId};
use async_trait::async_trait;
use sqlx::PgPool;

const COLUMNS: &str = "id, title, poet, poet_en, dynasty, content, translation, language";

#[derive(Clone)]
pub struct PgPoemStore {
    pool: PgPool,
}

impl PgPoemStore {
    pub fn new(pool: PgPool) -> Self {
        PgPoemStore { pool }
    }

    async fn select_many(
        &self,
        sql: &str,
        language: Option<&str>,
    ) -> Result<Vec<Poem>, AppError> {
        tracing::debug!(sql = %sql, "query");
        let mut query = sqlx::query_as::<_, Poem>(sql);
        if let Some(language) = language {
            query = query.bind(language);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

/// A unique-index violation means another writer stored the same `(title, content)`
/// first.
fn map_write_error(e: sqlx::Error, title: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            tracing::info!(title = %title, "unique index rejected duplicate poem");
            AppError::Conflict(format!("poem '{}' with identical content already exists", title))
        }
        _ => AppError::Db(e),
    }
}

#[async_trait]
impl PoemStore for PgPoemStore {
    async fn find_all(&self) -> Result<Vec<Poem>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, POEMS_TABLE);
        self.select_many(&sql, None).await
    }

    async fn find_by_language(&self, language: &str) -> Result<Vec<Poem>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE language = $1 ORDER BY id",
            COLUMNS, POEMS_TABLE
        );
        self.select_many(&sql, Some(language)).await
    }

    async fn find_by_id(&self, id: PoemId) -> Result<Option<Poem>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, POEMS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Poem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_first(&self) -> Result<Option<Poem>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id LIMIT 1", COLUMNS, POEMS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Poem>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn exists_by_title_and_content(
        &self,
        title: &str,
        content: &str,
        excluding: Option<PoemId>,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE title = $1 AND content = $2 \
             AND ($3::INT IS NULL OR id <> $3))",
            POEMS_TABLE
        );
        tracing::debug!(sql = %sql, excluding = ?excluding, "query");
        let exists: (bool,) = sqlx::query_as(&sql)
            .bind(title)
            .bind(content)
            .bind(excluding)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn insert(&self, poem: &NewPoem) -> Result<Poem, AppError> {
        let sql = format!(
            "INSERT INTO {} (title, poet, poet_en, dynasty, content, translation, language) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            POEMS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as::<_, Poem>(&sql)
            .bind(&poem.title)
            .bind(&poem.poet)
            .bind(&poem.poet_en)
            .bind(&poem.dynasty)
            .bind(&poem.content)
            .bind(&poem.translation)
            .bind(&poem.language)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &poem.title))
    }

    async fn save(&self, poem: &Poem) -> Result<Option<Poem>, AppError> {
        let sql = format!(
            "UPDATE {} SET title = $2, poet = $3, poet_en = $4, dynasty = $5, content = $6, \
             translation = $7, language = $8 WHERE id = $1 RETURNING {}",
            POEMS_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, id = poem.id, "query");
        sqlx::query_as::<_, Poem>(&sql)
            .bind(poem.id)
            .bind(&poem.title)
            .bind(&poem.poet)
            .bind(&poem.poet_en)
            .bind(&poem.dynasty)
            .bind(&poem.content)
            .bind(&poem.translation)
            .bind(&poem.language)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &poem.title))
    }

    async fn delete_by_id(&self, id: PoemId) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", POEMS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
