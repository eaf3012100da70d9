//! Record store for `all_poems`: the `PoemStore` seam, table DDL and database bootstrap.

mod postgres;
#[cfg(test)]
pub(crate) mod memory;

pub use postgres::PgPoemStore;

use crate::error::AppError;
use crate::model::{NewPoem, Poem, PoemId};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

pub const POEMS_TABLE: &str = "all_poems";

/// Query surface of the poems table. Implementations report a `(title, content)` collision on
/// `insert`/`save` as `AppError::Conflict`.
#[async_trait]
pub trait PoemStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Poem>, AppError>;

    async fn find_by_language(&self, language: &str) -> Result<Vec<Poem>, AppError>;

    async fn find_by_id(&self, id: PoemId) -> Result<Option<Poem>, AppError>;

    /// Any one record, lowest id first.
    async fn find_first(&self) -> Result<Option<Poem>, AppError>;

    /// Whether a record with exactly this title and content exists, ignoring `excluding` if
    /// given.
    async fn exists_by_title_and_content(
        &self,
        title: &str,
        content: &str,
        excluding: Option<PoemId>,
    ) -> Result<bool, AppError>;

    async fn insert(&self, poem: &NewPoem) -> Result<Poem, AppError>;

    /// Overwrite every column of the row with `poem.id`. Returns `None` if the row is gone.
    async fn save(&self, poem: &Poem) -> Result<Option<Poem>, AppError>;

    /// Returns true if a row was deleted.
    async fn delete_by_id(&self, id: PoemId) -> Result<bool, AppError>;
}

/// Create `all_poems` and its `(title, content)` unique index if missing.
/// The index hashes both columns so long poems stay under the btree row limit.
pub async fn ensure_poem_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            poet TEXT NOT NULL,
            poet_en TEXT,
            dynasty TEXT,
            content TEXT NOT NULL,
            translation TEXT,
            language TEXT NOT NULL DEFAULT 'en'
        )
        "#,
        POEMS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;

    if let Err(e) = sqlx::query(&unique_index_sql()).execute(pool).await {
        // Existing duplicate rows block the index; the access layer check still applies.
        tracing::error!(
            table = POEMS_TABLE,
            index = UNIQUE_INDEX,
            error = %e,
            "could not create unique (title, content) index; concurrent duplicates are possible"
        );
    }
    Ok(())
}

const UNIQUE_INDEX: &str = "all_poems_title_content_key";

fn unique_index_sql() -> String {
    format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} (md5(title), md5(content))",
        UNIQUE_INDEX, POEMS_TABLE
    )
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::Db)?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let slash = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?;
    let path_start = slash + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
