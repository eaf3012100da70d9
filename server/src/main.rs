//! Poetry API server: reads config from env (and `.env`), ensures the poems table, serves the API.
//!
//! Run from repo root: `cargo run -p poetry-server`

use poetry_api::{
    app,
    ensure_database_exists,
    ensure_poem_table,
    AppState,
    GeminiTranslator,
    PgPoemStore,
    PoemService,
    ServerConfig,
    Translator,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("poetry_api=info,tower_http=info")
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(?config, "starting");

    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    ensure_poem_table(&pool).await?;

    let translator: Option<Arc<dyn Translator>> = match &config.gemini {
        Some(g) => Some(Arc::new(GeminiTranslator::new(
            g.api_key.clone(),
            g.base_url.clone(),
            g.model.clone(),
            g.timeout,
        ))),
        None => {
            tracing::warn!(
                "GEMINI_API_KEY not set; translation requests will leave poems untranslated"
            );
            None
        }
    };

    let state = AppState {
        poems: PoemService::new(Arc::new(PgPoemStore::new(pool)), translator),
    };

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, &config)).await?;
    Ok(())
}
