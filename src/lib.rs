//! Poetry API: poem catalogue REST backend over PostgreSQL with optional Gemini translation.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod translate;

pub use config::{GeminiConfig, ServerConfig};
pub use error::{AppError, ConfigError};
pub use model::{NewPoem, Poem, PoemDraft, PoemId, PoemPayload, DEFAULT_LANGUAGE};
pub use routes::{app, common_routes, poem_routes, API_PREFIX};
pub use service::{PoemAccess, PoemService, PoemValidator};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_poem_table, PgPoemStore, PoemStore};
pub use translate::{GeminiTranslator, TranslateError, Translator};
