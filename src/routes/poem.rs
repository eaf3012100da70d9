//! Poem routes. Static segments (`health`, `translate`) take precedence over `:id`.

use crate::handlers::poem::{
    create, delete as delete_handler, health, list, read, translate, update,
};
use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

pub fn poem_routes(state: AppState) -> Router {
    Router::new()
        .route("/poem", get(list).post(create))
        .route("/poem/health", get(health))
        .route("/poem/translate/:id", put(translate))
        .route("/poem/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}
