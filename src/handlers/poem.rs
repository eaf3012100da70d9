//! Poem handlers: create, list, read, update, delete, translate, health.

use crate::error::AppError;
use crate::model::{PoemId, PoemPayload};
use crate::service::PoemValidator;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    pub language: Option<String>,
}

#[derive(Serialize)]
struct HealthBody {
    database_alive: bool,
}

fn parse_id(id_str: &str) -> Result<PoemId, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

fn parse_payload(body: Value) -> Result<PoemPayload, AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("invalid poem body: {}", e)))
}

/// POST /poem — `?language=` overrides the body's language when non-blank.
pub async fn create(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let mut payload = parse_payload(body)?;
    if let Some(language) = query.language.filter(|l| !l.trim().is_empty()) {
        payload.language = Some(language);
    }
    let draft = PoemValidator::validate(payload)?;
    let poem = state.poems.add_poem(draft).await?;
    Ok((StatusCode::CREATED, Json(poem)))
}

/// GET /poem — every poem, or only those in `?language=`.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let poems = match query.language {
        Some(language) => state.poems.get_poems_by_language(&language).await?,
        None => state.poems.get_all_poems().await?,
    };
    Ok(Json(poems))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let poem = state
        .poems
        .get_poem_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("poem {}", id)))?;
    Ok(Json(poem))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let draft = PoemValidator::validate(parse_payload(body)?)?;
    let poem = state.poems.update_poem_by_id(id, &draft).await?;
    Ok(Json(poem))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !state.poems.delete_poem_by_id(id).await? {
        return Err(AppError::NotFound(format!("poem {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /poem/translate/:id
pub async fn translate(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let poem = state
        .poems
        .translate_poem(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("poem {}", id)))?;
    Ok(Json(poem))
}

/// GET /poem/health — whether at least one poem can be read.
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let database_alive = state.poems.is_db_alive().await?;
    Ok(Json(HealthBody { database_alive }))
}
