use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use orthocheck_core::{Category, SpellCheckRecord, TextVerdict, WordCheck};

use crate::server::AppState;
use crate::service::ServiceError;

const CATEGORY: &str = "category";
const SPELL_CHECK: &str = "spell check record";

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

#[derive(Deserialize)]
pub struct CheckParams {
    text: String,
}

/// Response shape of `GET /check`: every classified word lands under the
/// `errors` key, the correctly spelled ones included.
#[derive(Serialize)]
pub struct CheckResponse {
    errors: Vec<WordCheck>,
}

#[derive(Deserialize)]
pub struct BulkCheckRequest {
    texts: Vec<String>,
}

#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    status: String,
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "Orthocheck Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

pub async fn metrics() -> impl IntoResponse {
    match crate::metrics::render_metrics() {
        Some(body) => (StatusCode::OK, body).into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": {"code": "metrics-unavailable", "message": "metrics recorder not installed"}})),
        )
            .into_response(),
    }
}

// ---- Spelling checks ----

pub async fn check_text(
    State(state): State<AppState>,
    Query(params): Query<CheckParams>,
) -> Result<Json<CheckResponse>, ServiceError> {
    let errors = state.orchestrator.process_text(&params.text).await?;
    Ok(Json(CheckResponse { errors }))
}

pub async fn check_bulk(
    State(state): State<AppState>,
    Json(request): Json<BulkCheckRequest>,
) -> Result<Json<Vec<TextVerdict>>, ServiceError> {
    let verdicts = state.orchestrator.process_bulk(&request.texts).await?;
    Ok(Json(verdicts))
}

// ---- Categories ----

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ServiceError> {
    Ok(Json(state.categories.get_all().await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, ServiceError> {
    match state.categories.get_by_id(id).await? {
        Some(category) => Ok(Json(category)),
        None => Err(ServiceError::not_found(CATEGORY, id)),
    }
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(category): Json<Category>,
) -> Result<(StatusCode, Json<Category>), ServiceError> {
    let saved = state.categories.save(category).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(category): Json<Category>,
) -> Result<Json<Category>, ServiceError> {
    Ok(Json(state.categories.update(id, category).await?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServiceError> {
    state.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Records carrying the category resolved by id. Unlike the list endpoints
/// this resolves the id first, so an unknown category answers 404 instead
/// of an empty list.
pub async fn category_spell_checks(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<SpellCheckRecord>>, ServiceError> {
    let category = state
        .categories
        .get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(CATEGORY, id))?;
    Ok(Json(
        state.spell_checks.records_for_category(&category.name).await?,
    ))
}

pub async fn update_category_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Category>, ServiceError> {
    Ok(Json(
        state.categories.update_status(id, request.status).await?,
    ))
}

pub async fn clear_category_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>, ServiceError> {
    Ok(Json(state.categories.clear_status(id).await?))
}

// ---- Spell-check records ----

pub async fn list_spell_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpellCheckRecord>>, ServiceError> {
    Ok(Json(state.spell_checks.get_all().await?))
}

pub async fn get_spell_check(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SpellCheckRecord>, ServiceError> {
    match state.spell_checks.get_by_id(id).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ServiceError::not_found(SPELL_CHECK, id)),
    }
}

pub async fn create_spell_check(
    State(state): State<AppState>,
    Json(record): Json<SpellCheckRecord>,
) -> Result<(StatusCode, Json<SpellCheckRecord>), ServiceError> {
    let saved = state.spell_checks.save(record).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn update_spell_check(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(record): Json<SpellCheckRecord>,
) -> Result<Json<SpellCheckRecord>, ServiceError> {
    Ok(Json(state.spell_checks.update(id, record).await?))
}

pub async fn delete_spell_check(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServiceError> {
    state.spell_checks.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn attach_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(i64, i64)>,
) -> Result<Json<SpellCheckRecord>, ServiceError> {
    Ok(Json(
        state.spell_checks.attach_category(id, category_id).await?,
    ))
}

pub async fn detach_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(i64, i64)>,
) -> Result<Json<SpellCheckRecord>, ServiceError> {
    Ok(Json(
        state.spell_checks.detach_category(id, category_id).await?,
    ))
}

// ---- Request counter ----

pub async fn counter(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.counter.snapshot())
}
