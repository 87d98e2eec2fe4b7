use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::doc;
use serde_json::Value;
use service_core::error::AppError;

use super::list_limit;
use crate::dtos::{CreatedResponse, ListParams};
use crate::models::TeaBlend;
use crate::services::{create_document, get_documents};
use crate::startup::AppState;
use crate::utils::ValidatedJson;

const MAX_BLEND_LIMIT: i64 = 20;

#[tracing::instrument(skip_all)]
pub async fn list_blends(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Value>>, AppError> {
    let limit = list_limit(query, MAX_BLEND_LIMIT)?;
    let blends = get_documents::<TeaBlend>(state.store.as_ref(), doc! {}, limit).await?;
    Ok(Json(blends))
}

#[tracing::instrument(skip_all)]
pub async fn create_blend(
    State(state): State<AppState>,
    ValidatedJson(blend): ValidatedJson<TeaBlend>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = create_document(state.store.as_ref(), &blend).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
