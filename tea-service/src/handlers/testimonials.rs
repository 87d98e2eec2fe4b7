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
use crate::models::Testimonial;
use crate::services::{create_document, get_documents};
use crate::startup::AppState;
use crate::utils::ValidatedJson;

const MAX_TESTIMONIAL_LIMIT: i64 = 10;

#[tracing::instrument(skip_all)]
pub async fn list_testimonials(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Value>>, AppError> {
    let limit = list_limit(query, MAX_TESTIMONIAL_LIMIT)?;
    let testimonials =
        get_documents::<Testimonial>(state.store.as_ref(), doc! {}, limit).await?;
    Ok(Json(testimonials))
}

#[tracing::instrument(skip_all)]
pub async fn create_testimonial(
    State(state): State<AppState>,
    ValidatedJson(testimonial): ValidatedJson<Testimonial>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = create_document(state.store.as_ref(), &testimonial).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
