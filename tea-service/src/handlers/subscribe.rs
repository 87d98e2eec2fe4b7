use axum::{extract::State, http::StatusCode, Json};
use service_core::error::AppError;

use crate::dtos::{CreatedResponse, SubscribeRequest};
use crate::models::Subscriber;
use crate::services::create_document;
use crate::startup::AppState;
use crate::utils::ValidatedJson;

#[tracing::instrument(skip_all)]
pub async fn subscribe(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubscribeRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let subscriber = Subscriber::from(request);
    let id = create_document(state.store.as_ref(), &subscriber).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
