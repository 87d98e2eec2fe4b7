//! Read-only introspection. Nothing here returns an error status: store
//! failures are folded into the payload so dashboards always get a body.

use axum::{extract::State, Json};
use service_core::error::{truncate_message, AppError};

use crate::dtos::{DiagnosticsResponse, SchemaResponse};
use crate::models::API_COLLECTIONS;
use crate::services::StoreStatus;
use crate::startup::AppState;

const MAX_LISTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

fn set_marker(is_set: bool) -> String {
    let marker = if is_set { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}

#[tracing::instrument(skip_all)]
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let store = state.store.as_ref();

    let mut database = "❌ Not Available".to_string();
    let mut connection_status = "Not Connected".to_string();
    let mut collections = Vec::new();

    match store.status() {
        StoreStatus::Unavailable => {}
        StoreStatus::Uninitialized => {
            database = "⚠️  Available but not initialized".to_string();
        }
        StoreStatus::Connected => {
            connection_status = "Connected".to_string();
            match store.list_collections().await {
                Ok(mut names) => {
                    names.truncate(MAX_LISTED_COLLECTIONS);
                    collections = names;
                    database = "✅ Connected & Working".to_string();
                }
                Err(e) => {
                    let message = match e {
                        AppError::StoreError(msg) => msg,
                        other => other.to_string(),
                    };
                    tracing::warn!(error = %message, "Listing collections failed");
                    database = format!(
                        "⚠️  Connected but Error: {}",
                        truncate_message(&message, MAX_ERROR_CHARS)
                    );
                }
            }
        }
    }

    Json(DiagnosticsResponse {
        backend: "✅ Running".to_string(),
        database,
        database_url: set_marker(state.config.database_url_set()),
        database_name: set_marker(state.config.database_name_set()),
        connection_status,
        collections,
    })
}

pub async fn schema() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        collections: API_COLLECTIONS.to_vec(),
    })
}
