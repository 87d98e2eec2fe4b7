use axum::Json;

use crate::dtos::MessageResponse;

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Cozy Herbal Tea API",
    })
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!",
    })
}
