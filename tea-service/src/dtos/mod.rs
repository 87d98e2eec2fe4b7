use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::subscriber::validate_email_domain;
use crate::models::Subscriber;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

impl ListParams {
    /// Requested limit capped at `max`. `max` doubles as the default, and a
    /// non-positive request means "no limit", so it also resolves to `max`.
    pub fn resolve_limit(&self, max: i64) -> i64 {
        match self.limit {
            Some(limit) if limit > 0 => limit.min(max),
            _ => max,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email(message = "Invalid email address"))]
    #[validate(custom(function = "validate_email_domain", message = "Invalid email address"))]
    pub email: String,
    pub name: Option<String>,
    pub interests: Option<Vec<String>>,
}

impl From<SubscribeRequest> for Subscriber {
    fn from(request: SubscribeRequest) -> Self {
        Subscriber {
            email: request.email,
            name: request.name.filter(|name| !name.is_empty()),
            interests: request.interests.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub collections: Vec<&'static str>,
}
