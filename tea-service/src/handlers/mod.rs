pub mod blends;
pub mod diagnostics;
pub mod health;
pub mod root;
pub mod subscribe;
pub mod testimonials;

pub use blends::{create_blend, list_blends};
pub use diagnostics::{schema, test_database};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use root::{hello, root};
pub use subscribe::subscribe;
pub use testimonials::{create_testimonial, list_testimonials};

use axum::extract::{rejection::QueryRejection, Query};
use service_core::error::AppError;

use crate::dtos::ListParams;

/// Resolve `?limit=` against a per-collection default and maximum.
pub(crate) fn list_limit(
    query: Result<Query<ListParams>, QueryRejection>,
    max: i64,
) -> Result<i64, AppError> {
    let Query(params) = query.map_err(|e| AppError::InvalidPayload(e.body_text()))?;
    Ok(params.resolve_limit(max))
}
