//! Document store adapter.
//!
//! [`DocumentStore`] is the untyped contract a backend fulfils (MongoDB in
//! production, an in-memory map in tests). [`create_document`] and
//! [`get_documents`] sit on top of it and speak in schema types: they stamp
//! audit timestamps on the way in and turn identifiers and the schema's
//! declared date/time fields into strings on the way out, so nothing that is
//! not plain JSON crosses this boundary.

use async_trait::async_trait;
use bson::{Bson, DateTime, Document};
use metrics::counter;
use serde::Serialize;
use serde_json::Value;
use service_core::error::AppError;

pub const ID_FIELD: &str = "_id";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

/// Fields the adapter writes on every insert.
pub const AUDIT_FIELDS: [&str; 2] = [CREATED_AT, UPDATED_AT];

/// Message used whenever an operation reaches a store that never connected.
pub const UNAVAILABLE_MESSAGE: &str = "Database not available";

/// Connection state as seen by the diagnostic endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// No connection settings were supplied.
    Unavailable,
    /// Settings were supplied but the client could not be built.
    Uninitialized,
    Connected,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn status(&self) -> StoreStatus;

    fn database_name(&self) -> Option<&str>;

    /// Append `document` to `collection` and return its identifier.
    async fn insert(&self, collection: &str, document: Document) -> Result<String, AppError>;

    /// Up to `limit` documents whose fields equal every entry of `filter`,
    /// in the store's natural order.
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, AppError>;

    async fn list_collections(&self) -> Result<Vec<String>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;

    /// Release the underlying client. Called once, after the server stops.
    async fn close(&self);
}

/// A schema type persisted in its own collection.
pub trait Record: Serialize + Send + Sync {
    const COLLECTION: &'static str;

    /// Stored fields holding BSON datetimes, rendered as RFC 3339 on read.
    const DATETIME_FIELDS: &'static [&'static str] = &AUDIT_FIELDS;
}

/// Serialize `record`, stamp audit timestamps and insert it.
#[tracing::instrument(skip(store, record), fields(collection = R::COLLECTION))]
pub async fn create_document<R: Record>(
    store: &dyn DocumentStore,
    record: &R,
) -> Result<String, AppError> {
    let mut document = bson::to_document(record)?;
    let now = DateTime::now();
    for field in AUDIT_FIELDS {
        document.insert(field, now);
    }

    let result = store.insert(R::COLLECTION, document).await;

    let outcome = if result.is_ok() { "ok" } else { "error" };
    counter!("store_inserts_total", "collection" => R::COLLECTION, "outcome" => outcome)
        .increment(1);

    match &result {
        Ok(id) => tracing::info!(id = %id, "Document created"),
        Err(e) => tracing::error!(error = %e, "Document insert failed"),
    }

    result
}

/// Fetch up to `limit` documents of `R`'s collection as JSON-safe values.
#[tracing::instrument(skip(store, filter), fields(collection = R::COLLECTION))]
pub async fn get_documents<R: Record>(
    store: &dyn DocumentStore,
    filter: Document,
    limit: i64,
) -> Result<Vec<Value>, AppError> {
    let documents = store.find(R::COLLECTION, filter, limit).await?;

    Ok(documents
        .into_iter()
        .map(|document| to_json(document, R::DATETIME_FIELDS))
        .collect())
}

/// Render a stored document as plain JSON: `_id` and the listed datetime
/// fields become strings, everything else uses relaxed extended JSON.
pub fn to_json(mut document: Document, datetime_fields: &[&str]) -> Value {
    if let Some(id) = document.get(ID_FIELD).map(id_to_string) {
        document.insert(ID_FIELD, id);
    }

    for field in datetime_fields {
        let formatted = match document.get(*field) {
            Some(Bson::DateTime(dt)) => Some(format_datetime(*dt)),
            _ => None,
        };
        if let Some(formatted) = formatted {
            document.insert(*field, formatted);
        }
    }

    Bson::Document(document).into_relaxed_extjson()
}

pub(crate) fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_datetime(dt: DateTime) -> String {
    dt.try_to_rfc3339_string()
        .unwrap_or_else(|_| dt.timestamp_millis().to_string())
}
