use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, FindOptions},
    Client as MongoClient, Database,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use std::time::Duration;

use super::store::{id_to_string, DocumentStore, StoreStatus, UNAVAILABLE_MESSAGE};
use crate::config::DatabaseConfig;

enum Handle {
    Unconfigured,
    Failed(String),
    Ready { client: MongoClient, db: Database },
}

/// MongoDB-backed store. One client is shared by every request; the driver
/// pools connections internally.
pub struct MongoStore {
    handle: Handle,
    name: Option<String>,
}

impl MongoStore {
    /// Build the store from `config`. Never fails: missing settings leave it
    /// unavailable, a client that cannot be built leaves it uninitialized.
    /// The driver connects lazily, so no server round-trip happens here.
    pub async fn connect(config: &DatabaseConfig) -> Self {
        let name = config.name.clone();

        let (Some(url), Some(database)) = (config.url.as_ref(), config.name.as_deref()) else {
            tracing::warn!("DATABASE_URL or DATABASE_NAME not set; document store unavailable");
            return Self {
                handle: Handle::Unconfigured,
                name,
            };
        };

        let handle = match build_client(url.expose_secret(), config.server_selection_timeout())
            .await
        {
            Ok(client) => {
                let db = client.database(database);
                tracing::info!(database = %database, "MongoDB client initialized");
                Handle::Ready { client, db }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize MongoDB client");
                Handle::Failed(e.to_string())
            }
        };

        Self { handle, name }
    }

    /// Why the client could not be built, if it could not.
    pub fn init_error(&self) -> Option<&str> {
        match &self.handle {
            Handle::Failed(reason) => Some(reason.as_str()),
            _ => None,
        }
    }

    fn db(&self) -> Result<&Database, AppError> {
        match &self.handle {
            Handle::Ready { db, .. } => Ok(db),
            Handle::Unconfigured => Err(AppError::store(UNAVAILABLE_MESSAGE)),
            Handle::Failed(reason) => Err(AppError::store(format!(
                "{}: {}",
                UNAVAILABLE_MESSAGE, reason
            ))),
        }
    }
}

async fn build_client(
    uri: &str,
    server_selection_timeout: Duration,
) -> Result<MongoClient, mongodb::error::Error> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some("tea-service".to_string());
    options.server_selection_timeout = Some(server_selection_timeout);
    MongoClient::with_options(options)
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn status(&self) -> StoreStatus {
        match self.handle {
            Handle::Unconfigured => StoreStatus::Unavailable,
            Handle::Failed(_) => StoreStatus::Uninitialized,
            Handle::Ready { .. } => StoreStatus::Connected,
        }
    }

    fn database_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<String, AppError> {
        let result = self
            .db()?
            .collection::<Document>(collection)
            .insert_one(document, None)
            .await
            .map_err(|e| {
                tracing::error!(collection = %collection, "MongoDB insert failed: {}", e);
                AppError::from(e)
            })?;

        Ok(id_to_string(&result.inserted_id))
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, AppError> {
        let find_options = FindOptions::builder().limit(limit).build();

        let mut cursor = self
            .db()?
            .collection::<Document>(collection)
            .find(filter, find_options)
            .await
            .map_err(|e| {
                tracing::error!(collection = %collection, "MongoDB find failed: {}", e);
                AppError::from(e)
            })?;

        let mut documents = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(AppError::from)? {
            documents.push(document);
        }

        Ok(documents)
    }

    async fn list_collections(&self) -> Result<Vec<String>, AppError> {
        Ok(self.db()?.list_collection_names(None).await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        match &self.handle {
            Handle::Ready { client, .. } => {
                client
                    .database("admin")
                    .run_command(doc! { "ping": 1 }, None)
                    .await
                    .map_err(|e| {
                        tracing::error!("MongoDB health check failed: {}", e);
                        AppError::from(e)
                    })?;
                Ok(())
            }
            _ => self.db().map(|_| ()),
        }
    }

    async fn close(&self) {
        if let Handle::Ready { client, .. } = &self.handle {
            client.clone().shutdown().await;
            tracing::info!("MongoDB client shut down");
        }
    }
}
