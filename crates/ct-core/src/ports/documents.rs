//! Remote document store port.
//!
//! Documents are addressed by `(collection, id)` and carried as JSON values.
//! `set_document` replaces the whole document; there is no merge and no
//! version check.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::ports::errors::RemoteError;

/// Collection holding one profile document per user id.
pub const USERS_COLLECTION: &str = "users";

#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    async fn get_document(&self, collection: &str, id: &str)
        -> Result<Option<Value>, RemoteError>;

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        document: Value,
    ) -> Result<(), RemoteError>;

    async fn list_documents(&self, collection: &str) -> Result<Vec<Value>, RemoteError>;
}

/// Typed helpers over [`DocumentStorePort`].
#[async_trait]
pub trait DocumentStoreExt: DocumentStorePort {
    async fn get_as<T>(&self, collection: &str, id: &str) -> Result<Option<T>, RemoteError>
    where
        T: DeserializeOwned + Send,
    {
        match self.get_document(collection, id).await? {
            None => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                RemoteError::InvalidDocument(format!("{collection}/{id}: {e}"))
            }),
        }
    }

    async fn set_from<T>(&self, collection: &str, id: &str, document: &T) -> Result<(), RemoteError>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(document)
            .map_err(|e| RemoteError::InvalidDocument(format!("{collection}/{id}: {e}")))?;
        self.set_document(collection, id, value).await
    }

    async fn list_as<T>(&self, collection: &str) -> Result<Vec<T>, RemoteError>
    where
        T: DeserializeOwned + Send,
    {
        self.list_documents(collection)
            .await?
            .into_iter()
            .map(|value| {
                serde_json::from_value(value)
                    .map_err(|e| RemoteError::InvalidDocument(format!("{collection}: {e}")))
            })
            .collect()
    }
}

impl<S: DocumentStorePort + ?Sized> DocumentStoreExt for S {}
