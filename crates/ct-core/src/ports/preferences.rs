//! Session store port.
//!
//! One implementation instance serves one namespace. Writes go through
//! [`PreferenceStorePort::edit`], which implementations serialize per
//! namespace and make durable before returning; readers only ever observe
//! committed snapshots.

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};

use crate::preferences::{
    recover_storage_faults, PreferenceError, PreferenceKey, PreferenceStream, PreferenceType,
    Preferences,
};

/// Read-modify-write step applied under the namespace write lock. Returning
/// an error aborts the edit without persisting anything.
pub type PreferenceTransform =
    Box<dyn FnOnce(&mut Preferences) -> Result<(), PreferenceError> + Send>;

#[async_trait]
pub trait PreferenceStorePort: Send + Sync {
    fn namespace(&self) -> &str;

    /// Current snapshot on subscribe, then one snapshot per committed edit.
    /// Storage faults surface as `Err` items.
    fn data(&self) -> PreferenceStream;

    /// Apply `transform` atomically and return the committed snapshot.
    async fn edit(&self, transform: PreferenceTransform) -> Result<Preferences, PreferenceError>;

    /// Remove every key in the namespace.
    async fn clear(&self) -> Result<(), PreferenceError>;
}

/// Typed helpers over [`PreferenceStorePort`].
#[async_trait]
pub trait PreferenceStoreExt: PreferenceStorePort {
    /// Follow one key. Storage faults read as an absent key.
    fn read<T>(
        &self,
        key: PreferenceKey<T>,
    ) -> BoxStream<'static, Result<Option<T>, PreferenceError>>
    where
        T: PreferenceType + Send + 'static,
    {
        recover_storage_faults(self.namespace(), self.data())
            .map(move |snapshot| snapshot.and_then(|prefs| prefs.get(&key)))
            .boxed()
    }

    /// First value of [`PreferenceStoreExt::read`].
    async fn current<T>(&self, key: PreferenceKey<T>) -> Result<Option<T>, PreferenceError>
    where
        T: PreferenceType + Send + 'static,
    {
        self.read(key).next().await.unwrap_or(Ok(None))
    }

    async fn write<T>(&self, key: PreferenceKey<T>, value: T) -> Result<(), PreferenceError>
    where
        T: PreferenceType + Send + 'static,
    {
        self.edit(Box::new(move |prefs| {
            prefs.set(&key, value);
            Ok(())
        }))
        .await
        .map(|_| ())
    }

    async fn remove<T>(&self, key: PreferenceKey<T>) -> Result<(), PreferenceError>
    where
        T: Send + 'static,
    {
        self.edit(Box::new(move |prefs| {
            prefs.remove(&key);
            Ok(())
        }))
        .await
        .map(|_| ())
    }
}

impl<S: PreferenceStorePort + ?Sized> PreferenceStoreExt for S {}
