use async_trait::async_trait;
use ct_core::ports::{PreferenceStorePort, PreferenceTransform};
use ct_core::preferences::{PreferenceError, PreferenceStream, Preferences};
use ct_core::BroadcastCell;
use futures::StreamExt;
use tokio::sync::Mutex;

/// Process-local store. Survives nothing; used for ephemeral sessions and
/// tests.
pub struct InMemoryPreferenceStore {
    namespace: String,
    cell: BroadcastCell<Preferences>,
    write_lock: Mutex<()>,
}

impl InMemoryPreferenceStore {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_preferences(namespace, Preferences::default())
    }

    pub fn with_preferences(namespace: impl Into<String>, preferences: Preferences) -> Self {
        Self {
            namespace: namespace.into(),
            cell: BroadcastCell::new(preferences),
            write_lock: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> Preferences {
        self.cell.current()
    }
}

#[async_trait]
impl PreferenceStorePort for InMemoryPreferenceStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn data(&self) -> PreferenceStream {
        self.cell.subscribe().map(Ok).boxed()
    }

    async fn edit(&self, transform: PreferenceTransform) -> Result<Preferences, PreferenceError> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.cell.current();
        transform(&mut next)?;
        self.cell.publish(next.clone());
        Ok(next)
    }

    async fn clear(&self) -> Result<(), PreferenceError> {
        let _guard = self.write_lock.lock().await;
        self.cell.publish(Preferences::default());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ct_core::ports::PreferenceStoreExt;
    use ct_core::PreferenceKey;

    const FLAG: PreferenceKey<bool> = PreferenceKey::new("flag");

    #[tokio::test]
    async fn test_failed_transform_leaves_state_untouched() {
        let store = InMemoryPreferenceStore::new("ns");
        store.write(FLAG, true).await.unwrap();

        let result = store
            .edit(Box::new(|prefs| {
                prefs.set(&FLAG, false);
                Err(PreferenceError::Decode {
                    key: "flag".to_string(),
                    reason: "rejected".to_string(),
                })
            }))
            .await;

        assert!(result.is_err());
        assert_eq!(store.current(FLAG).await.unwrap(), Some(true));
    }

    #[tokio::test]
    async fn test_reader_follows_writes() {
        let store = InMemoryPreferenceStore::new("ns");
        let mut reader = store.read(FLAG);

        assert_eq!(reader.next().await.unwrap().unwrap(), None);
        store.write(FLAG, true).await.unwrap();
        assert_eq!(reader.next().await.unwrap().unwrap(), Some(true));
        store.clear().await.unwrap();
        assert_eq!(reader.next().await.unwrap().unwrap(), None);
    }
}
