use std::sync::Arc;

use ct_core::ports::{PreferenceStoreExt, PreferenceStorePort};
use ct_core::preferences::layout::{LOGIN_STATE_KEY, ONBOARDING_COMPLETED_KEY};
use ct_core::{PreferenceError, PreferenceKey};
use futures::stream::{BoxStream, StreamExt};

/// Durable boolean flag backed by one preference key. An absent key reads
/// as `false`.
#[derive(Clone)]
pub struct FlagStore {
    store: Arc<dyn PreferenceStorePort>,
    key: PreferenceKey<bool>,
}

impl FlagStore {
    pub fn new(store: Arc<dyn PreferenceStorePort>, key: PreferenceKey<bool>) -> Self {
        Self { store, key }
    }

    /// The `user_login_state` flag.
    pub fn login_state(store: Arc<dyn PreferenceStorePort>) -> Self {
        Self::new(store, LOGIN_STATE_KEY)
    }

    /// The `onboarding_completed` flag.
    pub fn onboarding(store: Arc<dyn PreferenceStorePort>) -> Self {
        Self::new(store, ONBOARDING_COMPLETED_KEY)
    }

    pub fn watch(&self) -> BoxStream<'static, Result<bool, PreferenceError>> {
        self.store
            .read(self.key)
            .map(|value| value.map(Option::unwrap_or_default))
            .boxed()
    }

    pub async fn get(&self) -> Result<bool, PreferenceError> {
        Ok(self.store.current(self.key).await?.unwrap_or_default())
    }

    pub async fn set(&self, value: bool) -> Result<(), PreferenceError> {
        self.store.write(self.key, value).await
    }

    /// Flip the flag in one atomic edit and return the new value.
    pub async fn toggle(&self) -> Result<bool, PreferenceError> {
        let key = self.key;
        let committed = self
            .store
            .edit(Box::new(move |prefs| {
                let current = prefs.get(&key)?.unwrap_or_default();
                prefs.set(&key, !current);
                Ok(())
            }))
            .await?;
        Ok(committed.get(&key)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ct_infra::InMemoryPreferenceStore;

    fn flag() -> FlagStore {
        FlagStore::login_state(Arc::new(InMemoryPreferenceStore::new("login")))
    }

    #[tokio::test]
    async fn test_absent_flag_reads_false() {
        assert!(!flag().get().await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_returns_new_value() {
        let flag = flag();
        assert!(flag.toggle().await.unwrap());
        assert!(!flag.toggle().await.unwrap());
        assert!(!flag.get().await.unwrap());
    }

    #[tokio::test]
    async fn test_watch_follows_writes() {
        let flag = flag();
        let mut updates = flag.watch();

        assert!(!updates.next().await.unwrap().unwrap());
        flag.set(true).await.unwrap();
        assert!(updates.next().await.unwrap().unwrap());
    }
}
