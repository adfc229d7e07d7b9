use std::sync::Arc;

use ct_core::ports::{PreferenceStoreExt, PreferenceStorePort};
use ct_core::preferences::layout::USER_KEY;
use ct_core::{PreferenceError, User};
use futures::stream::{BoxStream, StreamExt};

/// The locally cached profile, stored as one JSON string.
///
/// An absent or empty value means no user is cached. A value that does not
/// decode is reported as [`PreferenceError::Decode`], not masked.
#[derive(Clone)]
pub struct UserCache {
    store: Arc<dyn PreferenceStorePort>,
}

fn decode(raw: Option<String>) -> Result<Option<User>, PreferenceError> {
    match raw {
        None => Ok(None),
        Some(json) if json.is_empty() => Ok(None),
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| PreferenceError::Decode {
                key: USER_KEY.name().to_string(),
                reason: e.to_string(),
            }),
    }
}

impl UserCache {
    pub fn new(store: Arc<dyn PreferenceStorePort>) -> Self {
        Self { store }
    }

    pub fn watch(&self) -> BoxStream<'static, Result<Option<User>, PreferenceError>> {
        self.store
            .read(USER_KEY)
            .map(|raw| raw.and_then(decode))
            .boxed()
    }

    pub async fn get(&self) -> Result<Option<User>, PreferenceError> {
        decode(self.store.current(USER_KEY).await?)
    }

    pub async fn save(&self, user: &User) -> Result<(), PreferenceError> {
        let json = serde_json::to_string(user).map_err(|e| PreferenceError::Write {
            namespace: self.store.namespace().to_string(),
            reason: e.to_string(),
        })?;
        self.store.write(USER_KEY, json).await
    }

    /// Drop the whole namespace, not just the user key.
    pub async fn clear(&self) -> Result<(), PreferenceError> {
        self.store.clear().await
    }
}
