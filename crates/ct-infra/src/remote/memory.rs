//! In-process user service.
//!
//! Implements both remote ports against process memory with the same
//! observable rules as the hosted backend: unique emails, a six character
//! password minimum, opaque generated user ids and whole-document overwrite.
//! A service opened over a file mirrors every accepted change to it, so
//! accounts and documents outlive the process.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ct_core::ports::{AuthOutcome, AuthPort, DocumentStorePort, RemoteError};
use ct_core::UserId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use super::password::PasswordHash;
use crate::fs::write_atomic;

pub const MIN_PASSWORD_LEN: usize = 6;

/// File name used under the local remote directory.
pub const LOCAL_USERS_FILE: &str = "users.json";

#[derive(Clone, Serialize, Deserialize)]
struct Account {
    user_id: UserId,
    password: PasswordHash,
}

type Collections = HashMap<String, BTreeMap<String, Value>>;

#[derive(Default, Serialize, Deserialize)]
struct State {
    // Keyed by normalized (trimmed, lowercased) email.
    #[serde(default)]
    accounts: HashMap<String, Account>,
    #[serde(default)]
    documents: Collections,
}

#[derive(Default)]
pub struct InMemoryUserService {
    state: RwLock<State>,
    backing_file: Option<PathBuf>,
}

fn collections(documents: impl IntoIterator<Item = (String, String, Value)>) -> Collections {
    let mut collections = Collections::new();
    for (collection, id, document) in documents {
        collections.entry(collection).or_default().insert(id, document);
    }
    collections
}

impl InMemoryUserService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Service pre-populated with documents, e.g. catalog collections.
    pub fn with_documents(documents: impl IntoIterator<Item = (String, String, Value)>) -> Self {
        Self {
            state: RwLock::new(State {
                accounts: HashMap::new(),
                documents: collections(documents),
            }),
            backing_file: None,
        }
    }

    /// Service persisted at `path`. A missing or empty file starts empty.
    /// `seed` documents are added where the file has no document with the
    /// same collection and id.
    pub async fn open(
        path: impl Into<PathBuf>,
        seed: impl IntoIterator<Item = (String, String, Value)>,
    ) -> Result<Self, RemoteError> {
        let path = path.into();
        let mut state = read_state(&path).await?;
        for (collection, docs) in collections(seed) {
            let existing = state.documents.entry(collection).or_default();
            for (id, document) in docs {
                existing.entry(id).or_insert(document);
            }
        }

        debug!(
            path = %path.display(),
            accounts = state.accounts.len(),
            "local user service opened"
        );
        Ok(Self {
            state: RwLock::new(state),
            backing_file: Some(path),
        })
    }

    /// Drop a document. Returns whether it existed.
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<bool, RemoteError> {
        let mut state = self.state.write().await;
        let Some(removed) = state
            .documents
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
        else {
            return Ok(false);
        };

        if let Err(err) = self.persist(&state).await {
            if let Some(docs) = state.documents.get_mut(collection) {
                docs.insert(id.to_string(), removed);
            }
            return Err(err);
        }
        Ok(true)
    }

    pub async fn account_count(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    async fn persist(&self, state: &State) -> Result<(), RemoteError> {
        let Some(path) = &self.backing_file else {
            return Ok(());
        };
        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| RemoteError::Service(format!("serialize local users: {e}")))?;
        write_atomic(path, &json)
            .await
            .map_err(|e| RemoteError::Service(format!("write {}: {e}", path.display())))
    }
}

async fn read_state(path: &Path) -> Result<State, RemoteError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(State::default()),
        Err(e) => {
            return Err(RemoteError::Service(format!(
                "read {}: {e}",
                path.display()
            )))
        }
    };
    if content.trim().is_empty() {
        return Ok(State::default());
    }
    serde_json::from_str(&content)
        .map_err(|e| RemoteError::Service(format!("parse {}: {e}", path.display())))
}

fn normalize_email(email: &str) -> Result<String, RemoteError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(RemoteError::Auth("INVALID_EMAIL".to_string()));
    }
    Ok(email)
}

/// Argon2id is CPU and memory heavy; keep it off the async workers.
async fn hash_off_runtime<T, F>(work: F) -> Result<T, RemoteError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, String> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| RemoteError::Service(format!("password hashing task failed: {e}")))?
        .map_err(RemoteError::Service)
}

#[async_trait]
impl AuthPort for InMemoryUserService {
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, RemoteError> {
        let email = normalize_email(email)?;
        let account = self
            .state
            .read()
            .await
            .accounts
            .get(&email)
            .cloned()
            .ok_or_else(|| RemoteError::Auth("INVALID_LOGIN_CREDENTIALS".to_string()))?;

        let password = password.to_string();
        let stored = account.password.clone();
        let matches = hash_off_runtime(move || stored.verify(&password)).await?;
        if !matches {
            return Err(RemoteError::Auth("INVALID_LOGIN_CREDENTIALS".to_string()));
        }

        Ok(AuthOutcome::with_user(account.user_id))
    }

    async fn create_user_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, RemoteError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RemoteError::Auth(format!(
                "WEAK_PASSWORD : Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let password = password.to_string();
        let password = hash_off_runtime(move || PasswordHash::create(&password)).await?;

        let mut state = self.state.write().await;
        if state.accounts.contains_key(&email) {
            return Err(RemoteError::Conflict("EMAIL_EXISTS".to_string()));
        }

        let user_id = UserId::generate();
        state.accounts.insert(
            email.clone(),
            Account {
                user_id: user_id.clone(),
                password,
            },
        );
        if let Err(err) = self.persist(&state).await {
            state.accounts.remove(&email);
            return Err(err);
        }
        debug!(user_id = %user_id, "account created");

        Ok(AuthOutcome::with_user(user_id))
    }

    /// Nothing is kept per signed-in user.
    async fn sign_out(&self) -> Result<(), RemoteError> {
        Ok(())
    }
}

#[async_trait]
impl DocumentStorePort for InMemoryUserService {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, RemoteError> {
        Ok(self
            .state
            .read()
            .await
            .documents
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        document: Value,
    ) -> Result<(), RemoteError> {
        if id.is_empty() {
            return Err(RemoteError::InvalidDocument(format!(
                "{collection}: empty document id"
            )));
        }
        if !document.is_object() {
            return Err(RemoteError::InvalidDocument(format!(
                "{collection}/{id}: document must be an object"
            )));
        }

        let mut state = self.state.write().await;
        let previous = state
            .documents
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);

        if let Err(err) = self.persist(&state).await {
            if let Some(docs) = state.documents.get_mut(collection) {
                match previous {
                    Some(previous) => docs.insert(id.to_string(), previous),
                    None => docs.remove(id),
                };
            }
            return Err(err);
        }
        Ok(())
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Value>, RemoteError> {
        Ok(self
            .state
            .read()
            .await
            .documents
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }
}
