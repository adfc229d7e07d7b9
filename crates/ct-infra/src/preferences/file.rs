//! File-backed preference store
//!
//! Each namespace lives in its own JSON file (`<dir>/<namespace>.json`). The
//! file is loaded lazily on first access and rewritten atomically on every
//! committed edit, so a crash mid-write leaves either the previous or the new
//! contents, never a partial file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use ct_core::ports::{PreferenceStorePort, PreferenceTransform};
use ct_core::preferences::{PreferenceError, PreferenceStream, Preferences};
use ct_core::BroadcastCell;
use futures::{future, stream, StreamExt};
use tokio::fs;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::fs::write_atomic;

pub const PREFERENCES_FILE_EXTENSION: &str = "json";

pub struct FilePreferenceStore {
    inner: Arc<Inner>,
}

struct Inner {
    namespace: String,
    path: PathBuf,
    // Exists before the file is read so readers that hit a load fault can
    // still follow the snapshots published by a later `clear` or edit.
    cell: BroadcastCell<Preferences>,
    loaded: OnceCell<()>,
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Create store with custom file path
    pub fn new(namespace: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                namespace: namespace.into(),
                path: path.into(),
                cell: BroadcastCell::default(),
                loaded: OnceCell::new(),
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Create store for `namespace` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let path = dir
            .as_ref()
            .join(format!("{namespace}.{PREFERENCES_FILE_EXTENSION}"));
        Self::new(namespace, path)
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl Inner {
    /// Load the file into the cell once. A failed load is retried by the
    /// next caller.
    async fn ensure_loaded(&self) -> Result<(), PreferenceError> {
        self.loaded
            .get_or_try_init(|| async {
                let preferences = self.load().await?;
                self.cell.publish(preferences);
                Ok::<(), PreferenceError>(())
            })
            .await
            .map(|_| ())
    }

    async fn load(&self) -> Result<Preferences, PreferenceError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(namespace = %self.namespace, "no preference file yet, starting empty");
                return Ok(Preferences::default());
            }
            Err(source) => {
                return Err(PreferenceError::Io {
                    namespace: self.namespace.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Preferences::default());
        }

        serde_json::from_str(&content).map_err(|e| PreferenceError::Corrupted {
            namespace: self.namespace.clone(),
            reason: e.to_string(),
        })
    }

    fn write_error(&self, action: &str, e: impl std::fmt::Display) -> PreferenceError {
        PreferenceError::Write {
            namespace: self.namespace.clone(),
            reason: format!("{action} {}: {e}", self.path.display()),
        }
    }

    async fn persist(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        let json = serde_json::to_string_pretty(preferences)
            .map_err(|e| self.write_error("serialize", e))?;
        write_atomic(&self.path, json.as_bytes())
            .await
            .map_err(|e| self.write_error("replace", e))
    }
}

#[async_trait]
impl PreferenceStorePort for FilePreferenceStore {
    fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    /// After a load fault the stream yields the `Err`, then keeps following
    /// the namespace so a repair by `clear` reaches the subscriber.
    fn data(&self) -> PreferenceStream {
        let inner = Arc::clone(&self.inner);
        stream::once(async move {
            // Subscribe before loading so no publish is missed in between.
            let changes = inner.cell.subscribe_changes();
            match inner.ensure_loaded().await {
                Ok(()) => inner.cell.subscribe().map(Ok).boxed(),
                Err(err) => stream::once(future::ready(Err(err)))
                    .chain(changes.map(Ok))
                    .boxed(),
            }
        })
        .flatten()
        .boxed()
    }

    async fn edit(&self, transform: PreferenceTransform) -> Result<Preferences, PreferenceError> {
        let _guard = self.inner.write_lock.lock().await;
        self.inner.ensure_loaded().await?;

        let mut next = self.inner.cell.current();
        transform(&mut next)?;
        self.inner.persist(&next).await?;
        self.inner.cell.publish(next.clone());

        debug!(namespace = %self.inner.namespace, keys = next.len(), "preference edit committed");
        Ok(next)
    }

    /// Removes the namespace file. Also recovers a namespace whose file is
    /// corrupted: the broken file is dropped and the store starts empty.
    async fn clear(&self) -> Result<(), PreferenceError> {
        let _guard = self.inner.write_lock.lock().await;

        // Settle any in-flight first load so it cannot publish stale contents
        // after the reset below. A fault here is what `clear` repairs.
        if let Err(err) = self.inner.ensure_loaded().await {
            debug!(
                namespace = %self.inner.namespace,
                error = %err,
                "clearing unreadable namespace"
            );
        }

        match fs::remove_file(&self.inner.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.inner.write_error("remove", e)),
        }

        self.inner.cell.publish(Preferences::default());
        let _ = self.inner.loaded.set(());

        debug!(namespace = %self.inner.namespace, "preference namespace cleared");
        Ok(())
    }
}
