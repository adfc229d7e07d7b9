use futures::stream::{BoxStream, StreamExt};

use super::{PreferenceError, Preferences};

/// Stream of namespace snapshots: the current one first, then one per
/// committed write.
pub type PreferenceStream = BoxStream<'static, Result<Preferences, PreferenceError>>;

/// Replace storage faults with an empty snapshot.
///
/// Only [`PreferenceError::is_storage_fault`] errors are recovered; anything
/// else is passed through unchanged.
pub fn recover_storage_faults(namespace: &str, stream: PreferenceStream) -> PreferenceStream {
    let namespace = namespace.to_string();
    stream
        .map(move |item| match item {
            Err(err) if err.is_storage_fault() => {
                tracing::warn!(
                    namespace = %namespace,
                    error = %err,
                    "preference store unreadable, falling back to defaults"
                );
                Ok(Preferences::default())
            }
            other => other,
        })
        .boxed()
}
