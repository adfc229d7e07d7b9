use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference store `{namespace}` is unreadable: {source}")]
    Io {
        namespace: String,
        #[source]
        source: std::io::Error,
    },

    #[error("preference store `{namespace}` is corrupted: {reason}")]
    Corrupted { namespace: String, reason: String },

    #[error("failed to persist preference store `{namespace}`: {reason}")]
    Write { namespace: String, reason: String },

    #[error("preference `{key}` holds a {found} value, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("preference `{key}` could not be decoded: {reason}")]
    Decode { key: String, reason: String },
}

impl PreferenceError {
    /// Faults of the backing storage itself, as opposed to faults in the
    /// values it holds. Readers degrade these to an empty snapshot.
    pub fn is_storage_fault(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Corrupted { .. })
    }
}
