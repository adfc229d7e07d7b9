use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory unavailable")]
    DataLocalDirUnavailable,
}

/// Failure of a call to the remote user service or catalog backend.
///
/// Every variant carries a human-readable message suitable for showing to
/// the user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("account already exists: {0}")]
    Conflict(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("remote service error: {0}")]
    Service(String),
}
