use ct_core::ports::RemoteError;
use ct_core::{PreferenceError, UserId};
use thiserror::Error;

/// Failure of a user-state operation. The message is suitable for showing
/// to the user directly.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("sign-in succeeded but the service returned no user id")]
    MissingUserId,

    #[error("no profile exists for user {0}")]
    UserNotFound(UserId),

    #[error("profile has no user id")]
    InvalidProfile,

    #[error("no user is signed in")]
    NotSignedIn,

    #[error(transparent)]
    Storage(#[from] PreferenceError),
}

/// Failure of a cart operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("`{0}` is not on the selected menu or in the cart")]
    UnknownDish(String),
}
