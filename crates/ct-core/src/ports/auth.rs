//! Remote authentication port.

use async_trait::async_trait;

use crate::ports::errors::RemoteError;
use crate::user::UserId;

/// Result of a successful auth call.
///
/// The provider may report success without an identity; callers must treat
/// a missing id as a failure instead of defaulting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthOutcome {
    pub user_id: Option<UserId>,
}

impl AuthOutcome {
    pub fn with_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

#[async_trait]
pub trait AuthPort: Send + Sync {
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, RemoteError>;

    async fn create_user_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, RemoteError>;

    /// Forget the credentials kept for the signed-in user, if any.
    async fn sign_out(&self) -> Result<(), RemoteError>;
}
