use std::sync::Arc;

use ct_core::ports::{
    AuthPort, DocumentStoreExt, DocumentStorePort, PreferenceStorePort, USERS_COLLECTION,
};
use ct_core::{ProfileDraft, ProfileEdit, SessionStatus, User, UserId};
use futures::stream::{BoxStream, StreamExt};
use tracing::{info, warn};

use super::{merge_status, FlagStore, UserCache};
use crate::errors::SessionError;

/// The only writer of the login flag and the cached profile.
///
/// Every remote-backed operation makes one remote attempt and touches local
/// state only after the remote side succeeded. Operations may run
/// concurrently; the preference stores serialize the writes.
pub struct UserStateCoordinator {
    auth: Arc<dyn AuthPort>,
    documents: Arc<dyn DocumentStorePort>,
    login_state: FlagStore,
    user_cache: UserCache,
}

impl UserStateCoordinator {
    pub fn new(
        auth: Arc<dyn AuthPort>,
        documents: Arc<dyn DocumentStorePort>,
        login_state_store: Arc<dyn PreferenceStorePort>,
        user_store: Arc<dyn PreferenceStorePort>,
    ) -> Self {
        Self {
            auth,
            documents,
            login_state: FlagStore::login_state(login_state_store),
            user_cache: UserCache::new(user_store),
        }
    }

    /// Sign in and cache the user's profile document.
    ///
    /// The login flag is left alone; callers flip it with
    /// [`Self::toggle_login_state`] once they accept the session.
    #[tracing::instrument(skip(self, password))]
    pub async fn login_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let outcome = self.auth.sign_in_with_email(email, password).await?;
        let user_id = outcome.user_id.ok_or(SessionError::MissingUserId)?;

        let user: Option<User> = self
            .documents
            .get_as(USERS_COLLECTION, user_id.as_str())
            .await?;
        let user = user.ok_or_else(|| SessionError::UserNotFound(user_id.clone()))?;

        self.user_cache.save(&user).await?;
        info!(user_id = %user_id, "signed in");
        Ok(user)
    }

    /// Flip the login flag and return its new value.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_login_state(&self) -> Result<bool, SessionError> {
        let logged_in = self.login_state.toggle().await?;
        info!(logged_in, "login state toggled");
        Ok(logged_in)
    }

    /// Create an account and its blank profile document.
    ///
    /// Nothing local is written. If the document write fails the account
    /// still exists remotely.
    #[tracing::instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<UserId, SessionError> {
        let outcome = self.auth.create_user_with_email(email, password).await?;
        let user_id = outcome.user_id.ok_or(SessionError::MissingUserId)?;

        let profile = User::registered(user_id.clone(), email);
        if let Err(err) = self
            .documents
            .set_from(USERS_COLLECTION, user_id.as_str(), &profile)
            .await
        {
            warn!(
                user_id = %user_id,
                error = %err,
                "account created but profile document was not written"
            );
            return Err(err.into());
        }

        info!(user_id = %user_id, "account created");
        Ok(user_id)
    }

    /// Overwrite the remote profile, then mirror it locally.
    #[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn update_profile(&self, user: User) -> Result<(), SessionError> {
        if user.id.is_empty() {
            return Err(SessionError::InvalidProfile);
        }

        self.documents
            .set_from(USERS_COLLECTION, user.id.as_str(), &user)
            .await?;
        self.user_cache.save(&user).await?;

        info!("profile updated");
        Ok(())
    }

    /// Start editing the cached profile.
    pub async fn profile_draft(&self) -> Result<ProfileDraft, SessionError> {
        self.user_cache
            .get()
            .await?
            .map(ProfileDraft::from_user)
            .ok_or(SessionError::NotSignedIn)
    }

    /// Apply `edits` to the cached profile and submit the result.
    pub async fn edit_profile(
        &self,
        edits: impl IntoIterator<Item = ProfileEdit>,
    ) -> Result<User, SessionError> {
        let mut draft = self.profile_draft().await?;
        for edit in edits {
            draft.apply(edit);
        }
        let user = draft.into_user();
        self.update_profile(user.clone()).await?;
        Ok(user)
    }

    /// Clear the cached profile, then flip the login flag. Remote
    /// credentials are dropped last; failing to drop them is only logged.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.user_cache.clear().await?;
        let logged_in = self.login_state.toggle().await?;
        if logged_in {
            warn!("logout toggled a signed-out flag");
        }
        if let Err(err) = self.auth.sign_out().await {
            warn!(error = %err, "failed to drop remote credentials");
        }
        info!("signed out");
        Ok(())
    }

    pub fn login_state(&self) -> BoxStream<'static, Result<bool, SessionError>> {
        self.login_state.watch().map(|item| item.map_err(Into::into)).boxed()
    }

    pub fn cached_user(&self) -> BoxStream<'static, Result<Option<User>, SessionError>> {
        self.user_cache.watch().map(|item| item.map_err(Into::into)).boxed()
    }

    pub fn session_status(&self) -> BoxStream<'static, Result<SessionStatus, SessionError>> {
        merge_status(self.login_state.watch(), self.user_cache.watch())
            .map(|item| item.map_err(Into::into))
            .boxed()
    }

    pub async fn is_logged_in(&self) -> Result<bool, SessionError> {
        Ok(self.login_state.get().await?)
    }

    pub async fn current_status(&self) -> Result<SessionStatus, SessionError> {
        let logged_in = self.login_state.get().await?;
        let user = self.user_cache.get().await?;
        Ok(SessionStatus::resolve(logged_in, user))
    }
}
