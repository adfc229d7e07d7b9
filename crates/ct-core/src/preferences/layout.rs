//! Persisted namespaces and keys of the user-state layer.
//!
//! The names match the on-device layout the mobile client already uses, so
//! an existing store can be read without migration.

use super::PreferenceKey;

pub const LOGIN_STATE_NAMESPACE: &str = "user_login_state_pref";
pub const LOGIN_STATE_KEY: PreferenceKey<bool> = PreferenceKey::new("user_login_state");

pub const ONBOARDING_NAMESPACE: &str = "onboarding_state_pref";
pub const ONBOARDING_COMPLETED_KEY: PreferenceKey<bool> =
    PreferenceKey::new("onboarding_completed");

/// Holds the JSON-serialized cached user under [`USER_KEY`].
pub const USER_PREFS_NAMESPACE: &str = "user_prefs";
pub const USER_KEY: PreferenceKey<String> = PreferenceKey::new("user_key");

/// Credentials of the remote provider's signed-in user.
pub const REMOTE_SESSION_NAMESPACE: &str = "remote_session_pref";
pub const ID_TOKEN_KEY: PreferenceKey<String> = PreferenceKey::new("id_token");
pub const REFRESH_TOKEN_KEY: PreferenceKey<String> = PreferenceKey::new("refresh_token");
