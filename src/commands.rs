//! CLI command handlers.
//!
//! Each handler runs one operation against the wired `App` and returns the
//! JSON printed on stdout.

use anyhow::Context;
use ct_app::App;
use ct_core::{ProfileEdit, SessionStatus};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub user_name: Option<String>,
    pub phone_number: Option<String>,
    pub ward: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
}

impl ProfileChanges {
    fn into_edits(self) -> Vec<ProfileEdit> {
        [
            self.user_name.map(ProfileEdit::UserName),
            self.phone_number.map(ProfileEdit::PhoneNumber),
            self.ward.map(ProfileEdit::Ward),
            self.street.map(ProfileEdit::Street),
            self.house_number.map(ProfileEdit::HouseNumber),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn status_json(status: &SessionStatus) -> Value {
    match status {
        SessionStatus::SignedOut => json!({ "status": "signed_out" }),
        SessionStatus::SignedIn(user) => json!({ "status": "signed_in", "user": user }),
        SessionStatus::Stale => json!({ "status": "stale" }),
    }
}

pub async fn start(app: &App) -> anyhow::Result<Value> {
    let destination = app.resolve_start_destination().execute().await?;
    Ok(json!({ "destination": destination, "route": destination.route() }))
}

pub async fn complete_onboarding(app: &App) -> anyhow::Result<Value> {
    app.complete_onboarding().execute().await?;
    Ok(json!({ "onboardingCompleted": true }))
}

pub async fn status(app: &App) -> anyhow::Result<Value> {
    let status = app.coordinator().current_status().await?;
    Ok(status_json(&status))
}

pub async fn sign_up(app: &App, email: &str, password: &str) -> anyhow::Result<Value> {
    let user_id = app.coordinator().sign_up(email, password).await?;
    Ok(json!({ "userId": user_id }))
}

/// Sign in, cache the profile and mark the session as logged in.
pub async fn login(app: &App, email: &str, password: &str) -> anyhow::Result<Value> {
    let coordinator = app.coordinator();
    coordinator
        .login_with_credentials(email, password)
        .await
        .context("Login failed")?;

    // The flag is a toggle; only flip it when it is not already set.
    if !coordinator.is_logged_in().await? {
        coordinator.toggle_login_state().await?;
    }

    status(app).await
}

pub async fn update_profile(app: &App, changes: ProfileChanges) -> anyhow::Result<Value> {
    let user = app
        .coordinator()
        .edit_profile(changes.into_edits())
        .await?;
    Ok(json!({ "user": user }))
}

pub async fn logout(app: &App) -> anyhow::Result<Value> {
    app.coordinator().logout().await?;
    status(app).await
}

pub async fn feed(app: &App) -> anyhow::Result<Value> {
    let feed = app.load_home_feed().execute().await;
    Ok(serde_json::to_value(feed)?)
}
