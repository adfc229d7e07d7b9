use serde::{Deserialize, Serialize};

use super::UserId;

/// Delivery address. Every field defaults to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub ward: String,
    pub street: String,
    pub house_number: String,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.ward.is_empty() && self.street.is_empty() && self.house_number.is_empty()
    }
}

/// User profile as stored in the remote `users` collection and mirrored in
/// the local cache.
///
/// No field is optional: an empty string means "unset". Missing fields in an
/// incoming document decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
    pub phone_number: String,
    pub avatar: String,
    pub address: Address,
}

impl User {
    /// Blank profile created alongside a new auth identity.
    pub fn registered(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            ..Default::default()
        }
    }
}
