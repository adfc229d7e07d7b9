//! Merged view of the login flag and the cached profile.

use crate::user::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    SignedOut,
    SignedIn(User),
    /// Flag says signed in but no profile is cached, e.g. a logout that was
    /// interrupted between its two steps. Consumers treat this as signed out
    /// and ask for a fresh login.
    Stale,
}

impl SessionStatus {
    pub fn resolve(logged_in: bool, cached_user: Option<User>) -> Self {
        match (logged_in, cached_user) {
            (true, Some(user)) => Self::SignedIn(user),
            (true, None) => Self::Stale,
            (false, _) => Self::SignedOut,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserId;

    #[test]
    fn test_flag_and_user_sign_in() {
        let user = User::registered(UserId::from("u-1"), "a@x.com");
        let status = SessionStatus::resolve(true, Some(user.clone()));

        assert!(status.is_authenticated());
        assert_eq!(status.user(), Some(&user));
    }

    #[test]
    fn test_flag_without_user_is_stale_and_not_authenticated() {
        let status = SessionStatus::resolve(true, None);

        assert_eq!(status, SessionStatus::Stale);
        assert!(!status.is_authenticated());
    }

    #[test]
    fn test_cached_user_without_flag_is_signed_out() {
        let user = User::registered(UserId::from("u-1"), "a@x.com");

        assert_eq!(
            SessionStatus::resolve(false, Some(user)),
            SessionStatus::SignedOut
        );
        assert_eq!(SessionStatus::resolve(false, None), SessionStatus::SignedOut);
    }
}
