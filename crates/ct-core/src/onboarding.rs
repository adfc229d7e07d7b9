//! First-screen decision made once at startup.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartDestination {
    Onboarding,
    Home,
}

impl StartDestination {
    pub fn from_onboarding_completed(completed: bool) -> Self {
        if completed {
            Self::Home
        } else {
            Self::Onboarding
        }
    }

    /// Navigation route of the destination screen.
    pub fn route(&self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding_screen",
            Self::Home => "home_screen",
        }
    }
}
