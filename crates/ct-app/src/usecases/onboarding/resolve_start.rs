use std::sync::Arc;

use ct_core::ports::PreferenceStorePort;
use ct_core::StartDestination;
use tracing::info;

use crate::session::FlagStore;

/// Use case for picking the first screen.
///
/// Reads the onboarding flag once. An unreadable store counts as "not
/// completed", so a damaged install shows onboarding again instead of
/// failing to start.
pub struct ResolveStartDestination {
    flag: FlagStore,
}

impl ResolveStartDestination {
    pub fn new(onboarding_store: Arc<dyn PreferenceStorePort>) -> Self {
        Self {
            flag: FlagStore::onboarding(onboarding_store),
        }
    }

    pub fn from_ports(onboarding_store: Arc<dyn PreferenceStorePort>) -> Self {
        Self::new(onboarding_store)
    }

    pub async fn execute(&self) -> anyhow::Result<StartDestination> {
        let completed = self.flag.get().await?;
        let destination = StartDestination::from_onboarding_completed(completed);
        info!(route = destination.route(), "start destination resolved");
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::onboarding::CompleteOnboarding;
    use ct_infra::InMemoryPreferenceStore;

    #[tokio::test]
    async fn test_fresh_install_starts_at_onboarding() {
        let store = Arc::new(InMemoryPreferenceStore::new("onboarding_state_pref"));

        let destination = ResolveStartDestination::new(store).execute().await.unwrap();

        assert_eq!(destination, StartDestination::Onboarding);
    }

    #[tokio::test]
    async fn test_completed_onboarding_starts_at_home() {
        let store = Arc::new(InMemoryPreferenceStore::new("onboarding_state_pref"));
        CompleteOnboarding::new(store.clone()).execute().await.unwrap();

        let destination = ResolveStartDestination::new(store).execute().await.unwrap();

        assert_eq!(destination, StartDestination::Home);
        assert_eq!(destination.route(), "home_screen");
    }
}
