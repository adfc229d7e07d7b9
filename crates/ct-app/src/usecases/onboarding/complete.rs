use std::sync::Arc;

use ct_core::ports::PreferenceStorePort;
use tracing::info;

use crate::session::FlagStore;

/// Use case for completing onboarding.
///
/// Marks onboarding as complete in the persistent state.
pub struct CompleteOnboarding {
    flag: FlagStore,
}

impl CompleteOnboarding {
    pub fn new(onboarding_store: Arc<dyn PreferenceStorePort>) -> Self {
        Self {
            flag: FlagStore::onboarding(onboarding_store),
        }
    }

    /// Create from cloned `Arc<dyn Port>` references, for the `App`
    /// accessor pattern.
    pub fn from_ports(onboarding_store: Arc<dyn PreferenceStorePort>) -> Self {
        Self::new(onboarding_store)
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        self.flag.set(true).await?;
        info!("onboarding completed");
        Ok(())
    }
}
