use std::sync::Arc;

use ct_core::ports::{CatalogPort, PreferenceStorePort};

use crate::deps::AppDeps;
use crate::session::UserStateCoordinator;
use crate::usecases::{CompleteOnboarding, LoadHomeFeed, OpenRestaurant, ResolveStartDestination};
use crate::user_data::UserDataService;

/// The application runtime.
///
/// Owns the coordinator and hands out use cases wired to the shared ports.
pub struct App {
    coordinator: Arc<UserStateCoordinator>,
    catalog: Arc<dyn CatalogPort>,
    user_data: Arc<UserDataService>,
    onboarding_store: Arc<dyn PreferenceStorePort>,
}

impl App {
    /// This constructor signature IS the dependency manifest.
    pub fn new(deps: AppDeps) -> Self {
        let coordinator = UserStateCoordinator::new(
            deps.auth,
            deps.documents,
            deps.login_state_store,
            deps.user_store,
        );

        Self {
            coordinator: Arc::new(coordinator),
            catalog: deps.catalog,
            user_data: deps.user_data,
            onboarding_store: deps.onboarding_store,
        }
    }

    pub fn coordinator(&self) -> Arc<UserStateCoordinator> {
        self.coordinator.clone()
    }

    pub fn user_data(&self) -> Arc<UserDataService> {
        self.user_data.clone()
    }

    pub fn complete_onboarding(&self) -> CompleteOnboarding {
        CompleteOnboarding::from_ports(self.onboarding_store.clone())
    }

    pub fn resolve_start_destination(&self) -> ResolveStartDestination {
        ResolveStartDestination::from_ports(self.onboarding_store.clone())
    }

    pub fn load_home_feed(&self) -> LoadHomeFeed {
        LoadHomeFeed::new(self.catalog.clone(), self.user_data.clone())
    }

    pub fn open_restaurant(&self) -> OpenRestaurant {
        OpenRestaurant::new(self.catalog.clone(), self.user_data.clone())
    }
}
