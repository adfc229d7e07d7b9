//! # Application Dependencies
//!
//! Dependency grouping for `App` construction.
//!
//! **Note**: This is NOT a Builder pattern.
//! - No build steps
//! - No default values
//! - No hidden logic
//! - Just parameter grouping

use std::sync::Arc;

use ct_core::ports::{AuthPort, CatalogPort, DocumentStorePort, PreferenceStorePort};

use crate::user_data::UserDataService;

/// Application dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required - no defaults, no optional fields.
pub struct AppDeps {
    // Remote user service
    pub auth: Arc<dyn AuthPort>,
    pub documents: Arc<dyn DocumentStorePort>,

    // Home feed
    pub catalog: Arc<dyn CatalogPort>,
    pub user_data: Arc<UserDataService>,

    // Session store, one per namespace
    pub login_state_store: Arc<dyn PreferenceStorePort>,
    pub user_store: Arc<dyn PreferenceStorePort>,
    pub onboarding_store: Arc<dyn PreferenceStorePort>,
}
