use std::sync::Arc;

use ct_core::catalog::{Advertisement, FoodItem, Restaurant};
use ct_core::ports::CatalogPort;
use serde::Serialize;
use tracing::{info_span, warn, Instrument};

use crate::user_data::UserDataService;

/// Everything the home screen shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFeed {
    pub advertisements: Vec<Advertisement>,
    pub food_items: Vec<FoodItem>,
    pub restaurants: Vec<Restaurant>,
    pub liked_restaurants: Vec<Restaurant>,
}

/// Use case for loading the home feed.
///
/// ## Behavior
/// - Each catalog collection is fetched independently
/// - A collection that fails to load is left empty and logged; the rest of
///   the feed is still returned
pub struct LoadHomeFeed {
    catalog: Arc<dyn CatalogPort>,
    user_data: Arc<UserDataService>,
}

impl LoadHomeFeed {
    pub fn new(catalog: Arc<dyn CatalogPort>, user_data: Arc<UserDataService>) -> Self {
        Self { catalog, user_data }
    }

    pub async fn execute(&self) -> HomeFeed {
        let span = info_span!("usecase.load_home_feed.execute");

        async {
            let (advertisements, food_items, restaurants) = tokio::join!(
                self.catalog.advertisements(),
                self.catalog.food_items(),
                self.catalog.restaurants(),
            );

            HomeFeed {
                advertisements: advertisements
                    .inspect_err(|e| warn!(error = %e, "failed to load advertisements"))
                    .unwrap_or_default(),
                food_items: food_items
                    .inspect_err(|e| warn!(error = %e, "failed to load food items"))
                    .unwrap_or_default(),
                restaurants: restaurants
                    .inspect_err(|e| warn!(error = %e, "failed to load restaurants"))
                    .unwrap_or_default(),
                liked_restaurants: self.user_data.liked_restaurants().await,
            }
        }
        .instrument(span)
        .await
    }
}
