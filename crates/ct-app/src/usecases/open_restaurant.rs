use std::sync::Arc;

use ct_core::catalog::Restaurant;
use ct_core::ports::CatalogPort;
use tracing::info;

use crate::user_data::UserDataService;

/// Use case for opening a restaurant from the home feed by name.
///
/// Looks the restaurant up in the catalog and makes it the selected one.
/// Returns `None` if no restaurant has that name.
pub struct OpenRestaurant {
    catalog: Arc<dyn CatalogPort>,
    user_data: Arc<UserDataService>,
}

impl OpenRestaurant {
    pub fn new(catalog: Arc<dyn CatalogPort>, user_data: Arc<UserDataService>) -> Self {
        Self { catalog, user_data }
    }

    pub async fn execute(&self, name: &str) -> anyhow::Result<Option<Restaurant>> {
        let Some(restaurant) = self.catalog.restaurant_by_name(name).await? else {
            info!(name, "restaurant not found");
            return Ok(None);
        };

        self.user_data.select_restaurant(restaurant.clone()).await;
        Ok(Some(restaurant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ct_infra::InMemoryCatalog;

    #[tokio::test]
    async fn test_open_selects_restaurant_menu() {
        let user_data = Arc::new(UserDataService::default());
        let use_case = OpenRestaurant::new(Arc::new(InMemoryCatalog::seeded()), user_data.clone());

        let opened = use_case.execute("Pho Hoa Pasteur").await.unwrap().unwrap();

        assert_eq!(user_data.selected_restaurant().await, Some(opened.clone()));
        assert_eq!(user_data.menu_items().await.len(), opened.menu.len());
    }

    #[tokio::test]
    async fn test_unknown_name_selects_nothing() {
        let user_data = Arc::new(UserDataService::default());
        let use_case = OpenRestaurant::new(Arc::new(InMemoryCatalog::seeded()), user_data.clone());

        assert!(use_case.execute("Nowhere").await.unwrap().is_none());
        assert!(user_data.selected_restaurant().await.is_none());
    }
}
