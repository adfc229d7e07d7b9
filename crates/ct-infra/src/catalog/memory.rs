use async_trait::async_trait;
use ct_core::catalog::{Advertisement, FoodItem, Restaurant};
use ct_core::ports::{CatalogPort, RemoteError};

use super::seed;

/// Catalog held in memory, seeded with the built-in collections by default.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    restaurants: Vec<Restaurant>,
    advertisements: Vec<Advertisement>,
    food_items: Vec<FoodItem>,
}

impl InMemoryCatalog {
    pub fn new(
        restaurants: Vec<Restaurant>,
        advertisements: Vec<Advertisement>,
        food_items: Vec<FoodItem>,
    ) -> Self {
        Self {
            restaurants,
            advertisements,
            food_items,
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed::restaurants(), seed::advertisements(), seed::food_items())
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl CatalogPort for InMemoryCatalog {
    async fn restaurants(&self) -> Result<Vec<Restaurant>, RemoteError> {
        Ok(self.restaurants.clone())
    }

    async fn advertisements(&self) -> Result<Vec<Advertisement>, RemoteError> {
        Ok(self.advertisements.clone())
    }

    async fn food_items(&self) -> Result<Vec<FoodItem>, RemoteError> {
        Ok(self.food_items.clone())
    }
}
