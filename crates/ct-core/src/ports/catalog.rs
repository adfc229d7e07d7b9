use async_trait::async_trait;

use crate::catalog::{Advertisement, FoodItem, Restaurant};
use crate::ports::errors::RemoteError;

/// Source of the home-feed collections.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn restaurants(&self) -> Result<Vec<Restaurant>, RemoteError>;

    async fn advertisements(&self) -> Result<Vec<Advertisement>, RemoteError>;

    async fn food_items(&self) -> Result<Vec<FoodItem>, RemoteError>;

    async fn restaurant_by_name(&self, name: &str) -> Result<Option<Restaurant>, RemoteError> {
        Ok(self
            .restaurants()
            .await?
            .into_iter()
            .find(|restaurant| restaurant.name == name))
    }
}
