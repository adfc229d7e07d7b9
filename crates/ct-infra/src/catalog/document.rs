use std::sync::Arc;

use async_trait::async_trait;
use ct_core::catalog::{Advertisement, FoodItem, Restaurant};
use ct_core::ports::{CatalogPort, DocumentStoreExt, DocumentStorePort, RemoteError};

pub const RESTAURANTS_COLLECTION: &str = "restaurants";
pub const ADVERTISEMENTS_COLLECTION: &str = "advertisements";
pub const FOOD_ITEMS_COLLECTION: &str = "food_items";

/// Catalog read from remote document collections on every call.
pub struct DocumentCatalog {
    documents: Arc<dyn DocumentStorePort>,
}

impl DocumentCatalog {
    pub fn new(documents: Arc<dyn DocumentStorePort>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl CatalogPort for DocumentCatalog {
    async fn restaurants(&self) -> Result<Vec<Restaurant>, RemoteError> {
        self.documents.list_as(RESTAURANTS_COLLECTION).await
    }

    async fn advertisements(&self) -> Result<Vec<Advertisement>, RemoteError> {
        self.documents.list_as(ADVERTISEMENTS_COLLECTION).await
    }

    async fn food_items(&self) -> Result<Vec<FoodItem>, RemoteError> {
        self.documents.list_as(FOOD_ITEMS_COLLECTION).await
    }
}
