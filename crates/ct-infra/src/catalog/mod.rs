//! Catalog providers for the home feed.

mod document;
mod memory;
pub mod seed;

pub use document::{
    DocumentCatalog, ADVERTISEMENTS_COLLECTION, FOOD_ITEMS_COLLECTION, RESTAURANTS_COLLECTION,
};
pub use memory::InMemoryCatalog;
