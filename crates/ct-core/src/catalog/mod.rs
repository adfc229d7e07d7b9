//! Restaurant, menu and cart models for the home feed.

mod model;

pub use model::{Advertisement, CartItem, FoodItem, MenuItem, Restaurant};
