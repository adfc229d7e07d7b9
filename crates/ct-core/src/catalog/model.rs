use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub dish: String,
    pub price: f64,
    pub rating: f64,
    pub no_of_ratings: u32,
    pub is_vegetarian: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    pub delivery_minutes: u32,
    /// Asset identifier, resolved by the presentation layer.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    pub restaurant: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    pub title: String,
    pub sub_title: String,
    /// Background colour as `#RRGGBB`.
    pub color: String,
    #[serde(default)]
    pub image: String,
}

/// One menu entry with the quantity the user picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub menu_item: MenuItem,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(menu_item: MenuItem, quantity: u32) -> Self {
        Self {
            menu_item,
            quantity,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.menu_item.price * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_subtotal() {
        let item = CartItem::new(
            MenuItem {
                dish: "Com tam suon".to_string(),
                price: 45000.0,
                rating: 4.7,
                no_of_ratings: 120,
                is_vegetarian: false,
            },
            2,
        );
        assert_eq!(item.subtotal(), 90000.0);
    }

    #[test]
    fn test_restaurant_document_without_menu_decodes() {
        let restaurant: Restaurant = serde_json::from_value(serde_json::json!({
            "name": "Com Tam Ba Ghien",
            "cuisine": "Vietnamese",
            "rating": 4.5,
            "deliveryMinutes": 25
        }))
        .unwrap();

        assert!(restaurant.menu.is_empty());
        assert_eq!(restaurant.delivery_minutes, 25);
    }
}
