//! Per-process cart and favourites.
//!
//! Nothing here is persisted: the cart and the liked restaurants live for
//! the lifetime of the process, seeded at construction.

use ct_core::catalog::{CartItem, Restaurant};
use ct_core::BroadcastCell;
use futures::stream::BoxStream;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::CartError;

#[derive(Default)]
struct Selection {
    restaurant: Option<Restaurant>,
    menu: Vec<CartItem>,
    liked: Vec<Restaurant>,
}

pub struct UserDataService {
    selection: Mutex<Selection>,
    cart: BroadcastCell<Vec<CartItem>>,
}

impl Default for UserDataService {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl UserDataService {
    pub fn new(liked: Vec<Restaurant>, cart: Vec<CartItem>) -> Self {
        Self {
            selection: Mutex::new(Selection {
                liked,
                ..Default::default()
            }),
            cart: BroadcastCell::new(cart),
        }
    }

    /// Make `restaurant` the current one. Its menu replaces the previous
    /// selection's, every line starting at quantity 0 unless the dish is
    /// already in the cart.
    pub async fn select_restaurant(&self, restaurant: Restaurant) {
        let cart = self.cart.current();
        let menu = restaurant
            .menu
            .iter()
            .map(|item| {
                let quantity = cart
                    .iter()
                    .find(|line| line.menu_item.dish == item.dish)
                    .map(|line| line.quantity)
                    .unwrap_or(0);
                CartItem::new(item.clone(), quantity)
            })
            .collect();

        let mut selection = self.selection.lock().await;
        debug!(restaurant = %restaurant.name, "restaurant selected");
        selection.restaurant = Some(restaurant);
        selection.menu = menu;
    }

    pub async fn selected_restaurant(&self) -> Option<Restaurant> {
        self.selection.lock().await.restaurant.clone()
    }

    pub async fn menu_items(&self) -> Vec<CartItem> {
        self.selection.lock().await.menu.clone()
    }

    pub async fn liked_restaurants(&self) -> Vec<Restaurant> {
        self.selection.lock().await.liked.clone()
    }

    /// Restaurants are identified by name.
    pub async fn is_restaurant_liked(&self, restaurant: &Restaurant) -> bool {
        self.selection
            .lock()
            .await
            .liked
            .iter()
            .any(|liked| liked.name == restaurant.name)
    }

    /// Like or unlike `restaurant`; returns whether it is liked afterwards.
    pub async fn toggle_favourite(&self, restaurant: Restaurant) -> bool {
        let mut selection = self.selection.lock().await;
        let before = selection.liked.len();
        selection.liked.retain(|liked| liked.name != restaurant.name);
        if selection.liked.len() == before {
            selection.liked.push(restaurant);
            true
        } else {
            false
        }
    }

    /// Current cart, then the cart after every change.
    pub fn cart_items(&self) -> BoxStream<'static, Vec<CartItem>> {
        self.cart.subscribe()
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.current().iter().map(CartItem::subtotal).sum()
    }

    /// Set how many of `dish` are ordered. Zero removes the dish from the
    /// cart. The dish must be on the selected menu or already in the cart.
    pub async fn set_quantity(&self, dish: &str, quantity: u32) -> Result<(), CartError> {
        let mut selection = self.selection.lock().await;

        let on_menu = selection
            .menu
            .iter_mut()
            .find(|line| line.menu_item.dish == dish);
        let menu_item = match on_menu {
            Some(line) => {
                line.quantity = quantity;
                Some(line.menu_item.clone())
            }
            None => None,
        };

        let cart = self.cart.current();
        let in_cart = cart.iter().any(|line| line.menu_item.dish == dish);
        if menu_item.is_none() && !in_cart {
            return Err(CartError::UnknownDish(dish.to_string()));
        }

        self.cart.update(|lines| {
            match lines.iter_mut().find(|line| line.menu_item.dish == dish) {
                Some(line) => line.quantity = quantity,
                None => {
                    if let Some(item) = menu_item {
                        lines.push(CartItem::new(item, quantity));
                    }
                }
            }
            lines.retain(|line| line.quantity > 0);
        });
        drop(selection);

        debug!(dish, quantity, "cart updated");
        Ok(())
    }
}
