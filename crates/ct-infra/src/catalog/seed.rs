//! Built-in catalog shipped with the app.

use ct_core::catalog::{Advertisement, CartItem, FoodItem, MenuItem, Restaurant};
use serde_json::Value;

use super::{ADVERTISEMENTS_COLLECTION, FOOD_ITEMS_COLLECTION, RESTAURANTS_COLLECTION};

fn dish(name: &str, price: f64, rating: f64, no_of_ratings: u32, is_vegetarian: bool) -> MenuItem {
    MenuItem {
        dish: name.to_string(),
        price,
        rating,
        no_of_ratings,
        is_vegetarian,
    }
}

pub fn restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant {
            name: "Com Tam Ba Ghien".to_string(),
            cuisine: "Broken rice".to_string(),
            rating: 4.7,
            delivery_minutes: 25,
            image: "restaurant_ba_ghien".to_string(),
            menu: vec![
                dish("Com tam suon bi cha", 65000.0, 4.8, 1240, false),
                dish("Com tam suon", 50000.0, 4.7, 980, false),
                dish("Canh chua chay", 35000.0, 4.2, 150, true),
            ],
        },
        Restaurant {
            name: "Com Tam Thuan Kieu".to_string(),
            cuisine: "Broken rice".to_string(),
            rating: 4.4,
            delivery_minutes: 30,
            image: "restaurant_thuan_kieu".to_string(),
            menu: vec![
                dish("Com tam ga nuong", 55000.0, 4.5, 610, false),
                dish("Com tam dau hu", 40000.0, 4.1, 120, true),
            ],
        },
        Restaurant {
            name: "Pho Hoa Pasteur".to_string(),
            cuisine: "Noodle soup".to_string(),
            rating: 4.6,
            delivery_minutes: 20,
            image: "restaurant_pho_hoa".to_string(),
            menu: vec![
                dish("Pho bo tai", 75000.0, 4.6, 2100, false),
                dish("Pho chay", 60000.0, 4.3, 340, true),
            ],
        },
        Restaurant {
            name: "Banh Mi Huynh Hoa".to_string(),
            cuisine: "Sandwich".to_string(),
            rating: 4.5,
            delivery_minutes: 15,
            image: "restaurant_huynh_hoa".to_string(),
            menu: vec![
                dish("Banh mi dac biet", 68000.0, 4.7, 3050, false),
                dish("Banh mi chay", 35000.0, 4.0, 210, true),
            ],
        },
    ]
}

pub fn advertisements() -> Vec<Advertisement> {
    vec![
        Advertisement {
            title: "Free delivery".to_string(),
            sub_title: "On every order over 100.000d".to_string(),
            color: "#FFB74D".to_string(),
            image: "ad_delivery".to_string(),
        },
        Advertisement {
            title: "Lunch deal".to_string(),
            sub_title: "20% off broken rice before 2pm".to_string(),
            color: "#81C784".to_string(),
            image: "ad_lunch".to_string(),
        },
    ]
}

pub fn food_items() -> Vec<FoodItem> {
    vec![
        FoodItem {
            name: "Com tam suon bi cha".to_string(),
            restaurant: "Com Tam Ba Ghien".to_string(),
            price: 65000.0,
            image: "food_suon_bi_cha".to_string(),
        },
        FoodItem {
            name: "Pho bo tai".to_string(),
            restaurant: "Pho Hoa Pasteur".to_string(),
            price: 75000.0,
            image: "food_pho_bo".to_string(),
        },
        FoodItem {
            name: "Banh mi dac biet".to_string(),
            restaurant: "Banh Mi Huynh Hoa".to_string(),
            price: 68000.0,
            image: "food_banh_mi".to_string(),
        },
    ]
}

/// Favourites a fresh install starts with.
pub fn favourite_restaurants() -> Vec<Restaurant> {
    restaurants().into_iter().take(2).collect()
}

/// Cart a fresh install starts with.
pub fn cart_items() -> Vec<CartItem> {
    restaurants()
        .into_iter()
        .next()
        .map(|restaurant| {
            restaurant
                .menu
                .into_iter()
                .take(2)
                .map(|item| CartItem::new(item, 1))
                .collect()
        })
        .unwrap_or_default()
}

/// The built-in catalog as `(collection, id, document)` triples, for
/// loading into a document store.
pub fn documents() -> Vec<(String, String, Value)> {
    fn entries<T: serde::Serialize>(
        collection: &str,
        items: Vec<T>,
        id: impl Fn(usize, &T) -> String,
    ) -> Vec<(String, String, Value)> {
        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let doc_id = id(index, &item);
                serde_json::to_value(&item)
                    .ok()
                    .map(|value| (collection.to_string(), doc_id, value))
            })
            .collect()
    }

    let slug = |name: &str| name.to_lowercase().replace(' ', "-");

    let mut docs = entries(RESTAURANTS_COLLECTION, restaurants(), |_, r| slug(&r.name));
    docs.extend(entries(ADVERTISEMENTS_COLLECTION, advertisements(), |i, _| {
        format!("ad-{i}")
    }));
    docs.extend(entries(FOOD_ITEMS_COLLECTION, food_items(), |_, f| slug(&f.name)));
    docs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_food_item_belongs_to_a_known_restaurant() {
        let names: Vec<String> = restaurants().into_iter().map(|r| r.name).collect();
        for item in food_items() {
            assert!(names.contains(&item.restaurant), "{}", item.restaurant);
        }
    }

    #[test]
    fn documents_cover_every_collection() {
        let docs = documents();
        let count = |collection: &str| docs.iter().filter(|(c, _, _)| c == collection).count();

        assert_eq!(count(RESTAURANTS_COLLECTION), restaurants().len());
        assert_eq!(count(ADVERTISEMENTS_COLLECTION), advertisements().len());
        assert_eq!(count(FOOD_ITEMS_COLLECTION), food_items().len());
        assert!(docs.iter().any(|(_, id, _)| id == "com-tam-ba-ghien"));
    }

    #[test]
    fn starter_cart_has_one_of_each_line() {
        let cart = cart_items();
        assert_eq!(cart.len(), 2);
        assert!(cart.iter().all(|line| line.quantity == 1));
    }
}
