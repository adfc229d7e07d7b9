//! Use cases built on top of the ports and the session stores.

pub mod home_feed;
pub mod onboarding;
pub mod open_restaurant;

pub use home_feed::{HomeFeed, LoadHomeFeed};
pub use onboarding::{CompleteOnboarding, ResolveStartDestination};
pub use open_restaurant::OpenRestaurant;
