//! Remote user service adapters.

pub mod firebase;
mod memory;
mod password;

pub use firebase::FirebaseUserService;
pub use memory::{InMemoryUserService, LOCAL_USERS_FILE, MIN_PASSWORD_LEN};
