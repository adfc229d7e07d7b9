//! Comtam user-state orchestration layer
//!
//! This crate contains the session coordinator and the use cases that run on
//! top of the `ct-core` ports.

mod app;
pub mod deps;
pub mod errors;
pub mod session;
pub mod usecases;
pub mod user_data;

pub use app::App;
pub use deps::AppDeps;
pub use errors::{CartError, SessionError};
pub use session::UserStateCoordinator;
pub use user_data::UserDataService;
