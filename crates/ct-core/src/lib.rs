//! # ct-core
//!
//! Core domain models and port contracts for the comtam user-state layer.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod onboarding;
pub mod ports;
pub mod preferences;
pub mod reactive;
pub mod session;
pub mod user;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use onboarding::StartDestination;
pub use preferences::{PreferenceError, PreferenceKey, PreferenceValue, Preferences};
pub use reactive::BroadcastCell;
pub use session::SessionStatus;
pub use user::{Address, ProfileDraft, ProfileEdit, User, UserId};
