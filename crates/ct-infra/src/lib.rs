//! # ct-infra
//!
//! Adapters behind the `ct-core` ports: preference stores, remote user
//! service backends and catalog providers.

pub mod app_dirs;
pub mod catalog;
pub mod fs;
pub mod preferences;
pub mod remote;

pub use app_dirs::DirsAppDirsAdapter;
pub use catalog::{DocumentCatalog, InMemoryCatalog};
pub use preferences::{FilePreferenceStore, InMemoryPreferenceStore};
pub use remote::{FirebaseUserService, InMemoryUserService};
