//! Session store adapters.
//!
//! Both stores publish committed snapshots through a
//! [`ct_core::BroadcastCell`], so subscribers see the latest value on attach
//! and every later commit.

mod file;
mod memory;

pub use file::{FilePreferenceStore, PREFERENCES_FILE_EXTENSION};
pub use memory::InMemoryPreferenceStore;
