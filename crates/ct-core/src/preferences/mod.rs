//! Preference model for the session store.
//!
//! A preference store is a small, namespaced key-value map. Each namespace is
//! persisted independently, so clearing one never touches another. Values are
//! read through typed [`PreferenceKey`]s and observed as streams of whole
//! [`Preferences`] snapshots.

mod error;
mod key;
pub mod layout;
mod stream;
mod value;

pub use error::PreferenceError;
pub use key::{PreferenceKey, PreferenceType};
pub use stream::{recover_storage_faults, PreferenceStream};
pub use value::{PreferenceValue, Preferences};
