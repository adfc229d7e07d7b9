//! User profile domain models.
//!
//! [`User`] mirrors the remote `users/<id>` document field for field, so the
//! same JSON shape is used for the remote record and the local cache.

mod draft;
mod id;
mod model;

pub use draft::{ProfileDraft, ProfileEdit};
pub use id::UserId;
pub use model::{Address, User};
