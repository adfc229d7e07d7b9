//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! the remote backend and of the storage medium.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `ct-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases or domains?**
//! 3. **Is it implemented by the infrastructure layer?**
//!
//! If all three answers are **yes**, place it in `ct-core/ports`.

pub mod app_dirs;
pub mod auth;
pub mod catalog;
pub mod documents;
pub mod errors;
pub mod preferences;

pub use app_dirs::AppDirsPort;
pub use auth::{AuthOutcome, AuthPort};
pub use catalog::CatalogPort;
pub use documents::{DocumentStoreExt, DocumentStorePort, USERS_COLLECTION};
pub use errors::{AppDirsError, RemoteError};
pub use preferences::{PreferenceStoreExt, PreferenceStorePort, PreferenceTransform};
