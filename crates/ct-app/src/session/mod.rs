//! Session state: the login flag, the cached profile and the coordinator
//! that keeps both in step with the remote user service.

mod cache;
mod coordinator;
mod flag;
mod status;

pub use cache::UserCache;
pub use coordinator::UserStateCoordinator;
pub use flag::FlagStore;
pub use status::merge_status;
