pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use wiring::{resolve_app_dirs, wire_dependencies};
