//! Onboarding use cases
//!
//! The onboarding flag is read once at startup to pick the first screen and
//! set once when the user finishes the onboarding pages. It is never reset.

pub mod complete;
pub mod resolve_start;

pub use complete::CompleteOnboarding;
pub use resolve_start::ResolveStartDestination;
