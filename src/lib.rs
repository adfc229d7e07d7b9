//! Composition root for the comtam user-state layer: configuration loading,
//! tracing setup, dependency wiring and the CLI command handlers.

pub mod bootstrap;
pub mod commands;
