//! File helpers shared by the on-disk adapters.

mod atomic;

pub use atomic::write_atomic;
