//! Observability setup for optcrypto binaries.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! job of whatever binary hosts them.

pub mod tracing_setup;
