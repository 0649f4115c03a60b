//! Infrastructure layer for optcrypto.
//!
//! Contains implementations of the loader traits defined in `optcrypto-core`:
//! the `libloading`-backed OS loader, the per-platform candidate lists, the
//! `config.toml` loader, and the wiring that assembles a ready-to-initialize
//! runtime from them.

pub mod candidates;
pub mod config;
pub mod loader;
pub mod runtime;
