//! Shared domain types for optcrypto.
//!
//! This crate contains the types used across the optcrypto workspace:
//! symbol catalogue entries, library candidates, binding summaries, loader
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod binding;
pub mod candidate;
pub mod config;
pub mod error;
pub mod symbol;
