//! Binding logic and loader trait definitions for optcrypto.
//!
//! This crate defines the "ports" (loader traits) that the infrastructure
//! layer implements, plus everything that runs on top of them: candidate
//! resolution, the symbol catalogue, the function table and the
//! [`runtime::CryptoRuntime`] orchestrator. It depends only on
//! `optcrypto-types` -- never on `optcrypto-infra` or any OS loader crate.

pub mod catalogue;
pub mod loader;
pub mod resolver;
pub mod runtime;
pub mod table;

#[cfg(test)]
pub(crate) mod testing;
