//! Loader configuration types for optcrypto.
//!
//! `LoaderConfig` represents an optional `config.toml` that can switch the
//! optional cryptography feature off or override the platform candidate list.

use serde::{Deserialize, Serialize};

use crate::candidate::LibraryCandidate;

/// Top-level configuration for the library loader.
///
/// All fields have defaults; an empty file is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// When false, initialization skips library loading and the feature stays off.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Candidate libraries in priority order. Empty means "use platform defaults".
    #[serde(default)]
    pub candidates: Vec<CandidateConfig>,
}

fn default_enabled() -> bool {
    true
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            candidates: Vec::new(),
        }
    }
}

/// A configured library candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateConfig {
    /// Library name or path passed to the OS loader.
    pub name: String,
    /// Additional modules searched after `name` (legacy split builds).
    #[serde(default)]
    pub companions: Vec<String>,
}

impl From<CandidateConfig> for LibraryCandidate {
    fn from(config: CandidateConfig) -> Self {
        Self {
            identifier: config.name,
            companions: config.companions,
        }
    }
}
