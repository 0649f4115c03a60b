//! Loader configuration file for optcrypto.
//!
//! Reads `config.toml` (by default from `{config_dir}/optcrypto/`) and
//! deserializes it into [`LoaderConfig`]. Falls back to defaults when the
//! file is missing or malformed: a bad config file must never cost the host
//! anything more than the optional feature.

use std::path::{Path, PathBuf};

use optcrypto_types::candidate::LibraryCandidate;
use optcrypto_types::config::LoaderConfig;

use crate::candidates::platform_candidates;

/// Platform default location of `config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("optcrypto").join("config.toml"))
}

/// Load loader configuration from `path`.
///
/// - If the file does not exist, returns [`LoaderConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_loader_config(path: &Path) -> LoaderConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return LoaderConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return LoaderConfig::default();
        }
    };

    match toml::from_str::<LoaderConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            LoaderConfig::default()
        }
    }
}

/// Resolve the effective candidate list.
///
/// Priority:
/// 1. `candidates` from the config file, if any are listed
/// 2. Platform defaults
pub fn resolve_candidates(config: &LoaderConfig) -> Vec<LibraryCandidate> {
    if config.candidates.is_empty() {
        platform_candidates()
    } else {
        config
            .candidates
            .iter()
            .cloned()
            .map(LibraryCandidate::from)
            .collect()
    }
}
