//! Application state for the CLI.
//!
//! Holds the loaded configuration and an uninitialized runtime. Commands
//! that need the library call `initialize()` themselves, so `catalogue` and
//! `candidates` never touch the dynamic linker.

use std::path::PathBuf;
use std::sync::Arc;

use optcrypto_infra::config::{default_config_path, load_loader_config};
use optcrypto_infra::runtime::{SystemCryptoRuntime, build_runtime};
use optcrypto_types::config::LoaderConfig;

pub struct AppState {
    pub runtime: Arc<SystemCryptoRuntime>,
    pub config: LoaderConfig,
    pub config_path: Option<PathBuf>,
}

impl AppState {
    /// Load configuration (explicit path, else platform default) and build the runtime.
    pub async fn init(config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.or_else(default_config_path);

        let config = match &config_path {
            Some(path) => load_loader_config(path).await,
            None => {
                tracing::debug!("No platform config directory, using defaults");
                LoaderConfig::default()
            }
        };

        let runtime = build_runtime(&config);

        Self {
            runtime: Arc::new(runtime),
            config,
            config_path,
        }
    }
}
