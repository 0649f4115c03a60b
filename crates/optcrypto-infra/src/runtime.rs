//! Runtime wiring -- pins `CryptoRuntime` to the OS loader.

use optcrypto_core::catalogue::Catalogue;
use optcrypto_core::runtime::CryptoRuntime;
use optcrypto_types::config::LoaderConfig;

use crate::config::resolve_candidates;
use crate::loader::DlopenLoader;

/// Runtime bound through the platform's dynamic linker.
pub type SystemCryptoRuntime = CryptoRuntime<DlopenLoader>;

/// Build an uninitialized runtime for the libcrypto catalogue.
///
/// Candidates come from `config` when it lists any, otherwise from the
/// platform defaults. The caller decides when to call `initialize()`.
pub fn build_runtime(config: &LoaderConfig) -> SystemCryptoRuntime {
    CryptoRuntime::new(
        DlopenLoader::new(),
        resolve_candidates(config),
        Catalogue::openssl(),
    )
    .with_enabled(config.enabled)
}
