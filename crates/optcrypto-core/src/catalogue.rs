//! Symbol catalogues.
//!
//! A catalogue is a build-time-fixed table of exported functions, each tagged
//! generic (must resolve) or specific (bound best-effort), plus the name of
//! the library's initialization entry point. [`Catalogue::openssl`] is the
//! table for OpenSSL's libcrypto 1.1 and 3.x.

use std::collections::HashSet;

use optcrypto_types::error::CatalogueError;
use optcrypto_types::symbol::SymbolSpec;

/// Initialization entry point of libcrypto.
pub const OPENSSL_INIT: &str = "OPENSSL_init";

/// libcrypto functions bound at startup.
///
/// Generic entries are exported by both 1.1 and 3.x. Specific entries exist
/// in only one of them: 3.x turned several 1.1 functions into macros over new
/// `_get_` names, and added the provider API.
pub static OPENSSL_SYMBOLS: &[SymbolSpec] = &[
    SymbolSpec::generic(OPENSSL_INIT),
    SymbolSpec::generic("OPENSSL_init_crypto"),
    // error queue
    SymbolSpec::generic("ERR_get_error"),
    SymbolSpec::generic("ERR_error_string_n"),
    SymbolSpec::generic("RAND_bytes"),
    // digests
    SymbolSpec::generic("EVP_get_digestbyname"),
    SymbolSpec::generic("EVP_sha256"),
    SymbolSpec::generic("EVP_MD_CTX_new"),
    SymbolSpec::generic("EVP_MD_CTX_free"),
    SymbolSpec::generic("EVP_DigestInit_ex"),
    SymbolSpec::generic("EVP_DigestUpdate"),
    SymbolSpec::generic("EVP_DigestFinal_ex"),
    // ciphers
    SymbolSpec::generic("EVP_get_cipherbyname"),
    SymbolSpec::generic("EVP_aes_256_gcm"),
    SymbolSpec::generic("EVP_CIPHER_CTX_new"),
    SymbolSpec::generic("EVP_CIPHER_CTX_free"),
    SymbolSpec::generic("EVP_EncryptInit_ex"),
    SymbolSpec::generic("EVP_EncryptUpdate"),
    SymbolSpec::generic("EVP_EncryptFinal_ex"),
    SymbolSpec::generic("EVP_DecryptInit_ex"),
    SymbolSpec::generic("EVP_DecryptUpdate"),
    SymbolSpec::generic("EVP_DecryptFinal_ex"),
    // key generation
    SymbolSpec::generic("EVP_PKEY_CTX_new_id"),
    SymbolSpec::generic("EVP_PKEY_CTX_free"),
    SymbolSpec::generic("EVP_PKEY_keygen_init"),
    SymbolSpec::generic("EVP_PKEY_keygen"),
    SymbolSpec::generic("EVP_PKEY_free"),
    // 1.1 only
    SymbolSpec::specific("EVP_MD_size"),
    SymbolSpec::specific("EVP_PKEY_bits"),
    SymbolSpec::specific("EVP_CIPHER_CTX_block_size"),
    // 3.x only
    SymbolSpec::specific("OPENSSL_version_major"),
    SymbolSpec::specific("EVP_MD_get_size"),
    SymbolSpec::specific("EVP_PKEY_get_bits"),
    SymbolSpec::specific("EVP_CIPHER_CTX_get_block_size"),
    SymbolSpec::specific("EVP_PKEY_CTX_set_rsa_keygen_bits"),
    SymbolSpec::specific("OSSL_PROVIDER_load"),
    SymbolSpec::specific("OSSL_PROVIDER_available"),
];

/// A validated symbol table plus its init entry.
#[derive(Debug, Clone, Copy)]
pub struct Catalogue {
    entries: &'static [SymbolSpec],
    init: &'static str,
}

impl Catalogue {
    /// Build a catalogue, checking that names are unique and that `init`
    /// names a generic entry.
    pub fn new(
        entries: &'static [SymbolSpec],
        init: &'static str,
    ) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in entries {
            if !seen.insert(entry.name) {
                return Err(CatalogueError::DuplicateSymbol(entry.name));
            }
        }

        match entries.iter().find(|e| e.name == init) {
            None => Err(CatalogueError::MissingInitEntry(init)),
            Some(entry) if !entry.is_generic() => Err(CatalogueError::InitNotGeneric(init)),
            Some(_) => Ok(Self { entries, init }),
        }
    }

    /// The libcrypto catalogue.
    pub fn openssl() -> Self {
        Self {
            entries: OPENSSL_SYMBOLS,
            init: OPENSSL_INIT,
        }
    }

    pub fn entries(&self) -> &'static [SymbolSpec] {
        self.entries
    }

    pub fn init(&self) -> &'static str {
        self.init
    }

    pub fn generic(&self) -> impl Iterator<Item = &'static SymbolSpec> {
        self.entries.iter().filter(|e| e.is_generic())
    }

    pub fn specific(&self) -> impl Iterator<Item = &'static SymbolSpec> {
        self.entries.iter().filter(|e| !e.is_generic())
    }
}
