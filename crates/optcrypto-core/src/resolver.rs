//! Candidate resolution -- opens the first library candidate that loads.
//!
//! Candidates are ordered by precedence (first match wins). They usually
//! name mutually ABI-incompatible major versions of the same library, so the
//! first one that opens decides which symbol set gets bound; symbols are
//! never mixed across candidates.

use optcrypto_types::candidate::LibraryCandidate;

use crate::loader::{LibraryHandle, LibraryLoader, RawSymbol};

/// A candidate whose modules all opened.
///
/// Lookups search the modules in order (primary first) and return the first
/// hit. All handles stay open for as long as this value lives.
pub struct OpenedLibrary<H> {
    candidate: LibraryCandidate,
    modules: Vec<H>,
}

impl<H: LibraryHandle> OpenedLibrary<H> {
    pub fn candidate(&self) -> &LibraryCandidate {
        &self.candidate
    }

    /// Resolve a symbol across this candidate's modules.
    pub fn resolve(&self, symbol: &str) -> Option<RawSymbol> {
        self.modules.iter().find_map(|module| module.resolve(symbol))
    }
}

impl<H> std::fmt::Debug for OpenedLibrary<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedLibrary")
            .field("candidate", &self.candidate)
            .field("modules", &self.modules.len())
            .finish()
    }
}

/// Try each candidate in order and return the first one that opens.
///
/// Returns None when no candidate opens. That is the expected degraded state
/// on hosts without the library, not an error.
pub fn open_first<L: LibraryLoader>(
    loader: &L,
    candidates: &[LibraryCandidate],
) -> Option<OpenedLibrary<L::Handle>> {
    candidates.iter().find_map(|candidate| open_candidate(loader, candidate))
}

/// Open every module of one candidate, or none of them.
fn open_candidate<L: LibraryLoader>(
    loader: &L,
    candidate: &LibraryCandidate,
) -> Option<OpenedLibrary<L::Handle>> {
    let mut modules = Vec::with_capacity(1 + candidate.companions.len());

    for name in candidate.modules() {
        match loader.open(name) {
            Some(handle) => modules.push(handle),
            None => {
                tracing::debug!(candidate = %candidate, module = name, "candidate library not loadable");
                // Handles opened so far are dropped here, so a half-opened
                // candidate does not stay resident.
                return None;
            }
        }
    }

    tracing::debug!(candidate = %candidate, "opened candidate library");
    Some(OpenedLibrary {
        candidate: candidate.clone(),
        modules,
    })
}
