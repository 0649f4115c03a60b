//! Default library candidates per platform.
//!
//! The lists are ordered by precedence (first match wins). Each entry is an
//! ABI-incompatible major version of libcrypto; the resolver binds against
//! whichever opens first and never mixes symbols between them.
//!
//! Default order: `[1.1, 3]`, plus the split `ssleay32`/`libeay32` build on Windows.

use optcrypto_types::candidate::LibraryCandidate;

/// Build the default candidate list for the current platform.
pub fn platform_candidates() -> Vec<LibraryCandidate> {
    let mut candidates = Vec::new();

    #[cfg(target_os = "windows")]
    {
        candidates.push(LibraryCandidate::new("libcrypto-1_1-x64.dll"));
        candidates.push(LibraryCandidate::new("libcrypto-3-x64.dll"));
        // Pre-1.1 builds export the API from two modules
        candidates.push(LibraryCandidate::new("ssleay32.dll").with_companion("libeay32.dll"));
    }

    #[cfg(target_os = "macos")]
    {
        candidates.push(LibraryCandidate::new("libcrypto.1.1.dylib"));
        candidates.push(LibraryCandidate::new("libcrypto.3.dylib"));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        candidates.push(LibraryCandidate::new("libcrypto.so.1.1"));
        candidates.push(LibraryCandidate::new("libcrypto.so.3"));
    }

    candidates
}
