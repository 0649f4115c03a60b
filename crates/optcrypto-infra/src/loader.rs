//! OS dynamic library loader built on `libloading`.
//!
//! - Unix: `dlopen(name, RTLD_NOW | RTLD_LOCAL)` + `dlsym`
//! - Windows: `LoadLibraryExW` + `GetProcAddress`
//!
//! Binding is eager on Unix so a library whose own dependencies are missing
//! fails at open time and the resolver moves on to the next candidate.

use std::ffi::c_void;

use libloading::Library;

use optcrypto_core::loader::{LibraryHandle, LibraryLoader, RawSymbol};

/// Loader backed by the platform's dynamic linker.
#[derive(Debug, Default, Clone, Copy)]
pub struct DlopenLoader;

impl DlopenLoader {
    pub fn new() -> Self {
        Self
    }
}

/// An open library. Dropping it unloads the library.
#[derive(Debug)]
pub struct DlopenHandle {
    library: Library,
}

#[cfg(unix)]
fn load(name: &str) -> Result<Library, libloading::Error> {
    use libloading::os::unix::{Library as UnixLibrary, RTLD_LOCAL, RTLD_NOW};

    // SAFETY: opening a library runs its initializers. Candidates name
    // system crypto libraries whose initializers have no preconditions.
    unsafe { UnixLibrary::open(Some(name), RTLD_NOW | RTLD_LOCAL) }.map(Library::from)
}

#[cfg(not(unix))]
fn load(name: &str) -> Result<Library, libloading::Error> {
    // SAFETY: see the unix variant.
    unsafe { Library::new(name) }
}

impl LibraryLoader for DlopenLoader {
    type Handle = DlopenHandle;

    fn open(&self, name: &str) -> Option<DlopenHandle> {
        match load(name) {
            Ok(library) => Some(DlopenHandle { library }),
            Err(err) => {
                tracing::trace!(library = name, error = %err, "dynamic library open failed");
                None
            }
        }
    }
}

impl LibraryHandle for DlopenHandle {
    fn resolve(&self, symbol: &str) -> Option<RawSymbol> {
        // SAFETY: the symbol is read as an untyped address and not called here.
        let address = unsafe { self.library.get::<*mut c_void>(symbol.as_bytes()) }.ok()?;
        RawSymbol::new(*address)
    }
}
