//! Library loader trait definitions.
//!
//! The OS-specific half of symbol binding. Implementations must treat a
//! missing library or a missing symbol as a normal outcome and report it as
//! `None`; neither case may panic or surface an error.

use std::ffi::c_void;
use std::ptr::NonNull;

/// Address of a resolved symbol. Never null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSymbol(NonNull<c_void>);

// SAFETY: a RawSymbol is the address of code or data inside a loaded library.
// It carries no ownership and is only dereferenced through `unsafe` casts.
unsafe impl Send for RawSymbol {}
unsafe impl Sync for RawSymbol {}

impl RawSymbol {
    /// Wrap a looked-up address. A null address counts as "not resolved".
    pub fn new(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// An opened dynamic library.
pub trait LibraryHandle: Send + Sync {
    /// Look up an exported symbol by name.
    fn resolve(&self, symbol: &str) -> Option<RawSymbol>;
}

/// Opens dynamic libraries by name.
pub trait LibraryLoader: Send + Sync {
    type Handle: LibraryHandle;

    /// Open a library by platform-specific name or path.
    /// Returns None if the library is absent or cannot be loaded.
    fn open(&self, name: &str) -> Option<Self::Handle>;
}
