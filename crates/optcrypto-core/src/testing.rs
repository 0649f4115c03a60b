//! In-memory loader used by the unit tests in this crate.

use std::collections::HashMap;
use std::ffi::c_void;
use std::sync::Mutex;

use crate::loader::{LibraryHandle, LibraryLoader, RawSymbol};

/// A fake library: symbol name -> address.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockLibrary {
    symbols: HashMap<String, usize>,
}

impl MockLibrary {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Export a symbol at a fake address. The address is never called.
    pub(crate) fn export(mut self, name: &str, addr: usize) -> Self {
        self.symbols.insert(name.to_string(), addr);
        self
    }

    /// Export a real function, for entries the runtime will invoke.
    pub(crate) fn export_fn(self, name: &str, f: extern "C" fn()) -> Self {
        self.export(name, f as usize)
    }
}

#[derive(Debug)]
pub(crate) struct MockHandle {
    symbols: HashMap<String, usize>,
}

impl LibraryHandle for MockHandle {
    fn resolve(&self, symbol: &str) -> Option<RawSymbol> {
        self.symbols
            .get(symbol)
            .and_then(|addr| RawSymbol::new(*addr as *mut c_void))
    }
}

/// Loader over a fixed set of fake libraries, recording every open attempt.
#[derive(Debug, Default)]
pub(crate) struct MockLoader {
    libraries: HashMap<String, MockLibrary>,
    attempts: Mutex<Vec<String>>,
}

impl MockLoader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_library(mut self, name: &str, library: MockLibrary) -> Self {
        self.libraries.insert(name.to_string(), library);
        self
    }

    /// Names passed to `open`, in call order.
    pub(crate) fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

impl LibraryLoader for MockLoader {
    type Handle = MockHandle;

    fn open(&self, name: &str) -> Option<MockHandle> {
        self.attempts.lock().unwrap().push(name.to_string());
        self.libraries.get(name).map(|library| MockHandle {
            symbols: library.symbols.clone(),
        })
    }
}

/// Init entry for tests that don't count calls.
pub(crate) extern "C" fn noop_init() {}
