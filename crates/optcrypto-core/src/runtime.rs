//! The optional-cryptography runtime.
//!
//! `CryptoRuntime` ties the pieces together: it asks the resolver for the
//! first candidate library that opens, binds the whole catalogue against it,
//! and flips the readiness flag only when every generic entry resolved and
//! the library's init entry point has been called.
//!
//! Every failure path degrades to "feature unavailable". Nothing here
//! returns an error or panics on a missing library or symbol; the reason is
//! recorded through `tracing` and callers only ever observe a boolean.
//!
//! # Concurrency
//!
//! Binding happens at most once per runtime, guarded by a `OnceLock`.
//! Concurrent `initialize()` callers block until the single binding attempt
//! finishes and then all observe the same state. The readiness flag is
//! published with release ordering only after the `OnceLock` holds the
//! binding, so a reader that sees `true` also sees the fully populated slot
//! table. While the init entry point runs the flag is still `false`.

use std::ffi::c_void;
use std::marker::PhantomData;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use optcrypto_types::binding::BindingSummary;
use optcrypto_types::candidate::LibraryCandidate;
use optcrypto_types::error::BindError;
use optcrypto_types::symbol::SymbolCategory;

use crate::catalogue::Catalogue;
use crate::loader::{LibraryLoader, RawSymbol};
use crate::resolver::{OpenedLibrary, open_first};
use crate::table::FunctionTable;

/// Signature of the library init entry point (`void OPENSSL_init(void)`).
type InitFn = unsafe extern "C" fn();

/// The library handle and the slots resolved against it.
struct Binding<H> {
    library: OpenedLibrary<H>,
    table: FunctionTable,
    /// Every generic entry resolved and the init entry point was called.
    ready: bool,
}

/// A resolved slot, borrowed from the runtime that owns the library handle.
#[derive(Debug, Clone, Copy)]
pub struct BoundSymbol<'a> {
    raw: RawSymbol,
    _runtime: PhantomData<&'a ()>,
}

impl BoundSymbol<'_> {
    pub fn as_ptr(&self) -> *mut c_void {
        self.raw.as_ptr()
    }

    /// Reinterpret the symbol address as a function pointer.
    ///
    /// # Safety
    ///
    /// `F` must be an `extern "C"` function pointer type whose signature
    /// matches the exported function.
    pub unsafe fn cast<F: Copy>(&self) -> F {
        const {
            assert!(
                std::mem::size_of::<F>() == std::mem::size_of::<*mut c_void>(),
                "BoundSymbol::cast target must be pointer-sized"
            )
        };
        let ptr = self.raw.as_ptr();
        // SAFETY: caller guarantees F is a pointer-sized fn pointer type.
        unsafe { std::mem::transmute_copy::<*mut c_void, F>(&ptr) }
    }
}

/// Process-wide optional cryptography state, constructed explicitly and
/// shared by reference (usually behind an `Arc`).
pub struct CryptoRuntime<L: LibraryLoader> {
    loader: L,
    candidates: Vec<LibraryCandidate>,
    catalogue: Catalogue,
    enabled: bool,
    binding: OnceLock<Option<Binding<L::Handle>>>,
    available: AtomicBool,
}

impl<L: LibraryLoader> CryptoRuntime<L> {
    /// Create an uninitialized runtime. Nothing is loaded until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(loader: L, candidates: Vec<LibraryCandidate>, catalogue: Catalogue) -> Self {
        Self {
            loader,
            candidates,
            catalogue,
            enabled: true,
            binding: OnceLock::new(),
            available: AtomicBool::new(false),
        }
    }

    /// When disabled, `initialize()` never touches the loader.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Discover and bind the library, once.
    ///
    /// Later calls (including concurrent ones) do not retry; they wait for
    /// the first attempt and return its result. Returns the readiness flag.
    pub fn initialize(&self) -> bool {
        let ready = self
            .binding
            .get_or_init(|| self.bind())
            .as_ref()
            .is_some_and(|binding| binding.ready);
        if ready {
            self.available.store(true, Ordering::Release);
        }
        ready
    }

    /// The readiness flag. Bound functions must not be called unless this is true.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    /// Whether `initialize()` has completed, regardless of its outcome.
    pub fn is_initialized(&self) -> bool {
        self.binding.get().is_some()
    }

    pub fn candidates(&self) -> &[LibraryCandidate] {
        &self.candidates
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Candidate whose library was opened, if any.
    pub fn opened_candidate(&self) -> Option<&LibraryCandidate> {
        self.current().map(|binding| binding.library.candidate())
    }

    /// Resolved slot for `name`.
    ///
    /// None while the feature is unavailable, and for specific entries the
    /// opened library does not export.
    pub fn symbol(&self, name: &str) -> Option<BoundSymbol<'_>> {
        if !self.is_available() {
            return None;
        }
        self.current()?.table.get(name).map(|raw| BoundSymbol {
            raw,
            _runtime: PhantomData,
        })
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.symbol(name).is_some()
    }

    /// Snapshot of the binding state for diagnostics.
    pub fn summary(&self) -> BindingSummary {
        match self.current() {
            Some(binding) => BindingSummary {
                available: self.is_available(),
                candidate: Some(binding.library.candidate().to_string()),
                slots: binding.table.statuses(),
            },
            None => BindingSummary::default(),
        }
    }

    fn current(&self) -> Option<&Binding<L::Handle>> {
        self.binding.get().and_then(Option::as_ref)
    }

    /// The single binding attempt. Keeps the handle open whenever a library
    /// opened, even if generic entries were missing.
    fn bind(&self) -> Option<Binding<L::Handle>> {
        let _span = tracing::debug_span!("optcrypto_bind").entered();

        if !self.enabled {
            tracing::debug!(reason = %BindError::Disabled, "optional cryptography unavailable");
            return None;
        }

        let Some(library) = open_first(&self.loader, &self.candidates) else {
            let err = BindError::LibraryNotFound {
                tried: self.candidates.iter().map(ToString::to_string).collect(),
            };
            tracing::debug!(reason = %err, "optional cryptography unavailable");
            return None;
        };

        let table = FunctionTable::bind(&self.catalogue, &library);

        if !table.all_generic_resolved() {
            let err = BindError::SymbolsMissing {
                candidate: library.candidate().to_string(),
                symbols: table.unresolved(SymbolCategory::Generic),
            };
            tracing::debug!(reason = %err, "optional cryptography unavailable");
            return Some(Binding {
                library,
                table,
                ready: false,
            });
        }

        let partial = table.unresolved(SymbolCategory::Specific);
        if !partial.is_empty() {
            tracing::debug!(
                candidate = %library.candidate(),
                unresolved = ?partial,
                "specific symbols left unbound"
            );
        }

        // The init entry is generic, so it resolved above. Its return value
        // is not inspected: OPENSSL_init returns void, and an init failure
        // inside the library is indistinguishable from success at this layer.
        if let Some(init) = table.get(self.catalogue.init()) {
            // SAFETY: the catalogue's init entry is declared `void (*)(void)`.
            unsafe {
                let init: InitFn = std::mem::transmute::<*mut c_void, InitFn>(init.as_ptr());
                init();
            }
        }

        tracing::info!(
            candidate = %library.candidate(),
            bound = table.slots().len() - partial.len(),
            "optional cryptography available"
        );

        Some(Binding {
            library,
            table,
            ready: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockLibrary, MockLoader, noop_init};
    use optcrypto_types::symbol::SymbolSpec;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Mutex};

    static INIT_ONLY: &[SymbolSpec] = &[SymbolSpec::generic("OPENSSL_init")];

    static INIT_AND_FOO: &[SymbolSpec] = &[
        SymbolSpec::generic("OPENSSL_init"),
        SymbolSpec::generic("EVP_foo"),
    ];

    static INIT_AND_BAR: &[SymbolSpec] = &[
        SymbolSpec::generic("OPENSSL_init"),
        SymbolSpec::specific("EVP_bar"),
    ];

    fn catalogue(entries: &'static [SymbolSpec]) -> Catalogue {
        Catalogue::new(entries, "OPENSSL_init").unwrap()
    }

    fn candidates(names: &[&str]) -> Vec<LibraryCandidate> {
        names.iter().map(|n| LibraryCandidate::new(*n)).collect()
    }

    #[test]
    fn test_uninitialized_runtime_is_unavailable() {
        let runtime = CryptoRuntime::new(
            MockLoader::new(),
            candidates(&["lib.so.3"]),
            catalogue(INIT_ONLY),
        );

        assert!(!runtime.is_available());
        assert!(!runtime.is_initialized());
        assert!(runtime.symbol("OPENSSL_init").is_none());
        assert!(!runtime.summary().available);
    }

    #[test]
    fn test_later_candidate_bound_when_first_absent() {
        static INIT_CALLS: AtomicUsize = AtomicUsize::new(0);
        extern "C" fn counting_init() {
            INIT_CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let loader = MockLoader::new()
            .with_library("lib.so.3", MockLibrary::new().export_fn("OPENSSL_init", counting_init));
        let runtime = CryptoRuntime::new(
            loader,
            candidates(&["lib.so.1.1", "lib.so.3"]),
            catalogue(INIT_ONLY),
        );

        assert!(runtime.initialize());
        assert!(runtime.is_available());
        assert_eq!(INIT_CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(runtime.opened_candidate().unwrap().identifier, "lib.so.3");
        assert_eq!(
            runtime.symbol("OPENSSL_init").unwrap().as_ptr() as usize,
            counting_init as extern "C" fn() as usize
        );
    }

    #[test]
    fn test_missing_generic_keeps_feature_off() {
        static INIT_CALLS: AtomicUsize = AtomicUsize::new(0);
        extern "C" fn counting_init() {
            INIT_CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let loader = MockLoader::new()
            .with_library("lib.so.3", MockLibrary::new().export_fn("OPENSSL_init", counting_init));
        let runtime = CryptoRuntime::new(loader, candidates(&["lib.so.3"]), catalogue(INIT_AND_FOO));

        assert!(!runtime.initialize());
        assert_eq!(INIT_CALLS.load(Ordering::SeqCst), 0);
        // Nothing is handed out while unavailable, not even resolved slots
        assert!(runtime.symbol("OPENSSL_init").is_none());

        let summary = runtime.summary();
        assert!(!summary.available);
        assert_eq!(summary.candidate.as_deref(), Some("lib.so.3"));
        assert_eq!(summary.unresolved(SymbolCategory::Generic), vec!["EVP_foo"]);
    }

    #[test]
    fn test_missing_specific_still_available() {
        let loader = MockLoader::new()
            .with_library("lib.so.3", MockLibrary::new().export_fn("OPENSSL_init", noop_init));
        let runtime = CryptoRuntime::new(loader, candidates(&["lib.so.3"]), catalogue(INIT_AND_BAR));

        assert!(runtime.initialize());
        assert!(runtime.is_bound("OPENSSL_init"));
        assert!(!runtime.is_bound("EVP_bar"));
        assert!(runtime.symbol("EVP_bar").is_none());
        assert_eq!(
            runtime.summary().unresolved(SymbolCategory::Specific),
            vec!["EVP_bar"]
        );
    }

    #[test]
    fn test_specific_entries_do_not_rescue_missing_generic() {
        static ENTRIES: &[SymbolSpec] = &[
            SymbolSpec::generic("OPENSSL_init"),
            SymbolSpec::generic("EVP_foo"),
            SymbolSpec::specific("EVP_bar"),
            SymbolSpec::specific("EVP_baz"),
        ];
        let loader = MockLoader::new().with_library(
            "lib.so.3",
            MockLibrary::new()
                .export_fn("OPENSSL_init", noop_init)
                .export("EVP_bar", 0x20)
                .export("EVP_baz", 0x21),
        );
        let runtime = CryptoRuntime::new(loader, candidates(&["lib.so.3"]), catalogue(ENTRIES));

        assert!(!runtime.initialize());
        assert_eq!(runtime.summary().resolved_count(), 3);
    }

    #[test]
    fn test_first_opened_candidate_decides_even_if_incomplete() {
        // The older library opens but lacks EVP_foo. The newer one is never
        // consulted, so no symbols are mixed across versions.
        let loader = MockLoader::new()
            .with_library("lib.so.1.1", MockLibrary::new().export_fn("OPENSSL_init", noop_init))
            .with_library(
                "lib.so.3",
                MockLibrary::new()
                    .export_fn("OPENSSL_init", noop_init)
                    .export("EVP_foo", 0x30),
            );
        let runtime = CryptoRuntime::new(
            loader,
            candidates(&["lib.so.1.1", "lib.so.3"]),
            catalogue(INIT_AND_FOO),
        );

        assert!(!runtime.initialize());
        assert_eq!(runtime.opened_candidate().unwrap().identifier, "lib.so.1.1");
    }

    #[test]
    fn test_symbols_come_from_one_candidate() {
        static ENTRIES: &[SymbolSpec] = &[
            SymbolSpec::generic("OPENSSL_init"),
            SymbolSpec::generic("RAND_bytes"),
        ];
        let loader = MockLoader::new().with_library(
            "lib.so.3",
            MockLibrary::new()
                .export_fn("OPENSSL_init", noop_init)
                .export("RAND_bytes", 0x3003),
        );
        let runtime = CryptoRuntime::new(
            loader,
            candidates(&["lib.so.1.1", "lib.so.3"]),
            catalogue(ENTRIES),
        );

        assert!(runtime.initialize());
        assert_eq!(runtime.symbol("RAND_bytes").unwrap().as_ptr() as usize, 0x3003);
    }

    #[test]
    fn test_no_library_is_silent_and_repeatable() {
        let loader = MockLoader::new();
        let runtime = CryptoRuntime::new(
            loader,
            candidates(&["lib.so.1.1", "lib.so.3"]),
            catalogue(INIT_ONLY),
        );

        assert!(!runtime.initialize());
        assert!(runtime.is_initialized());
        assert!(runtime.opened_candidate().is_none());

        // Second call: same outcome, no second round of open attempts
        assert!(!runtime.initialize());
        assert_eq!(runtime.loader.attempts(), vec!["lib.so.1.1", "lib.so.3"]);
        assert!(runtime.summary().slots.is_empty());
    }

    #[test]
    fn test_disabled_runtime_never_opens() {
        let loader = MockLoader::new()
            .with_library("lib.so.3", MockLibrary::new().export_fn("OPENSSL_init", noop_init));
        let runtime = CryptoRuntime::new(loader, candidates(&["lib.so.3"]), catalogue(INIT_ONLY))
            .with_enabled(false);

        assert!(!runtime.initialize());
        assert!(runtime.loader.attempts().is_empty());
    }

    #[test]
    fn test_init_called_once_across_repeated_initialize() {
        static INIT_CALLS: AtomicUsize = AtomicUsize::new(0);
        extern "C" fn counting_init() {
            INIT_CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let loader = MockLoader::new()
            .with_library("lib.so.3", MockLibrary::new().export_fn("OPENSSL_init", counting_init));
        let runtime = CryptoRuntime::new(loader, candidates(&["lib.so.3"]), catalogue(INIT_ONLY));

        for _ in 0..3 {
            assert!(runtime.initialize());
        }
        assert_eq!(INIT_CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_initialize_binds_once() {
        static INIT_CALLS: AtomicUsize = AtomicUsize::new(0);
        extern "C" fn counting_init() {
            INIT_CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let loader = MockLoader::new()
            .with_library("lib.so.3", MockLibrary::new().export_fn("OPENSSL_init", counting_init));
        let runtime = Arc::new(CryptoRuntime::new(
            loader,
            candidates(&["lib.so.1.1", "lib.so.3"]),
            catalogue(INIT_ONLY),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let runtime = Arc::clone(&runtime);
                std::thread::spawn(move || runtime.initialize())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(INIT_CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(runtime.loader.attempts(), vec!["lib.so.1.1", "lib.so.3"]);
    }

    #[test]
    fn test_flag_never_ahead_of_slot_table() {
        static RUNTIME: OnceLock<CryptoRuntime<MockLoader>> = OnceLock::new();
        static SEEN_DURING_INIT: Mutex<Option<(bool, bool, bool)>> = Mutex::new(None);

        // Runs inside the binding attempt, before the slot table is stored
        extern "C" fn observing_init() {
            let runtime = RUNTIME.get().unwrap();
            *SEEN_DURING_INIT.lock().unwrap() = Some((
                runtime.is_available(),
                runtime.symbol("OPENSSL_init").is_some(),
                runtime.summary().available,
            ));
        }

        let loader = MockLoader::new()
            .with_library("lib.so.3", MockLibrary::new().export_fn("OPENSSL_init", observing_init));
        let runtime = RUNTIME.get_or_init(|| {
            CryptoRuntime::new(loader, candidates(&["lib.so.3"]), catalogue(INIT_ONLY))
        });

        assert!(runtime.initialize());
        assert_eq!(*SEEN_DURING_INIT.lock().unwrap(), Some((false, false, false)));

        // Once the flag is up, the slots and summary agree with it
        assert!(runtime.is_available());
        assert!(runtime.symbol("OPENSSL_init").is_some());
        assert!(runtime.summary().available);
    }

    #[test]
    fn test_cast_calls_bound_function() {
        extern "C" fn answer() -> i32 {
            42
        }
        static ENTRIES: &[SymbolSpec] = &[
            SymbolSpec::generic("OPENSSL_init"),
            SymbolSpec::specific("OPENSSL_version_major"),
        ];
        let loader = MockLoader::new().with_library(
            "lib.so.3",
            MockLibrary::new()
                .export_fn("OPENSSL_init", noop_init)
                .export(
                    "OPENSSL_version_major",
                    answer as extern "C" fn() -> i32 as usize,
                ),
        );
        let runtime = CryptoRuntime::new(loader, candidates(&["lib.so.3"]), catalogue(ENTRIES));
        assert!(runtime.initialize());

        let symbol = runtime.symbol("OPENSSL_version_major").unwrap();
        let f = unsafe { symbol.cast::<unsafe extern "C" fn() -> i32>() };
        assert_eq!(unsafe { f() }, 42);
    }
}
