//! Function slot table.
//!
//! One slot per catalogue entry, filled by resolving the entry against a
//! single opened library. The table is written once and read-only afterwards.

use optcrypto_types::binding::SlotStatus;
use optcrypto_types::symbol::{SymbolCategory, SymbolSpec};

use crate::catalogue::Catalogue;
use crate::loader::{LibraryHandle, RawSymbol};
use crate::resolver::OpenedLibrary;

/// A catalogue entry and the address it resolved to, if any.
#[derive(Debug, Clone, Copy)]
pub struct FunctionSlot {
    pub spec: SymbolSpec,
    pub pointer: Option<RawSymbol>,
}

impl FunctionSlot {
    pub fn is_resolved(&self) -> bool {
        self.pointer.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct FunctionTable {
    slots: Vec<FunctionSlot>,
}

impl FunctionTable {
    /// Resolve every catalogue entry against `library`.
    ///
    /// All entries are looked up even after a generic entry misses, so the
    /// table always reflects the complete catalogue.
    pub fn bind<H: LibraryHandle>(catalogue: &Catalogue, library: &OpenedLibrary<H>) -> Self {
        let slots = catalogue
            .entries()
            .iter()
            .map(|spec| {
                let pointer = library.resolve(spec.name);
                if pointer.is_none() {
                    tracing::debug!(
                        symbol = spec.name,
                        category = %spec.category,
                        candidate = %library.candidate(),
                        "symbol not exported"
                    );
                }
                FunctionSlot {
                    spec: *spec,
                    pointer,
                }
            })
            .collect();

        Self { slots }
    }

    pub fn slots(&self) -> &[FunctionSlot] {
        &self.slots
    }

    /// Resolved address of the named entry.
    pub fn get(&self, name: &str) -> Option<RawSymbol> {
        self.slots
            .iter()
            .find(|slot| slot.spec.name == name)
            .and_then(|slot| slot.pointer)
    }

    /// True when every generic slot holds a non-null address.
    pub fn all_generic_resolved(&self) -> bool {
        self.slots
            .iter()
            .filter(|slot| slot.spec.is_generic())
            .all(FunctionSlot::is_resolved)
    }

    /// Names of unresolved entries in `category`, in catalogue order.
    pub fn unresolved(&self, category: SymbolCategory) -> Vec<&'static str> {
        self.slots
            .iter()
            .filter(|slot| slot.spec.category == category && !slot.is_resolved())
            .map(|slot| slot.spec.name)
            .collect()
    }

    pub fn statuses(&self) -> Vec<SlotStatus> {
        self.slots
            .iter()
            .map(|slot| SlotStatus {
                name: slot.spec.name,
                category: slot.spec.category,
                resolved: slot.is_resolved(),
            })
            .collect()
    }
}
