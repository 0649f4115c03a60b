//! Read-only snapshots of a binding attempt, for diagnostics and display.
//!
//! A summary never carries a failure reason. Callers see whether the feature
//! is available, which candidate was opened, and which slots resolved.

use serde::Serialize;

use crate::symbol::SymbolCategory;

/// Resolution state of one function slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    pub name: &'static str,
    pub category: SymbolCategory,
    pub resolved: bool,
}

/// Snapshot of a runtime after (or before) initialization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BindingSummary {
    /// The readiness flag.
    pub available: bool,
    /// Display form of the candidate whose handle the slots were resolved against.
    pub candidate: Option<String>,
    /// One entry per catalogue entry, in catalogue order. Empty if no library opened.
    pub slots: Vec<SlotStatus>,
}

impl BindingSummary {
    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|s| s.resolved).count()
    }

    /// Names of unresolved slots in the given category.
    pub fn unresolved(&self, category: SymbolCategory) -> Vec<&'static str> {
        self.slots
            .iter()
            .filter(|s| s.category == category && !s.resolved)
            .map(|s| s.name)
            .collect()
    }
}
