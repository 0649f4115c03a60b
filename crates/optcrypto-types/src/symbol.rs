use serde::Serialize;

use std::fmt;

/// Whether a catalogue entry must resolve for the feature to be usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolCategory {
    /// Mandatory. One unresolved generic entry keeps the feature disabled.
    Generic,
    /// Best-effort. Usually exists in only one major version of the library.
    Specific,
}

impl fmt::Display for SymbolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolCategory::Generic => write!(f, "generic"),
            SymbolCategory::Specific => write!(f, "specific"),
        }
    }
}

/// One entry of a symbol catalogue: an exported function name and its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolSpec {
    pub name: &'static str,
    pub category: SymbolCategory,
}

impl SymbolSpec {
    pub const fn generic(name: &'static str) -> Self {
        Self {
            name,
            category: SymbolCategory::Generic,
        }
    }

    pub const fn specific(name: &'static str) -> Self {
        Self {
            name,
            category: SymbolCategory::Specific,
        }
    }

    pub fn is_generic(&self) -> bool {
        self.category == SymbolCategory::Generic
    }
}
