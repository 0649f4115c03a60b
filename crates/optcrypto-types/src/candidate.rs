use serde::{Deserialize, Serialize};

use std::fmt;

/// One library identity tried by the candidate resolver.
///
/// `identifier` is the platform-specific library name handed to the OS
/// loader (e.g. `libcrypto.so.3`). Some legacy builds split the API across
/// several modules; those extra modules are listed in `companions` and must
/// all open for the candidate to count as opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryCandidate {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub companions: Vec<String>,
}

impl LibraryCandidate {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            companions: Vec::new(),
        }
    }

    /// Add a companion module searched after the primary one.
    pub fn with_companion(mut self, module: impl Into<String>) -> Self {
        self.companions.push(module.into());
        self
    }

    /// All module names in lookup order, primary first.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.identifier.as_str()).chain(self.companions.iter().map(String::as_str))
    }
}

impl fmt::Display for LibraryCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)?;
        for companion in &self.companions {
            write!(f, "+{companion}")?;
        }
        Ok(())
    }
}
