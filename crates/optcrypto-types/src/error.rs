use thiserror::Error;

/// Reasons a binding attempt left the feature disabled.
///
/// These never cross `CryptoRuntime::initialize()`. The runtime records them
/// through `tracing` and collapses them into the readiness flag.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("optional cryptography disabled by configuration")]
    Disabled,

    #[error("no candidate library could be opened (tried: {})", .tried.join(", "))]
    LibraryNotFound { tried: Vec<String> },

    #[error("{candidate} is missing required symbols: {}", .symbols.join(", "))]
    SymbolsMissing {
        candidate: String,
        symbols: Vec<&'static str>,
    },
}

/// Structural problems in a symbol catalogue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("symbol '{0}' appears more than once")]
    DuplicateSymbol(&'static str),

    #[error("init entry '{0}' is not in the catalogue")]
    MissingInitEntry(&'static str),

    #[error("init entry '{0}' must be generic")]
    InitNotGeneric(&'static str),
}
