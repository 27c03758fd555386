//! Error types for symbol table lookups.
//!
//! Nothing in the subclass pipeline fails on its own; absence is modeled
//! with `Option`. These errors come from the symbol table collaborator and
//! are propagated unchanged by callers.

use crate::symbol::{FileId, Symbol};
use thiserror::Error;

/// Errors raised by a [`SymbolTable`](crate::SymbolTable) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineageError {
    /// The symbol is not known to the table.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(Symbol),

    /// A location points at a file the table cannot render.
    #[error("unknown file: {0}")]
    UnknownFile(FileId),

    /// The symbol has no declaration location to fall back on.
    #[error("symbol {0} has no declaration location")]
    MissingLocation(Symbol),
}

/// Result alias used throughout Lineage.
pub type Result<T> = std::result::Result<T, LineageError>;
