//! Lineage Core - symbol model for subclass reporting
//!
//! This crate defines the identities (`Symbol`, `FileId`, `Location`) and
//! per-file parser output (`ParsedFile`, `Reference`) that the subclass
//! pipeline works on, plus the `SymbolTable` trait through which it talks
//! to the resolver that owns those symbols.
//!
//! `GlobalSymbols` is a plain in-memory `SymbolTable`, loadable from JSON,
//! used by the CLI and by tests.
//!
//! # Example
//!
//! ```
//! use lineage_core::{ClassKind, GlobalSymbols, Location, SymbolTable};
//!
//! let mut symbols = GlobalSymbols::new();
//! let file = symbols.add_file("app/animal.rb");
//! let animal = symbols.enter("Zoo::Animal", ClassKind::Class, Some(Location::new(file, 0, 12)));
//!
//! assert_eq!(symbols.lookup_qualified("Zoo::Animal"), Some(animal));
//! assert_eq!(symbols.show(animal).unwrap(), "Zoo::Animal");
//! ```

mod error;
mod reference;
mod symbol;
mod symbol_table;

pub use error::{LineageError, Result};
pub use reference::{Definition, DefinitionRef, ParsedFile, Reference};
pub use symbol::{ClassKind, FileId, Location, Symbol};
pub use symbol_table::{GlobalSymbols, SymbolData, SymbolTable, SymbolTableData};
