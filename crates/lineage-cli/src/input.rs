//! The analysis dump consumed by `lineage report`.
//!
//! The resolver that owns symbols writes one JSON document holding its
//! symbol table and every parsed file:
//!
//! ```json
//! {
//!   "symbols": { "files": ["app/dog.rb"], "symbols": [{ "name": "Dog", "kind": "class" }] },
//!   "files": [{ "path": "app/dog.rb", "definitions": [], "references": [] }]
//! }
//! ```

use crate::config::{read_json, ConfigError};
use lineage_core::{GlobalSymbols, ParsedFile, Symbol, SymbolTable};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub symbols: GlobalSymbols,
    #[serde(default)]
    pub files: Vec<ParsedFile>,
}

impl AnalysisInput {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_json(path)
    }

    /// Resolves requested parent names, warning about and dropping the
    /// ones the symbol table doesn't know.
    pub fn resolve_parents(&self, names: &[String]) -> Vec<Symbol> {
        names
            .iter()
            .filter_map(|name| {
                let found = self
                    .symbols
                    .lookup_qualified(name)
                    .map(|sym| self.symbols.dealias(sym));
                if found.is_none() {
                    warn!(%name, "requested parent is not a known constant");
                }
                found
            })
            .collect()
    }
}
