//! Per-file parser output consumed by the subclass collector.

use crate::symbol::{ClassKind, Location, Symbol};
use serde::{Deserialize, Serialize};

/// Index into a [`ParsedFile`]'s definition list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionRef(u32);

impl DefinitionRef {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A class or module definition seen in a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Definition {
    pub symbol: Symbol,
}

/// A constant reference seen in a file.
///
/// When `parent_of` is set, the reference appears as the superclass (or an
/// included module) of the definition it points at: `class Dog < Animal`
/// yields a reference to `Animal` whose `parent_of` is the `Dog`
/// definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub symbol: Symbol,
    #[serde(default)]
    pub parent_of: Option<DefinitionRef>,
    #[serde(default)]
    pub parent_kind: ClassKind,
    pub definition_loc: Location,
}

/// All definitions and references of one source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedFile {
    /// Path relative to the project root, without a leading `/`.
    pub path: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl ParsedFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Adds a definition and returns a handle to it.
    pub fn define(&mut self, symbol: Symbol) -> DefinitionRef {
        self.definitions.push(Definition { symbol });
        DefinitionRef::new((self.definitions.len() - 1) as u32)
    }

    /// Records that `parent` is the superclass or mixin of `child`.
    pub fn inherit(
        &mut self,
        parent: Symbol,
        parent_kind: ClassKind,
        child: DefinitionRef,
        loc: Location,
    ) {
        self.references.push(Reference {
            symbol: parent,
            parent_of: Some(child),
            parent_kind,
            definition_loc: loc,
        });
    }

    /// Records a plain constant use.
    pub fn reference(&mut self, symbol: Symbol, loc: Location) {
        self.references.push(Reference {
            symbol,
            parent_of: None,
            parent_kind: ClassKind::default(),
            definition_loc: loc,
        });
    }

    pub fn definition(&self, def: DefinitionRef) -> Option<&Definition> {
        self.definitions.get(def.index())
    }
}
