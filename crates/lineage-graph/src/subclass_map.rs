//! Parent-to-children maps and the location merge policy.
//!
//! A `SubclassMap` records, for every parent class or module, the
//! IMMEDIATE children seen declaring it. A `DescendantsMap` has the same
//! shape but each entry holds the TRANSITIVE descendant set. They are kept
//! as separate types so one can't be passed where the other is expected.

use lineage_core::{ClassKind, Location, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::{self, HashMap};
use tracing::debug;

/// Canonical declaration site chosen so far for one parent/child edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildInfo {
    pub defining_loc: Option<Location>,
}

impl ChildInfo {
    pub fn new(loc: Location) -> Self {
        Self {
            defining_loc: Some(loc),
        }
    }

    /// Keeps whichever location comes first by `(file, begin)`.
    ///
    /// On an exact tie the existing location stays, so merging is
    /// idempotent and independent of order.
    pub fn merge_defining_loc(&mut self, candidate: Location) {
        match self.defining_loc {
            Some(existing) if existing <= candidate => {}
            _ => self.defining_loc = Some(candidate),
        }
    }
}

/// Children (or descendants) of one parent.
pub type Entries = HashMap<Symbol, ChildInfo>;

/// Merges every entry of `src` into `dest`.
///
/// Every child of `src` gets a key in `dest`; only located entries take
/// part in the location merge.
pub fn merge_entries(dest: &mut Entries, src: &Entries) {
    for (sym, info) in src {
        let existing = dest.entry(*sym).or_default();
        if let Some(loc) = info.defining_loc {
            existing.merge_defining_loc(loc);
        }
    }
}

/// A parent's declared kind plus its recorded children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub kind: ClassKind,
    pub entries: Entries,
}

impl NodeInfo {
    pub fn new(kind: ClassKind) -> Self {
        Self {
            kind,
            entries: Entries::new(),
        }
    }

    /// Sets the kind; the last observation wins.
    pub(crate) fn observe_kind(&mut self, parent: Symbol, kind: ClassKind) {
        if self.kind != kind {
            debug!(%parent, from = %self.kind, to = %kind, "parent kind changed");
        }
        self.kind = kind;
    }
}

/// Immediate children of every parent seen so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubclassMap {
    parents: HashMap<Symbol, NodeInfo>,
}

impl SubclassMap {
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, parent: Symbol) -> Option<&NodeInfo> {
        self.parents.get(&parent)
    }

    pub fn get_mut(&mut self, parent: Symbol) -> Option<&mut NodeInfo> {
        self.parents.get_mut(&parent)
    }

    pub fn contains(&self, parent: Symbol) -> bool {
        self.parents.contains_key(&parent)
    }

    /// Returns the parent's node, creating it with `kind` if absent.
    pub fn entry_or_insert(&mut self, parent: Symbol, kind: ClassKind) -> &mut NodeInfo {
        self.parents
            .entry(parent)
            .or_insert_with(|| NodeInfo::new(kind))
    }

    /// Records one observation of `child` declaring `parent` at `loc`.
    pub fn record(&mut self, parent: Symbol, kind: ClassKind, child: Symbol, loc: Location) {
        let node = self.entry_or_insert(parent, kind);
        node.entries
            .entry(child)
            .or_default()
            .merge_defining_loc(loc);
        node.observe_kind(parent, kind);
    }

    /// Folds another map into this one.
    ///
    /// Children merge under the location policy; each parent's kind takes
    /// the value from `other`.
    pub fn merge(&mut self, other: &SubclassMap) {
        for (parent, info) in &other.parents {
            let node = self.entry_or_insert(*parent, info.kind);
            merge_entries(&mut node.entries, &info.entries);
            node.observe_kind(*parent, info.kind);
        }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, Symbol, NodeInfo> {
        self.parents.iter()
    }
}

/// Transitive descendants of each requested parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescendantsMap {
    parents: HashMap<Symbol, NodeInfo>,
}

impl DescendantsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parent: Symbol, descendants: NodeInfo) {
        self.parents.insert(parent, descendants);
    }

    pub fn get(&self, parent: Symbol) -> Option<&NodeInfo> {
        self.parents.get(&parent)
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
