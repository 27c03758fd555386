//! Transitive descendant resolution.
//!
//! Walks a `SubclassMap` (immediate children) depth-first and folds every
//! reachable child into one entry set, using the location merge policy to
//! collapse a child reached through several paths into one entry.
//!
//! The walk assumes the hierarchy is acyclic, which the resolver that
//! produced the symbols guarantees. There is no cycle detection here.

use crate::subclass_map::{merge_entries, Entries, NodeInfo, SubclassMap};
use lineage_core::Symbol;
use std::collections::HashMap;

/// Returns every descendant of `parent`, or `None` if `parent` was never
/// recorded as a parent.
///
/// The returned node carries the parent's own recorded kind.
pub fn descendants_of(map: &SubclassMap, parent: Symbol) -> Option<NodeInfo> {
    DescendantResolver::new(map).resolve(parent)
}

/// Resolves descendants with a cache of already-walked subtrees.
///
/// A shared subtree in a diamond hierarchy is walked once per resolver
/// instead of once per path that reaches it. The result does not depend
/// on walk order since merging is order-independent.
pub struct DescendantResolver<'a> {
    map: &'a SubclassMap,
    cache: HashMap<Symbol, Entries>,
}

impl<'a> DescendantResolver<'a> {
    pub fn new(map: &'a SubclassMap) -> Self {
        Self {
            map,
            cache: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, parent: Symbol) -> Option<NodeInfo> {
        let kind = self.map.get(parent)?.kind;
        let entries = self.descendant_entries(parent)?;
        Some(NodeInfo { kind, entries })
    }

    fn descendant_entries(&mut self, parent: Symbol) -> Option<Entries> {
        if let Some(cached) = self.cache.get(&parent) {
            return Some(cached.clone());
        }

        let map = self.map;
        let children = &map.get(parent)?.entries;

        let mut out = Entries::new();
        merge_entries(&mut out, children);
        for child in children.keys() {
            if let Some(descendants) = self.descendant_entries(*child) {
                merge_entries(&mut out, &descendants);
            }
        }

        self.cache.insert(parent, out.clone());
        Some(out)
    }
}
