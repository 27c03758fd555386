//! Manual corrections to the subclass map.
//!
//! Some relationships only exist at runtime (a module that adds itself to
//! its includers' ancestors from a `self.included` hook, for example) and
//! can't be seen statically. A `PatchRule` declares that every recorded
//! child of `mixin` is also a child of `parent`.

use crate::subclass_map::{merge_entries, SubclassMap};
use lineage_core::{Result, SymbolTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Children of `mixin` are also recorded under `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRule {
    /// Fully qualified name, `::`-separated.
    pub parent: String,
    /// Fully qualified name, `::`-separated.
    pub mixin: String,
}

impl PatchRule {
    pub fn new(parent: impl Into<String>, mixin: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            mixin: mixin.into(),
        }
    }
}

/// The set of rules applied before resolving descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchTable {
    rules: Vec<PatchRule>,
}

impl Default for PatchTable {
    /// The one known runtime-only relationship.
    fn default() -> Self {
        Self::new(vec![PatchRule::new(
            "Opus::SafeMachine",
            "Opus::Risk::Model::Mixins::RiskSafeMachine",
        )])
    }
}

impl PatchTable {
    pub fn new(rules: Vec<PatchRule>) -> Self {
        Self { rules }
    }

    /// A table with no rules.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn rules(&self) -> &[PatchRule] {
        &self.rules
    }

    /// Applies every rule to `map`, returning how many of them resolved.
    ///
    /// A rule whose names don't both resolve leaves the map untouched.
    /// Otherwise the parent gets a node (with the kind the symbol table
    /// reports, if it had none) even when the mixin has no recorded
    /// children, so a requested parent still gets its report header.
    pub fn apply<S: SymbolTable + ?Sized>(&self, symbols: &S, map: &mut SubclassMap) -> Result<usize> {
        let mut applied = 0;
        for rule in &self.rules {
            let (Some(parent), Some(mixin)) = (
                symbols.lookup_qualified(&rule.parent),
                symbols.lookup_qualified(&rule.mixin),
            ) else {
                debug!(parent = %rule.parent, mixin = %rule.mixin, "patch rule names not found");
                continue;
            };

            let mixin_entries = map
                .get(mixin)
                .map(|info| info.entries.clone())
                .unwrap_or_default();

            let kind = match map.get(parent) {
                Some(info) => info.kind,
                None => symbols.kind_of(parent)?,
            };
            let node = map.entry_or_insert(parent, kind);
            merge_entries(&mut node.entries, &mixin_entries);
            applied += 1;
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_core::{ClassKind, GlobalSymbols, Location, Symbol};

    struct Fixture {
        symbols: GlobalSymbols,
        safe_machine: Symbol,
        risk_machine: Symbol,
        child: Symbol,
    }

    fn fixture() -> Fixture {
        let mut symbols = GlobalSymbols::new();
        let file = symbols.add_file("lib/opus.rb");
        let at = |begin| Some(Location::new(file, begin, begin + 4));
        let safe_machine = symbols.enter("Opus::SafeMachine", ClassKind::Module, at(0));
        let risk_machine = symbols.enter(
            "Opus::Risk::Model::Mixins::RiskSafeMachine",
            ClassKind::Module,
            at(10),
        );
        let child = symbols.enter("Opus::Risk::Charge", ClassKind::Class, at(20));
        Fixture {
            symbols,
            safe_machine,
            risk_machine,
            child,
        }
    }

    #[test]
    fn test_default_rule_copies_mixin_children() {
        let fx = fixture();
        let mut map = SubclassMap::new();
        map.record(
            fx.risk_machine,
            ClassKind::Module,
            fx.child,
            Location::new(lineage_core::FileId::new(0), 20, 24),
        );

        let applied = PatchTable::default().apply(&fx.symbols, &mut map).unwrap();

        assert_eq!(applied, 1);
        let node = map.get(fx.safe_machine).unwrap();
        assert_eq!(node.kind, ClassKind::Module);
        assert!(node.entries.contains_key(&fx.child));
    }

    #[test]
    fn test_unresolved_names_are_noop() {
        let mut symbols = GlobalSymbols::new();
        let file = symbols.add_file("lib/opus.rb");
        let safe_machine = symbols.enter("Opus::SafeMachine", ClassKind::Module, None);
        let child = symbols.enter("Opus::Charge", ClassKind::Class, None);

        let mut map = SubclassMap::new();
        map.record(safe_machine, ClassKind::Module, child, Location::new(file, 0, 1));
        let before = map.clone();

        let applied = PatchTable::default().apply(&symbols, &mut map).unwrap();

        assert_eq!(applied, 0);
        assert_eq!(map, before);
    }

    #[test]
    fn test_unresolved_parent_is_noop() {
        let mut symbols = GlobalSymbols::new();
        let file = symbols.add_file("lib/opus.rb");
        let risk_machine = symbols.enter(
            "Opus::Risk::Model::Mixins::RiskSafeMachine",
            ClassKind::Module,
            None,
        );
        let child = symbols.enter("Opus::Risk::Charge", ClassKind::Class, None);
        assert_eq!(symbols.lookup_qualified("Opus::SafeMachine"), None);

        let mut map = SubclassMap::new();
        map.record(risk_machine, ClassKind::Module, child, Location::new(file, 0, 1));
        let before = map.clone();

        let applied = PatchTable::default().apply(&symbols, &mut map).unwrap();

        assert_eq!(applied, 0);
        assert_eq!(map, before);
    }

    #[test]
    fn test_resolved_rule_creates_parent_node() {
        let fx = fixture();
        let mut map = SubclassMap::new();

        let applied = PatchTable::default().apply(&fx.symbols, &mut map).unwrap();

        assert_eq!(applied, 1);
        assert!(!map.contains(fx.risk_machine));
        let node = map.get(fx.safe_machine).unwrap();
        assert_eq!(node.kind, ClassKind::Module);
        assert!(node.entries.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let fx = fixture();
        let mut map = SubclassMap::new();
        map.record(
            fx.risk_machine,
            ClassKind::Module,
            fx.child,
            Location::new(lineage_core::FileId::new(0), 20, 24),
        );

        assert_eq!(PatchTable::empty().apply(&fx.symbols, &mut map).unwrap(), 0);
        assert!(!map.contains(fx.safe_machine));
    }

    #[test]
    fn test_table_json_is_a_list() {
        let json = serde_json::to_string(&PatchTable::default()).unwrap();
        assert!(json.starts_with('['));

        let table: PatchTable =
            serde_json::from_str(r#"[{"parent": "A", "mixin": "B"}]"#).unwrap();
        assert_eq!(table.rules(), [PatchRule::new("A", "B")]);
    }
}
