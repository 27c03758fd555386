//! Serializes descendants into the sorted text report.
//!
//! The report is a flat list of lines. Each requested parent that was ever
//! subclassed gets a header, followed by one indented line per descendant:
//!
//! ```text
//! class Animal
//!  class Dog app/models/dog.rb
//!  module Pettable app/models/pettable.rb
//! ```
//!
//! Parent blocks are ordered by display name and child lines within a block
//! by their full text, so output is identical across runs regardless of
//! hash map iteration order.

use crate::descendants::DescendantResolver;
use crate::patch::PatchTable;
use crate::subclass_map::{DescendantsMap, SubclassMap};
use lineage_core::{Result, Symbol, SymbolTable};
use tracing::debug;

/// Patches `map`, resolves every requested parent, and renders the report.
///
/// `parents` is sorted in place by display name. Parents with no entry in
/// `map` are left out of the report.
pub fn gen_descendants_report<S: SymbolTable + ?Sized>(
    symbols: &S,
    map: &mut SubclassMap,
    parents: &mut [Symbol],
    patches: &PatchTable,
) -> Result<Vec<String>> {
    patches.apply(symbols, map)?;

    sort_by_display_name(symbols, parents)?;

    let mut resolver = DescendantResolver::new(map);
    let mut descendants = DescendantsMap::new();
    for &parent in parents.iter() {
        // Skip parents that were requested but never subclassed.
        if let Some(info) = resolver.resolve(parent) {
            descendants.insert(parent, info);
        }
    }

    debug!(
        requested = parents.len(),
        found = descendants.len(),
        "descendants resolved"
    );

    serialize_descendants(symbols, &descendants, parents)
}

/// Renders a header and sorted child lines for each parent in `parents`
/// order. Parents missing from `descendants` produce no lines.
pub fn serialize_descendants<S: SymbolTable + ?Sized>(
    symbols: &S,
    descendants: &DescendantsMap,
    parents: &[Symbol],
) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for &parent in parents {
        let Some(info) = descendants.get(parent) else {
            continue;
        };

        lines.push(format!("{} {}", info.kind, symbols.show(parent)?));

        let block_start = lines.len();
        for (&child, child_info) in &info.entries {
            let loc = match child_info.defining_loc {
                Some(loc) => loc,
                None => symbols.declaration_loc(child)?,
            };
            lines.push(format!(
                " {} {} {}",
                symbols.kind_of(child)?,
                symbols.show(child)?,
                symbols.printable_path(loc.file)?
            ));
        }
        lines[block_start..].sort_unstable();
    }
    Ok(lines)
}

fn sort_by_display_name<S: SymbolTable + ?Sized>(symbols: &S, parents: &mut [Symbol]) -> Result<()> {
    let mut keyed = parents
        .iter()
        .map(|&sym| symbols.show(sym).map(|name| (name, sym)))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    for (slot, (_, sym)) in parents.iter_mut().zip(keyed) {
        *slot = sym;
    }
    Ok(())
}
