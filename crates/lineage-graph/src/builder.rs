//! Builds the subclass map from parsed files.
//!
//! Each file is collected into its own `SubclassMap`, then folded into the
//! aggregate. Collection only reads the file and the symbol table, so a
//! host may collect files on several workers and hand the results to one
//! builder through [`SubclassMapBuilder::merge`].

use crate::path_filter::IgnorePatterns;
use crate::subclass_map::SubclassMap;
use lineage_core::{ParsedFile, SymbolTable};
use tracing::{debug, warn};

/// Collects every `Child < Parent` edge declared in one file.
///
/// Returns `None` if the file is excluded by `ignore`. References that do
/// not declare a parent are plain constant uses and are skipped.
pub fn collect_file<S: SymbolTable + ?Sized>(
    symbols: &S,
    file: &ParsedFile,
    ignore: &IgnorePatterns,
) -> Option<SubclassMap> {
    // Patterns are always "/"-prefixed.
    let rooted = format!("/{}", file.path);
    if ignore.is_ignored(&rooted) {
        debug!(path = %file.path, "skipping ignored file");
        return None;
    }

    let mut out = SubclassMap::new();
    for reference in &file.references {
        let Some(def_ref) = reference.parent_of else {
            continue;
        };

        let Some(def) = file.definition(def_ref) else {
            warn!(
                path = %file.path,
                index = def_ref.index(),
                "reference points at a missing definition"
            );
            continue;
        };

        let parent = symbols.dealias(reference.symbol);
        out.record(
            parent,
            reference.parent_kind,
            def.symbol,
            reference.definition_loc,
        );
    }

    Some(out)
}

/// Aggregates per-file subclass maps.
///
/// Call `add_file` for each parsed file (or `merge` for maps collected
/// elsewhere), then `build` once everything is in.
pub struct SubclassMapBuilder<'a, S: SymbolTable + ?Sized> {
    symbols: &'a S,
    ignore: IgnorePatterns,
    map: SubclassMap,
    files_collected: usize,
    files_ignored: usize,
}

impl<'a, S: SymbolTable + ?Sized> SubclassMapBuilder<'a, S> {
    /// Creates a new builder.
    pub fn new(symbols: &'a S, ignore: IgnorePatterns) -> Self {
        Self {
            symbols,
            ignore,
            map: SubclassMap::new(),
            files_collected: 0,
            files_ignored: 0,
        }
    }

    /// Collects one file and merges its edges into the aggregate.
    ///
    /// Returns false if the file was ignored.
    pub fn add_file(&mut self, file: &ParsedFile) -> bool {
        match collect_file(self.symbols, file, &self.ignore) {
            Some(local) => {
                self.merge(&local);
                true
            }
            None => {
                self.files_ignored += 1;
                false
            }
        }
    }

    pub fn add_files<'f>(&mut self, files: impl IntoIterator<Item = &'f ParsedFile>) {
        for file in files {
            self.add_file(file);
        }
    }

    /// Merges a map collected outside this builder.
    pub fn merge(&mut self, local: &SubclassMap) {
        self.map.merge(local);
        self.files_collected += 1;
    }

    pub fn files_collected(&self) -> usize {
        self.files_collected
    }

    pub fn files_ignored(&self) -> usize {
        self.files_ignored
    }

    /// Finishes building and returns the aggregate map.
    pub fn build(self) -> SubclassMap {
        debug!(
            collected = self.files_collected,
            ignored = self.files_ignored,
            parents = self.map.len(),
            "subclass map built"
        );
        self.map
    }
}
