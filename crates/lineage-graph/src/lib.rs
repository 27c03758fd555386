//! Lineage Graph - subclass aggregation and descendant reports
//!
//! This crate turns per-file `Child < Parent` observations into a global
//! map of immediate children, resolves the transitive descendants of
//! requested parents, and renders them as a sorted text report.
//!
//! # Pipeline
//!
//! 1. [`collect_file`] extracts one file's edges, honoring ignore patterns.
//! 2. [`SubclassMapBuilder`] merges file maps into one [`SubclassMap`],
//!    keeping the earliest declaration site of each edge.
//! 3. [`PatchTable`] adds relationships that only exist at runtime.
//! 4. [`descendants_of`] walks the map transitively.
//! 5. [`gen_descendants_report`] ties 3 and 4 together and renders lines.
//!
//! # Example
//!
//! ```
//! use lineage_core::{ClassKind, GlobalSymbols, Location, ParsedFile};
//! use lineage_graph::{gen_descendants_report, IgnorePatterns, PatchTable, SubclassMapBuilder};
//!
//! let mut symbols = GlobalSymbols::new();
//! let file = symbols.add_file("app/dog.rb");
//! let animal = symbols.enter("Animal", ClassKind::Class, Some(Location::new(file, 0, 6)));
//! let dog = symbols.enter("Dog", ClassKind::Class, Some(Location::new(file, 10, 30)));
//!
//! let mut parsed = ParsedFile::new("app/dog.rb");
//! let def = parsed.define(dog);
//! parsed.inherit(animal, ClassKind::Class, def, Location::new(file, 10, 30));
//!
//! let mut builder = SubclassMapBuilder::new(&symbols, IgnorePatterns::none());
//! builder.add_file(&parsed);
//! let mut map = builder.build();
//!
//! let lines = gen_descendants_report(&symbols, &mut map, &mut [animal], &PatchTable::empty()).unwrap();
//! assert_eq!(lines, ["class Animal", " class Dog app/dog.rb"]);
//! ```

mod builder;
mod descendants;
mod patch;
mod path_filter;
mod report;
mod subclass_map;

pub use builder::{collect_file, SubclassMapBuilder};
pub use descendants::{descendants_of, DescendantResolver};
pub use patch::{PatchRule, PatchTable};
pub use path_filter::{is_file_ignored, IgnorePatterns};
pub use report::{gen_descendants_report, serialize_descendants};
pub use subclass_map::{merge_entries, ChildInfo, DescendantsMap, Entries, NodeInfo, SubclassMap};
