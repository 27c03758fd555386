//! Identity types handed out by the symbol table.
//!
//! Symbols and files are plain integer handles. Their ordering is only
//! ever used to break ties deterministically; report output is sorted by
//! rendered names, never by these ids.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Opaque handle for a class or module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(u32);

impl Symbol {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(u32);

impl FileId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

/// Whether a declared entity is a class or a module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Module,
}

impl ClassKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Module => "module",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A byte range inside one file.
///
/// Locations order by `(file, begin)` only; `end` does not take part in
/// comparisons.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Location {
    pub file: FileId,
    pub begin: u32,
    pub end: u32,
}

impl Location {
    pub fn new(file: FileId, begin: u32, end: u32) -> Self {
        Self { file, begin, end }
    }

    fn sort_key(&self) -> (FileId, u32) {
        (self.file, self.begin)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Location {}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_orders_by_file_then_offset() {
        let a = Location::new(FileId::new(1), 100, 120);
        let b = Location::new(FileId::new(2), 5, 10);
        let c = Location::new(FileId::new(1), 10, 400);

        assert!(a < b);
        assert!(c < a);
        assert_eq!(
            Location::new(FileId::new(3), 7, 8),
            Location::new(FileId::new(3), 7, 99)
        );
    }

    #[test]
    fn test_class_kind_display() {
        assert_eq!(ClassKind::Class.to_string(), "class");
        assert_eq!(ClassKind::Module.to_string(), "module");
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ClassKind::Module).unwrap();
        assert_eq!(json, "\"module\"");
    }
}
