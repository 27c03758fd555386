use crate::error::{LineageError, Result};
use crate::symbol::{ClassKind, FileId, Location, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read access to the resolver's global symbol state.
///
/// The subclass pipeline never creates or resolves names itself; everything
/// it knows about a symbol comes through this trait.
pub trait SymbolTable {
    /// Follows alias indirection to the underlying class or module.
    fn dealias(&self, sym: Symbol) -> Symbol;

    /// Looks up a `::`-separated constant name from the root namespace.
    fn lookup_qualified(&self, name: &str) -> Option<Symbol>;

    /// Renders the fully qualified display name.
    fn show(&self, sym: Symbol) -> Result<String>;

    fn kind_of(&self, sym: Symbol) -> Result<ClassKind>;

    /// Where the symbol itself was declared.
    fn declaration_loc(&self, sym: Symbol) -> Result<Location>;

    /// Path of a file as it should appear in reports.
    fn printable_path(&self, file: FileId) -> Result<String>;
}

/// One entry of [`GlobalSymbols`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolData {
    /// Unqualified constant name.
    pub name: String,
    /// Enclosing namespace; `None` for top-level constants.
    #[serde(default)]
    pub owner: Option<Symbol>,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub loc: Option<Location>,
    #[serde(default)]
    pub alias_of: Option<Symbol>,
}

/// Serialized shape of [`GlobalSymbols`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTableData {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub symbols: Vec<SymbolData>,
    /// Stripped from file paths when rendering them.
    #[serde(default)]
    pub path_prefix: Option<String>,
}

/// An in-memory symbol table.
///
/// Symbol ids are indexes into the symbol list and file ids are indexes
/// into the file list, so a table loaded from JSON keeps the ids its
/// producer assigned.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(from = "SymbolTableData", into = "SymbolTableData")]
pub struct GlobalSymbols {
    files: Vec<String>,
    symbols: Vec<SymbolData>,
    path_prefix: Option<String>,

    /// Map of (owner, name) to symbol, for segment-wise lookup.
    by_name: HashMap<(Option<Symbol>, String), Symbol>,
}

impl GlobalSymbols {
    /// Creates a new empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix stripped from printed file paths.
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.set_path_prefix(prefix);
        self
    }

    pub fn set_path_prefix(&mut self, prefix: impl Into<String>) {
        self.path_prefix = Some(prefix.into());
    }

    /// Registers a source file.
    pub fn add_file(&mut self, path: impl Into<String>) -> FileId {
        self.files.push(path.into());
        FileId::new((self.files.len() - 1) as u32)
    }

    /// Registers a symbol under `owner`.
    ///
    /// Re-entering an existing (owner, name) pair returns the existing
    /// symbol. A namespace created implicitly (no location yet) takes the
    /// kind and location of its first explicit declaration.
    pub fn insert(
        &mut self,
        owner: Option<Symbol>,
        name: &str,
        kind: ClassKind,
        loc: Option<Location>,
    ) -> Symbol {
        let key = (owner, name.to_string());
        if let Some(&existing) = self.by_name.get(&key) {
            if let Some(data) = self.symbols.get_mut(existing.id() as usize) {
                if data.loc.is_none() && loc.is_some() {
                    data.kind = kind;
                    data.loc = loc;
                }
            }
            return existing;
        }

        let sym = Symbol::new(self.symbols.len() as u32);
        self.symbols.push(SymbolData {
            name: name.to_string(),
            owner,
            kind,
            loc,
            alias_of: None,
        });
        self.by_name.insert(key, sym);
        sym
    }

    /// Registers a symbol by its qualified name, creating missing enclosing
    /// namespaces as modules.
    pub fn enter(&mut self, qualified: &str, kind: ClassKind, loc: Option<Location>) -> Symbol {
        let trimmed = qualified.trim_start_matches("::");
        let (namespace, name) = match trimmed.rsplit_once("::") {
            Some((namespace, name)) => (Some(namespace), name),
            None => (None, trimmed),
        };

        let mut owner = None;
        for segment in namespace.into_iter().flat_map(|ns| ns.split("::")) {
            owner = Some(self.insert(owner, segment, ClassKind::Module, None));
        }
        self.insert(owner, name, kind, loc)
    }

    /// Registers `qualified` as an alias of `target`.
    pub fn enter_alias(&mut self, qualified: &str, target: Symbol) -> Symbol {
        let sym = self.enter(qualified, ClassKind::Module, None);
        if let Some(data) = self.symbols.get_mut(sym.id() as usize) {
            data.alias_of = Some(target);
        }
        sym
    }

    pub fn get(&self, sym: Symbol) -> Option<&SymbolData> {
        self.symbols.get(sym.id() as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn data(&self, sym: Symbol) -> Result<&SymbolData> {
        self.get(sym).ok_or(LineageError::UnknownSymbol(sym))
    }
}

fn split_qualified(name: &str) -> impl Iterator<Item = &str> {
    name.trim_start_matches("::").split("::")
}

impl SymbolTable for GlobalSymbols {
    fn dealias(&self, sym: Symbol) -> Symbol {
        let mut current = sym;
        // Alias chains never exceed the table size.
        for _ in 0..=self.symbols.len() {
            match self.get(current).and_then(|data| data.alias_of) {
                Some(target) => current = target,
                None => break,
            }
        }
        current
    }

    fn lookup_qualified(&self, name: &str) -> Option<Symbol> {
        let mut owner = None;
        for segment in split_qualified(name) {
            let sym = self.by_name.get(&(owner, segment.to_string()))?;
            owner = Some(*sym);
        }
        owner
    }

    fn show(&self, sym: Symbol) -> Result<String> {
        let mut parts = vec![self.data(sym)?.name.as_str()];
        let mut owner = self.data(sym)?.owner;
        while let Some(next) = owner {
            let data = self.data(next)?;
            parts.push(data.name.as_str());
            owner = data.owner;
        }
        parts.reverse();
        Ok(parts.join("::"))
    }

    fn kind_of(&self, sym: Symbol) -> Result<ClassKind> {
        Ok(self.data(sym)?.kind)
    }

    fn declaration_loc(&self, sym: Symbol) -> Result<Location> {
        self.data(sym)?.loc.ok_or(LineageError::MissingLocation(sym))
    }

    fn printable_path(&self, file: FileId) -> Result<String> {
        let path = self
            .files
            .get(file.id() as usize)
            .ok_or(LineageError::UnknownFile(file))?;

        let printable = match &self.path_prefix {
            Some(prefix) => path.strip_prefix(prefix.as_str()).unwrap_or(path),
            None => path,
        };
        Ok(printable.to_string())
    }
}

impl From<SymbolTableData> for GlobalSymbols {
    fn from(data: SymbolTableData) -> Self {
        let by_name = data
            .symbols
            .iter()
            .enumerate()
            .map(|(i, s)| ((s.owner, s.name.clone()), Symbol::new(i as u32)))
            .collect();

        Self {
            files: data.files,
            symbols: data.symbols,
            path_prefix: data.path_prefix,
            by_name,
        }
    }
}

impl From<GlobalSymbols> for SymbolTableData {
    fn from(table: GlobalSymbols) -> Self {
        Self {
            files: table.files,
            symbols: table.symbols,
            path_prefix: table.path_prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_resolve() {
        let mut table = GlobalSymbols::new();
        let file = table.add_file("lib/opus/safe_machine.rb");
        let loc = Location::new(file, 0, 20);

        let sym = table.enter("Opus::SafeMachine", ClassKind::Module, Some(loc));

        assert_eq!(table.lookup_qualified("Opus::SafeMachine"), Some(sym));
        assert_eq!(table.lookup_qualified("::Opus::SafeMachine"), Some(sym));
        assert_eq!(table.lookup_qualified("Opus::Missing"), None);
        assert_eq!(table.lookup_qualified("SafeMachine"), None);
        assert_eq!(table.show(sym).unwrap(), "Opus::SafeMachine");
        assert_eq!(table.kind_of(sym).unwrap(), ClassKind::Module);

        let opus = table.lookup_qualified("Opus").unwrap();
        assert_eq!(table.kind_of(opus).unwrap(), ClassKind::Module);
        assert!(table.declaration_loc(opus).is_err());
    }

    #[test]
    fn test_enter_is_idempotent() {
        let mut table = GlobalSymbols::new();
        let a = table.enter("Animal", ClassKind::Class, None);
        let b = table.enter("Animal", ClassKind::Class, None);
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_dealias() {
        let mut table = GlobalSymbols::new();
        let animal = table.enter("Animal", ClassKind::Class, None);
        let beast = table.enter_alias("Beast", animal);
        let creature = table.enter_alias("Creature", beast);

        assert_eq!(table.dealias(creature), animal);
        assert_eq!(table.dealias(animal), animal);
    }

    #[test]
    fn test_printable_path_strips_prefix() {
        let mut table = GlobalSymbols::new().with_path_prefix("/src/app/");
        let inside = table.add_file("/src/app/models/dog.rb");
        let outside = table.add_file("vendor/cat.rb");

        assert_eq!(table.printable_path(inside).unwrap(), "models/dog.rb");
        assert_eq!(table.printable_path(outside).unwrap(), "vendor/cat.rb");
        assert_eq!(
            table.printable_path(FileId::new(9)),
            Err(LineageError::UnknownFile(FileId::new(9)))
        );
    }

    #[test]
    fn test_json_round_trip_keeps_lookup_index() {
        let mut table = GlobalSymbols::new();
        let file = table.add_file("dog.rb");
        let dog = table.enter("Zoo::Dog", ClassKind::Class, Some(Location::new(file, 4, 9)));

        let json = serde_json::to_string(&table).unwrap();
        let loaded: GlobalSymbols = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.lookup_qualified("Zoo::Dog"), Some(dog));
        assert_eq!(loaded.printable_path(file).unwrap(), "dog.rb");
    }
}
