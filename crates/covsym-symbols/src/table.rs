use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::interner::{StringInterner, Sym};

/// Sentinel text for an unresolved function name or file path.
const UNKNOWN: &str = "?";

/// One resolved symbol, referencing strings interned by its table.
#[derive(Clone, Copy, Debug)]
struct Entry {
    func: Sym,
    file: Sym,
    line: i32,
    col: i32,
}

/// Resolved view over a single symbol table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolRef<'a> {
    /// Function name, or `"?"` if unknown.
    pub func: &'a str,

    /// Source file path, or `"?"` if unknown.
    pub file: &'a str,

    /// Source line, `0` if unknown, `-1` if absent from symbolizer output.
    pub line: i32,

    /// Source column, `0` if unknown, `-1` if absent from symbolizer output.
    pub col: i32,
}

impl SymbolRef<'_> {
    /// Returns the source location as `file[:line[:col]]`, omitting absent
    /// fields.
    pub fn location(&self) -> String {
        let mut location = self.file.to_owned();

        if self.line >= 0 {
            let _ = write!(location, ":{}", self.line);
        }

        if self.col >= 0 {
            let _ = write!(location, ":{}", self.col);
        }

        location
    }

    /// Returns the function name followed by the source location.
    pub fn full_description(&self) -> String {
        format!("{} {}", self.func, self.location())
    }

    /// Returns whether both the function and the file are unresolved.
    pub fn is_unknown(&self) -> bool {
        self.func == UNKNOWN && self.file == UNKNOWN
    }
}

/// Ordered collection of resolved symbols, indexed by the position of their
/// PCs in the table they were resolved from.
///
/// A fully-resolved table has exactly one entry per PC, in PC-table order,
/// so consumers can look symbols up positionally.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<Entry>,
    interner: StringInterner,
}

impl SymbolTable {
    /// Creates an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty symbol table with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            interner: StringInterner::new(),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table holds no entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a source location and appends one entry.
    ///
    /// The location has the form `file[:line[:col]]`. A location containing
    /// a literal `?` is recorded as unknown (`line = col = 0`) with the text
    /// up to the first `:` as the file, and no numeric parsing is attempted.
    pub fn add_entry(&mut self, func: &str, file_line_col: &str) -> Result<()> {
        if file_line_col.contains('?') {
            let file = file_line_col.split(':').next().unwrap_or(file_line_col);
            self.push_entry(func, file, 0, 0);
            return Ok(());
        }

        let parts: Vec<&str> = file_line_col.split(':').collect();

        if parts.len() > 3 {
            return Err(Error::MalformedLocation(file_line_col.to_owned()));
        }

        let line = match parts.get(1) {
            Some(text) => text
                .parse()
                .map_err(|e| Error::InvalidLineOrColumn(file_line_col.to_owned(), e))?,
            None => -1,
        };

        let col = match parts.get(2) {
            Some(text) => text
                .parse()
                .map_err(|e| Error::InvalidLineOrColumn(file_line_col.to_owned(), e))?,
            None => -1,
        };

        let file = parts.first().copied().unwrap_or(file_line_col);

        self.push_entry(func, file, line, col);

        Ok(())
    }

    /// Appends every entry of `other`, in order, re-interning its strings
    /// into this table's interner.
    pub fn merge_from(&mut self, other: &SymbolTable) {
        self.entries.reserve(other.len());

        for entry in other.entries() {
            self.push_entry(entry.func, entry.file, entry.line, entry.col);
        }
    }

    /// Replaces all contents with `size` unknown entries (`"?"`, `"?"`, 0, 0).
    ///
    /// The interner is reset as well, so only the single `"?"` string
    /// remains stored.
    pub fn set_all_to_unknown(&mut self, size: usize) {
        self.entries.clear();
        self.interner.clear();

        let unknown = self.interner.intern(UNKNOWN);

        self.entries.resize(
            size,
            Entry {
                func: unknown,
                file: unknown,
                line: 0,
                col: 0,
            },
        );
    }

    /// Returns the entry at the given PC index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn entry(&self, index: usize) -> SymbolRef<'_> {
        self.resolve(self.entries[index])
    }

    /// Returns the function name of the entry at the given PC index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn func(&self, index: usize) -> &str {
        self.interner.resolve(self.entries[index].func)
    }

    /// Returns the source location of the entry at the given PC index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn location(&self, index: usize) -> String {
        self.entry(index).location()
    }

    /// Returns the function name and source location of the entry at the
    /// given PC index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn full_description(&self, index: usize) -> String {
        self.entry(index).full_description()
    }

    /// Iterates over the entries, in PC-table order.
    pub fn entries(&self) -> impl Iterator<Item = SymbolRef<'_>> {
        self.entries.iter().map(|entry| self.resolve(*entry))
    }

    fn push_entry(&mut self, func: &str, file: &str, line: i32, col: i32) {
        let func = self.interner.intern(func);
        let file = self.interner.intern(file);

        self.entries.push(Entry {
            func,
            file,
            line,
            col,
        });
    }

    fn resolve(&self, entry: Entry) -> SymbolRef<'_> {
        SymbolRef {
            func: self.interner.resolve(entry.func),
            file: self.interner.resolve(entry.file),
            line: entry.line,
            col: entry.col,
        }
    }
}

/// Value equality over the ordered entry sequence; where the strings are
/// stored is irrelevant.
impl PartialEq for SymbolTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries().eq(other.entries())
    }
}

impl Eq for SymbolTable {}
