//! String interner for metadata string slots.
//!
//! The graph is built single-threaded and frozen afterwards, so the interner
//! needs no locking: it is owned by the builder and moved into the finished
//! [`MetadataGraph`](crate::MetadataGraph), which hands out `&str` borrows.

use rustc_hash::FxHashMap;

use crate::Name;

/// Owned string table with O(1) interning and lookup.
#[derive(Clone, Debug)]
pub struct StringInterner {
    /// Map from string content to its index.
    map: FxHashMap<Box<str>, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<Box<str>>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert(Box::<str>::from(""), 0);
        Self {
            map,
            strings: vec![Box::from("")],
        }
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&index) = self.map.get(s) {
            return Name::from_raw(index);
        }
        let index = u32::try_from(self.strings.len())
            .unwrap_or_else(|_| panic!("string interner exceeded {} entries", u32::MAX));
        let owned: Box<str> = Box::from(s);
        self.strings.push(owned.clone());
        self.map.insert(owned, index);
        Name::from_raw(index)
    }

    /// Find the Name of an already interned string without inserting it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied().map(Name::from_raw)
    }

    /// Look up the string for a Name.
    ///
    /// Unknown names resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &str {
        self.strings.get(name.index()).map_or("", |s| &**s)
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the interner only holds the empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
