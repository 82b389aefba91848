//! String Interner
//!
//! Tag and attribute names repeat constantly in markup ("input", "name",
//! "value", "type"), so the tree stores them once and refers to them by ID.

use std::collections::HashMap;

/// Interned string ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// Empty string, always interned at index 0
    pub const EMPTY: InternedString = InternedString(0);
}

/// Deduplicating string table
#[derive(Debug)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    map: HashMap<Box<str>, u32>,
}

impl StringInterner {
    /// Create an interner with the common HTML vocabulary pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::with_capacity(128),
            map: HashMap::with_capacity(128),
        };

        interner.intern("");

        const COMMON: &[&str] = &[
            "html", "head", "body", "title", "div", "span", "p", "a",
            "form", "input", "button", "select", "option", "textarea",
            "label", "fieldset",
            "id", "class", "name", "type", "value", "action", "method",
            "enctype", "href", "src", "disabled", "checked",
        ];
        for s in COMMON {
            interner.intern(s);
        }

        interner
    }

    /// Intern a string, returning the existing ID if already present
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(&idx) = self.map.get(s) {
            return InternedString(idx);
        }

        let idx = self.strings.len() as u32;
        self.strings.push(s.into());
        self.map.insert(s.into(), idx);
        InternedString(idx)
    }

    /// Look up a string without interning it
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.map.get(s).map(|&idx| InternedString(idx))
    }

    /// Get the string for an interned ID (empty for unknown IDs)
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.strings.get(id.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
