//! fOS DOM - Document Object Model
//!
//! Arena-allocated DOM tree with a small selector engine and a read-only
//! element query capability used by the form layer.

mod node;
mod tree;
mod document;
mod interner;
mod selector;
mod query;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::{DomTree, Children, Descendants};
pub use document::Document;
pub use interner::{StringInterner, InternedString};
pub use selector::{SelectorList, ComplexSelector, CompoundSelector, Combinator,
    SelectorComponent, AttributeSelector, AttributeMatcher};
pub use query::{ElementQuery, ElementRef};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the `NONE` sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Qualified name (namespace + local name), both interned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualName {
    pub ns: InternedString,
    pub local: InternedString,
}

impl QualName {
    pub fn new(ns: InternedString, local: InternedString) -> Self {
        Self { ns, local }
    }
}
