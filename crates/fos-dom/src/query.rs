//! Element Query
//!
//! Read-only view of an element: attribute lookup and scoped selector
//! search. Consumers such as form handling depend on the `ElementQuery`
//! trait only, never on the tree type.

use crate::{DomTree, NodeId, SelectorList};

/// Read-only query capability over one element
pub trait ElementQuery: Sized {
    /// Read an attribute. `Some("")` means present but empty.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Descendants matching `selector`, in document order. Only the
    /// results are limited to the subtree; earlier selector parts may match
    /// ancestors outside it. Invalid selectors yield an empty result.
    fn find(&self, selector: &str) -> Vec<Self>;
}

/// Borrowed handle to an element in a `DomTree`
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> ElementRef<'a> {
    pub fn new(tree: &'a DomTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a DomTree {
        self.tree
    }

    /// Lowercase tag name
    pub fn tag_name(&self) -> &'a str {
        self.tree.tag_name(self.id).unwrap_or("")
    }

    /// Attribute value with the tree's lifetime
    pub fn attr_value(&self, name: &str) -> Option<&'a str> {
        self.tree.attr(self.id, name)
    }

    pub fn text(&self) -> String {
        self.tree.text_content(self.id)
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for ElementRef<'_> {}

impl ElementQuery for ElementRef<'_> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attr_value(name)
    }

    fn find(&self, selector: &str) -> Vec<Self> {
        let Some(list) = SelectorList::parse(selector) else {
            tracing::debug!("Ignoring unparseable selector: {}", selector);
            return Vec::new();
        };

        self.tree.descendants(self.id)
            .filter(|(id, node)| node.is_element() && list.matches(self.tree, *id, NodeId::NONE))
            .map(|(id, _)| ElementRef::new(self.tree, id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_scoped() {
        let mut tree = DomTree::new();
        let form = tree.create_element("form");
        let inside = tree.create_element("input");
        let outside = tree.create_element("input");
        tree.append_child(tree.root(), form);
        tree.append_child(form, inside);
        tree.append_child(tree.root(), outside);

        let found = ElementRef::new(&tree, form).find("input");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), inside);
    }

    #[test]
    fn test_find_matches_ancestors_outside_scope() {
        let mut tree = DomTree::new();
        let wrapper = tree.create_element("div");
        tree.set_attribute(wrapper, "class", "login");
        let form = tree.create_element("form");
        let input = tree.create_element("input");
        tree.append_child(tree.root(), wrapper);
        tree.append_child(wrapper, form);
        tree.append_child(form, input);

        let form = ElementRef::new(&tree, form);
        assert_eq!(form.find("div.login input").len(), 1);
        assert_eq!(form.find("div > form > input").len(), 1);
        // The scope element itself is never a result
        assert!(form.find("form").is_empty());
    }

    #[test]
    fn test_find_invalid_selector_is_empty() {
        let mut tree = DomTree::new();
        let form = tree.create_element("form");
        let input = tree.create_element("input");
        tree.append_child(form, input);

        assert!(ElementRef::new(&tree, form).find("input[").is_empty());
    }

    #[test]
    fn test_attr_presence() {
        let mut tree = DomTree::new();
        let button = tree.create_element("button");
        tree.set_attribute(button, "name", "go");
        let elem = ElementRef::new(&tree, button);
        assert_eq!(elem.attr("name"), Some("go"));
        assert_eq!(elem.attr("value"), None);
        assert_eq!(elem.tag_name(), "button");
    }
}
