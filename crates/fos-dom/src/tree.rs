//! DOM Tree (arena-based allocation)

use crate::{Node, NodeData, NodeId, QualName, StringInterner, InternedString};

/// HTML namespace URI
pub(crate) const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Arena-based DOM tree
///
/// Node 0 is always the document node. Nodes are never removed, so a
/// `NodeId` handed out by a tree stays valid for the tree's lifetime.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree containing only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree (including the document node)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a detached node to the arena
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached HTML element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let ns = self.interner.intern(HTML_NS);
        self.create_element_ns(ns, tag)
    }

    /// Create a detached element in the given namespace
    pub fn create_element_ns(&mut self, ns: InternedString, tag: &str) -> NodeId {
        let local = self.interner.intern(&tag.to_ascii_lowercase());
        self.insert(Node::element(QualName::new(ns, local)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.insert(Node::text(text.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.insert(Node::comment(text.to_string()))
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.index() >= self.nodes.len() || child.index() >= self.nodes.len() {
            return;
        }

        let prev_last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev_last;
            node.next_sibling = NodeId::NONE;
        }

        if prev_last.is_valid() {
            self.nodes[prev_last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Set an attribute on an element, keeping the id/class caches current.
    /// Does nothing if `id` is not an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let ns = InternedString::EMPTY;
        let local = self.interner.intern(name);
        let cached_id = (name == "id").then(|| self.interner.intern(value));
        let classes: Vec<InternedString> = if name == "class" {
            value.split_whitespace().map(|c| self.interner.intern(c)).collect()
        } else {
            Vec::new()
        };

        let Some(elem) = self.get_mut(id).and_then(Node::as_element_mut) else {
            return;
        };
        if let Some(cached) = cached_id {
            elem.id = Some(cached);
        }
        if name == "class" {
            elem.classes = classes;
        }
        elem.set_attr(QualName::new(ns, local), value.to_string());
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Iterate over all descendants of a node in document order.
    /// The start node itself is not included.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Descendants { tree: self, root: id, next }
    }

    /// Access the interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Access the interner mutably
    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned string
    #[inline]
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.get(s)
    }

    /// Lowercase local tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.name.local))
    }

    /// Read an attribute of an element by name
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        let key = self.interner.lookup(name)?;
        self.get(id)?.as_element()?.get_attr(key)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|(_, node)| node.as_text())
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over a subtree, excluding its root
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut cursor = id;
            loop {
                if cursor == self.root {
                    break NodeId::NONE;
                }
                let Some(current) = self.tree.get(cursor) else {
                    break NodeId::NONE;
                };
                if current.next_sibling.is_valid() {
                    break current.next_sibling;
                }
                cursor = current.parent;
                if !cursor.is_valid() || cursor == self.root {
                    break NodeId::NONE;
                }
            }
        };

        Some((id, node))
    }
}

/// Helper for matching node data in other modules
pub(crate) fn is_element_named(tree: &DomTree, node: &Node, tag: &str) -> bool {
    match &node.data {
        NodeData::Element(elem) => tree.resolve(elem.name.local).eq_ignore_ascii_case(tag),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let form = tree.create_element("form");
        let input = tree.create_element("input");
        let div = tree.create_element("div");
        let nested = tree.create_element("button");
        tree.append_child(tree.root(), form);
        tree.append_child(form, input);
        tree.append_child(form, div);
        tree.append_child(div, nested);
        (tree, form, input, nested)
    }

    #[test]
    fn test_append_links_siblings() {
        let (tree, form, input, _) = sample();
        let form_node = tree.get(form).unwrap();
        assert_eq!(form_node.first_child, input);
        assert_eq!(tree.get(input).unwrap().parent, form);
        assert_eq!(tree.children(form).count(), 2);
    }

    #[test]
    fn test_descendants_document_order() {
        let (tree, form, input, nested) = sample();
        let ids: Vec<NodeId> = tree.descendants(form).map(|(id, _)| id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], input);
        assert_eq!(ids[2], nested);
    }

    #[test]
    fn test_descendants_stay_inside_subtree() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        let inner = tree.create_element("span");
        tree.append_child(tree.root(), a);
        tree.append_child(tree.root(), b);
        tree.append_child(a, inner);

        let ids: Vec<NodeId> = tree.descendants(a).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![inner]);
    }

    #[test]
    fn test_attribute_presence() {
        let mut tree = DomTree::new();
        let input = tree.create_element("input");
        tree.set_attribute(input, "value", "");
        assert_eq!(tree.attr(input, "value"), Some(""));
        assert_eq!(tree.attr(input, "type"), None);
        assert_eq!(tree.attr(input, "not-interned-anywhere"), None);
    }

    #[test]
    fn test_text_content() {
        let mut tree = DomTree::new();
        let p = tree.create_element("p");
        let t1 = tree.create_text("Hello, ");
        let b = tree.create_element("b");
        let t2 = tree.create_text("World");
        tree.append_child(p, t1);
        tree.append_child(p, b);
        tree.append_child(b, t2);
        assert_eq!(tree.text_content(p), "Hello, World");
    }
}
