//! Document - High-level document API

use crate::tree::is_element_named;
use crate::{DomTree, ElementRef, NodeId, SelectorList};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with an empty `<html><head/><body/></html>` skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create a document with nothing but the document node
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate and cache `<html>`, `<head>` and `<body>` after the tree has
    /// been populated by a parser.
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        self.html_element = tree.children(tree.root())
            .find(|(_, node)| is_element_named(tree, node, "html"))
            .map(|(id, _)| id)
            .unwrap_or(NodeId::NONE);

        let mut head = NodeId::NONE;
        let mut body = NodeId::NONE;
        for (id, node) in tree.children(self.html_element) {
            if !head.is_valid() && is_element_named(tree, node, "head") {
                head = id;
            } else if !body.is_valid() && is_element_named(tree, node, "body") {
                body = id;
            }
        }
        self.head_element = head;
        self.body_element = body;
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first `<title>` in `<head>`, or empty
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }

        self.tree.children(self.head_element)
            .find(|(_, node)| is_element_named(&self.tree, node, "title"))
            .map(|(id, _)| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let target = self.tree.interner().lookup(id)?;
        self.tree.descendants(self.tree.root())
            .find(|(_, node)| node.as_element().is_some_and(|e| e.id == Some(target)))
            .map(|(node_id, _)| node_id)
    }

    /// All elements matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(list) = SelectorList::parse(selector) else {
            return Vec::new();
        };
        let root = self.tree.root();
        self.tree.descendants(root)
            .filter(|(id, _)| list.matches(&self.tree, *id, root))
            .map(|(id, _)| id)
            .collect()
    }

    /// All `<form>` elements, in document order
    pub fn forms(&self) -> Vec<ElementRef<'_>> {
        self.tree.descendants(self.tree.root())
            .filter(|(_, node)| is_element_named(&self.tree, node, "form"))
            .map(|(id, _)| ElementRef::new(&self.tree, id))
            .collect()
    }

    /// Borrow an element as a query handle
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.tree.get(id)?.as_element()?;
        Some(ElementRef::new(&self.tree, id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
