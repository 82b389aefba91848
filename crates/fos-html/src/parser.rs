//! HTML5 Parser implementation
//!
//! Parses into html5ever's RcDom and converts the result to the arena DOM.

use fos_dom::{Document, DomTree, Node, NodeId, ElementData, QualName};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{RcDom, Handle, NodeData as RcNodeData};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Document::empty(url);
        convert_node(&dom.document, document.tree_mut(), NodeId::ROOT);
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }
}

/// Convert an RcDom node (and its subtree) into `tree` under `parent`
fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    match &handle.data {
        RcNodeData::Document => {
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, parent);
            }
        }
        RcNodeData::Doctype { name, public_id, system_id } => {
            let name = tree.interner_mut().intern(name);
            let id = tree.insert(Node::doctype(name, public_id.to_string(), system_id.to_string()));
            tree.append_child(parent, id);
        }
        RcNodeData::Text { contents } => {
            let text = contents.borrow();
            if !text.trim().is_empty() {
                let id = tree.create_text(&text);
                tree.append_child(parent, id);
            }
        }
        RcNodeData::Comment { contents } => {
            let id = tree.create_comment(contents);
            tree.append_child(parent, id);
        }
        RcNodeData::Element { name, attrs, .. } => {
            let ns = tree.interner_mut().intern(&name.ns);
            let local = tree.interner_mut().intern(&name.local);
            let mut elem = ElementData::new(QualName::new(ns, local));

            for attr in attrs.borrow().iter() {
                let attr_ns = tree.interner_mut().intern(&attr.name.ns);
                let attr_local = tree.interner_mut().intern(&attr.name.local);
                let value = attr.value.to_string();

                match &*attr.name.local {
                    "id" => elem.id = Some(tree.interner_mut().intern(&value)),
                    "class" => {
                        for class in value.split_whitespace() {
                            elem.classes.push(tree.interner_mut().intern(class));
                        }
                    }
                    _ => {}
                }

                elem.set_attr(QualName::new(attr_ns, attr_local), value);
            }

            let id = tree.insert(Node::with_element(elem));
            tree.append_child(parent, id);

            for child in handle.children.borrow().iter() {
                convert_node(child, tree, id);
            }
        }
        RcNodeData::ProcessingInstruction { .. } => {}
    }
}
