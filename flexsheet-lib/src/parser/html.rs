//! Parsing HTML into the crate's DOM tree and serializing it back.
//!
//! html5ever does the tokenizing and tree construction; `FlexSheetTreeSink`
//! builds the `crate::dom::dom_tree` nodes it asks for.

use crate::dom::dom_tree::{self, Node, NodeRef};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{
    interface::{ElemName, ElementFlags, NodeOrText, QuirksMode, TreeSink},
    namespace_url, ns, Attribute, LocalName, Namespace, QualName,
};
use log::trace;
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "meta", "img", "br", "hr", "input", "link", "area", "base", "col", "embed", "param", "source",
    "track", "wbr",
];

/// Elements whose text content is written out verbatim.
///
/// html5ever parses with scripting on, so `noscript` content is raw text too.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Creates a DOM tree from the provided HTML content.
pub fn create_dom_tree(html_content: &str) -> dom_tree::Document {
    let tree_sink = FlexSheetTreeSink::new();
    html5ever::parse_document(tree_sink, Default::default()).one(html_content)
}

/// Serializes the whole document, doctype included.
pub fn serialize_document(document: &dom_tree::Document) -> String {
    let mut out = String::new();
    if let Some(doctype) = &*document.doctype.borrow() {
        out.push_str(&format!("<!DOCTYPE {}>", doctype.name));
    }
    serialize_node(&document.root, false, &mut out);
    out
}

/// Serializes one node (outer HTML for elements).
pub fn serialize_node_to_string(node: &NodeRef) -> String {
    let mut out = String::new();
    serialize_node(node, false, &mut out);
    out
}

fn serialize_node(node: &NodeRef, raw_text: bool, out: &mut String) {
    match &*node.borrow() {
        Node::DocumentRoot(root) => {
            for child in &root.children {
                serialize_node(child, false, out);
            }
        }
        Node::Element(elem) => {
            out.push('<');
            out.push_str(&elem.tag);
            for (k, v) in &elem.attributes {
                out.push_str(&format!(
                    " {}=\"{}\"",
                    k,
                    html_escape::encode_double_quoted_attribute(v)
                ));
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&elem.tag.as_str()) {
                return;
            }
            let raw = RAW_TEXT_ELEMENTS.contains(&elem.tag.as_str());
            for child in &elem.children {
                serialize_node(child, raw, out);
            }
            out.push_str(&format!("</{}>", elem.tag));
        }
        Node::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&html_escape::encode_text(text));
            }
        }
    }
}

/// A TreeSink building the crate's DOM tree for html5ever.
pub struct FlexSheetTreeSink {
    document: dom_tree::Document,
    quirks_mode: RefCell<QuirksMode>,
}

impl FlexSheetTreeSink {
    pub fn new() -> Self {
        Self {
            document: dom_tree::new_document(),
            quirks_mode: RefCell::new(QuirksMode::NoQuirks),
        }
    }

    fn to_node(child: NodeOrText<NodeRef>) -> NodeRef {
        match child {
            NodeOrText::AppendNode(node) => node,
            NodeOrText::AppendText(text) => dom_tree::create_text(&text),
        }
    }
}

impl Default for FlexSheetTreeSink {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct FlexSheetElemName {
    ns: Namespace,
    local: LocalName,
}

impl ElemName for FlexSheetElemName {
    fn ns(&self) -> &Namespace {
        &self.ns
    }

    fn local_name(&self) -> &LocalName {
        &self.local
    }
}

impl TreeSink for FlexSheetTreeSink {
    type Handle = NodeRef;
    type Output = dom_tree::Document;
    type ElemName<'a>
        = FlexSheetElemName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self.document
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        trace!("html parse error: {}", msg);
    }

    fn get_document(&self) -> Self::Handle {
        Rc::clone(&self.document.root)
    }

    // Non-elements report an empty name; html5ever only asks for elements.
    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        match target.borrow().as_element() {
            Some(elem) => FlexSheetElemName {
                ns: elem.qual_name.ns.clone(),
                local: elem.qual_name.local.clone(),
            },
            None => FlexSheetElemName {
                ns: ns!(),
                local: LocalName::from(""),
            },
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let mut element = dom_tree::ElementNode::new(name.local.to_string(), name);
        element.attributes = attrs
            .into_iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect();
        Rc::new(RefCell::new(Node::Element(element)))
    }

    // Comments are not needed downstream; keep them as empty text.
    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        dom_tree::create_text("")
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        dom_tree::create_text("")
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        if let NodeOrText::AppendText(text) = &child {
            let mut parent_node = parent.borrow_mut();
            if let Some(last) = parent_node.children_mut().and_then(|c| c.last()) {
                if let Node::Text(existing) = &mut *last.borrow_mut() {
                    existing.push_str(text);
                    return;
                }
            }
        }
        dom_tree::append_child(parent, &Self::to_node(child));
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        if dom_tree::parent_of(element).is_some() {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        *self.document.doctype.borrow_mut() = Some(dom_tree::Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        });
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        Rc::clone(target)
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        Rc::ptr_eq(x, y)
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = mode;
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let Some(parent) = dom_tree::parent_of(sibling) else {
            return;
        };
        let child = Self::to_node(child);
        dom_tree::detach(&child);
        if let Some(elem) = child.borrow_mut().as_element_mut() {
            elem.parent = Some(Rc::downgrade(&parent));
        }
        let mut parent_node = parent.borrow_mut();
        if let Some(children) = parent_node.children_mut() {
            let index = children
                .iter()
                .position(|c| Rc::ptr_eq(c, sibling))
                .unwrap_or(children.len());
            children.insert(index, child);
        }
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>) {
        if let Some(elem) = target.borrow_mut().as_element_mut() {
            for attr in attrs {
                let key = attr.name.local.to_string();
                if elem.get_attribute(&key).is_none() {
                    elem.attributes.push((key, attr.value.to_string()));
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        dom_tree::detach(target);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let children = match node.borrow_mut().children_mut() {
            Some(children) => std::mem::take(children),
            None => return,
        };
        for child in children {
            if let Some(elem) = child.borrow_mut().as_element_mut() {
                elem.parent = None;
            }
            dom_tree::append_child(new_parent, &child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_head_and_body() {
        let document = create_dom_tree("<div id=\"a\" class=\"x y\">Hello</div>");
        assert!(document.head().is_some());
        let div = document.element_by_id("a").unwrap();
        let node = div.borrow();
        let elem = node.as_element().unwrap();
        assert!(elem.has_class("y"));
        assert_eq!(
            dom_tree::parent_of(&div).unwrap().borrow().as_element().unwrap().tag,
            "body"
        );
    }

    #[test]
    fn round_trips_markup() {
        let html = "<!DOCTYPE html><html><head><style>.a > b { color: red; }</style></head>\
                    <body><p class=\"x\">a &amp; b<br></p></body></html>";
        let document = create_dom_tree(html);
        assert_eq!(serialize_document(&document), html);
    }

    #[test]
    fn noscript_fallback_survives_a_round_trip() {
        let html = "<html><head><noscript><link rel=\"stylesheet\" href=\"a.css\"></noscript></head>\
                    <body><noscript><p>Enable <b>scripts</b> & reload</p></noscript></body></html>";
        let document = create_dom_tree(html);
        assert_eq!(serialize_document(&document), html);
    }

    #[test]
    fn text_inserted_before_a_sibling_keeps_its_place() {
        // A stray table cell's text is foster-parented in front of the table.
        let document = create_dom_tree("<table>oops<tr><td>x</td></tr></table>");
        let body = document.body().unwrap();
        assert_eq!(
            serialize_node_to_string(&body),
            "<body>oops<table><tbody><tr><td>x</td></tr></tbody></table></body>"
        );
    }
}
