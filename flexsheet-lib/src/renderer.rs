//! The narrow set of DOM mutations the styling core performs.

use crate::dom::dom_tree::{self, NodeRef};
use crate::style::inline;

pub trait Renderer {
    fn create_element(&self, name: &str) -> NodeRef;
    fn add_class(&self, element: &NodeRef, class_name: &str);
    fn remove_class(&self, element: &NodeRef, class_name: &str);
    fn set_attribute(&self, element: &NodeRef, name: &str, value: &str);
    fn set_style(&self, element: &NodeRef, property: &str, value: &str);
    fn remove_style(&self, element: &NodeRef, property: &str);
    /// Replaces the node's content with text.
    fn set_value(&self, node: &NodeRef, value: &str);
    fn append_child(&self, parent: &NodeRef, child: &NodeRef);
    fn remove_child(&self, parent: &NodeRef, child: &NodeRef);
}

/// Renderer writing straight into the crate's DOM tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomRenderer;

impl DomRenderer {
    fn with_element(element: &NodeRef, f: impl FnOnce(&mut dom_tree::ElementNode)) {
        if let Some(elem) = element.borrow_mut().as_element_mut() {
            f(elem);
        }
    }
}

impl Renderer for DomRenderer {
    fn create_element(&self, name: &str) -> NodeRef {
        dom_tree::create_element(name)
    }

    fn add_class(&self, element: &NodeRef, class_name: &str) {
        Self::with_element(element, |elem| elem.add_class(class_name));
    }

    fn remove_class(&self, element: &NodeRef, class_name: &str) {
        Self::with_element(element, |elem| elem.remove_class(class_name));
    }

    fn set_attribute(&self, element: &NodeRef, name: &str, value: &str) {
        Self::with_element(element, |elem| elem.set_attribute(name, value));
    }

    fn set_style(&self, element: &NodeRef, property: &str, value: &str) {
        Self::with_element(element, |elem| {
            inline::set_inline_style(elem, property, Some(value))
        });
    }

    fn remove_style(&self, element: &NodeRef, property: &str) {
        Self::with_element(element, |elem| inline::set_inline_style(elem, property, None));
    }

    fn set_value(&self, node: &NodeRef, value: &str) {
        dom_tree::set_text_content(node, value);
    }

    fn append_child(&self, parent: &NodeRef, child: &NodeRef) {
        dom_tree::append_child(parent, child);
    }

    fn remove_child(&self, parent: &NodeRef, child: &NodeRef) {
        dom_tree::remove_child(parent, child);
    }
}
