use crate::dom::dom_tree::{NodeKey, NodeRef};
use crate::style::value::StyleValue;
use indexmap::IndexMap;
use log::trace;
use std::cell::RefCell;
use std::rc::Rc;

/// Property name to value for one element, in first-write order.
pub type ElementStyles = IndexMap<String, StyleValue>;

/// Element to styles, in first-write order.
pub type StyleSnapshot = IndexMap<NodeKey, ElementStyles>;

/// Per-element style accumulator used while rendering on the server.
///
/// One sheet belongs to one render. It is `!Send` and is meant to be created
/// per request and dropped with it, never kept as a process-wide singleton.
#[derive(Debug, Default)]
pub struct VirtualStylesheet {
    stylesheet: RefCell<StyleSnapshot>,
}

impl VirtualStylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `style` for `element`.
    pub fn add_style_to_element(&self, element: &NodeRef, style: &str, value: StyleValue) {
        trace!("virtual sheet: {} = {}", style, value);
        self.stylesheet
            .borrow_mut()
            .entry(NodeKey(Rc::clone(element)))
            .or_default()
            .insert(style.to_string(), value);
    }

    pub fn clear_styles(&self) {
        self.stylesheet.borrow_mut().clear();
    }

    /// The stored value as CSS text, or the empty string when missing or unset.
    pub fn get_style_for_element(&self, element: &NodeRef, style: &str) -> String {
        self.stylesheet
            .borrow()
            .get(&NodeKey(Rc::clone(element)))
            .and_then(|styles| styles.get(style))
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> StyleSnapshot {
        self.stylesheet.borrow().clone()
    }

    /// Number of elements with at least one entry.
    pub fn len(&self) -> usize {
        self.stylesheet.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stylesheet.borrow().is_empty()
    }
}
