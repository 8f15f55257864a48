//! Computed styles for interactive rendering.
//!
//! Resolving what an element computes to belongs to the host platform. The
//! styler only sees it through [`ComputedStyleSource`].

use crate::dom::dom_tree::{NodeKey, NodeRef};
use indexmap::IndexMap;
use std::rc::Rc;

/// Source of "platform" computed values.
pub trait ComputedStyleSource {
    /// Computed value of `property` for `element`, or the empty string.
    fn computed_value(&self, element: &NodeRef, property: &str) -> String;
}

/// Computed values handed over by the host, keyed by element.
///
/// An empty instance stands in for a platform that resolves nothing.
#[derive(Debug, Default)]
pub struct ComputedStyles {
    values: IndexMap<NodeKey, IndexMap<String, String>>,
}

impl ComputedStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, element: &NodeRef, property: &str, value: &str) -> Self {
        self.set(element, property, value);
        self
    }

    /// Records the computed `value` of `property`. Property names are case-insensitive.
    pub fn set(&mut self, element: &NodeRef, property: &str, value: &str) {
        self.values
            .entry(NodeKey(Rc::clone(element)))
            .or_default()
            .insert(property.to_ascii_lowercase(), value.to_string());
    }
}

impl ComputedStyleSource for ComputedStyles {
    fn computed_value(&self, element: &NodeRef, property: &str) -> String {
        self.values
            .get(&NodeKey(Rc::clone(element)))
            .and_then(|styles| styles.get(&property.to_ascii_lowercase()))
            .cloned()
            .unwrap_or_default()
    }
}
