//! Where style writes land and where non-inline reads come from, one
//! implementation per render mode.

use crate::dom::dom_tree::NodeRef;
use crate::renderer::Renderer;
use crate::style::computed::ComputedStyleSource;
use crate::style::value::StyleValue;
use crate::style::virtual_sheet::VirtualStylesheet;
use log::trace;
use std::rc::Rc;

pub trait StyleSink {
    fn apply_one(&self, element: &NodeRef, property: &str, value: &StyleValue);

    /// Fallback value once the inline style came up empty.
    fn current_value(&self, element: &NodeRef, property: &str, inline_only: bool) -> String;
}

/// Interactive mode: inline styles through the renderer, computed styles for reads.
pub struct BrowserSink {
    renderer: Rc<dyn Renderer>,
    computed: Box<dyn ComputedStyleSource>,
}

impl BrowserSink {
    pub fn new(renderer: Rc<dyn Renderer>, computed: Box<dyn ComputedStyleSource>) -> Self {
        Self { renderer, computed }
    }
}

impl StyleSink for BrowserSink {
    fn apply_one(&self, element: &NodeRef, property: &str, value: &StyleValue) {
        trace!("inline style: {} = {}", property, value);
        if value.is_set() {
            self.renderer
                .set_style(element, property, &value.to_string());
        } else {
            self.renderer.remove_style(element, property);
        }
    }

    fn current_value(&self, element: &NodeRef, property: &str, inline_only: bool) -> String {
        if inline_only {
            return String::new();
        }
        self.computed.computed_value(element, property)
    }
}

/// Server mode: writes and reads go to the request's virtual stylesheet.
pub struct ServerSink {
    sheet: Rc<VirtualStylesheet>,
}

impl ServerSink {
    pub fn new(sheet: Rc<VirtualStylesheet>) -> Self {
        Self { sheet }
    }
}

impl StyleSink for ServerSink {
    fn apply_one(&self, element: &NodeRef, property: &str, value: &StyleValue) {
        self.sheet
            .add_style_to_element(element, property, value.clone());
    }

    fn current_value(&self, element: &NodeRef, property: &str, _inline_only: bool) -> String {
        self.sheet.get_style_for_element(element, property)
    }
}
