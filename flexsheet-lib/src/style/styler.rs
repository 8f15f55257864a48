use crate::dom::dom_tree::NodeRef;
use crate::renderer::Renderer;
use crate::style::computed::ComputedStyleSource;
use crate::style::inline;
use crate::style::prefixer::apply_css_prefixes;
use crate::style::sink::{BrowserSink, ServerSink, StyleSink};
use crate::style::value::{sorted_values, StyleMap, StyleValue};
use crate::style::virtual_sheet::VirtualStylesheet;
use std::rc::Rc;

/// Reported by [`StyleService::lookup_style`] when nothing is found.
///
/// This also reads as "the element is display: block", so callers that must
/// tell absence apart should use `inline_only` and check the inline value
/// themselves.
pub const DEFAULT_DISPLAY: &str = "block";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Live, mutable DOM.
    Browser,
    /// Non-interactive output; styles collect in a virtual stylesheet.
    Server,
}

/// Reads and writes element styles for layout directives.
pub struct StyleService {
    mode: RenderMode,
    sink: Box<dyn StyleSink>,
}

impl StyleService {
    pub fn browser(renderer: Rc<dyn Renderer>, computed: Box<dyn ComputedStyleSource>) -> Self {
        Self::with_sink(
            RenderMode::Browser,
            Box::new(BrowserSink::new(renderer, computed)),
        )
    }

    /// `sheet` must belong to the current render only.
    pub fn server(sheet: Rc<VirtualStylesheet>) -> Self {
        Self::with_sink(RenderMode::Server, Box::new(ServerSink::new(sheet)))
    }

    pub fn with_sink(mode: RenderMode, sink: Box<dyn StyleSink>) -> Self {
        Self { mode, sink }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Applies one property to the element.
    pub fn apply_style_to_element(
        &self,
        element: &NodeRef,
        property: &str,
        value: impl Into<StyleValue>,
    ) {
        let styles = StyleMap::new().with(property, value);
        self.apply_styles_to_element(element, &styles);
    }

    /// Applies a property map to the element.
    pub fn apply_styles_to_element(&self, element: &NodeRef, styles: &StyleMap) {
        let styles = apply_css_prefixes(styles);
        self.apply_multi_value_style_to_element(&styles, element);
    }

    /// Applies a property map to each of the elements.
    pub fn apply_style_to_elements(&self, styles: &StyleMap, elements: &[NodeRef]) {
        let styles = apply_css_prefixes(styles);
        for element in elements {
            self.apply_multi_value_style_to_element(&styles, element);
        }
    }

    /// The element's raw attribute value, or the empty string.
    pub fn lookup_attribute_value(&self, element: &NodeRef, attribute: &str) -> String {
        element
            .borrow()
            .as_element()
            .and_then(|elem| elem.get_attribute(attribute))
            .unwrap_or_default()
            .to_string()
    }

    /// The element's inline style value, or the empty string.
    pub fn lookup_inline_style(&self, element: &NodeRef, property: &str) -> String {
        element
            .borrow()
            .as_element()
            .map(|elem| inline::get_inline_style(elem, property))
            .unwrap_or_default()
    }

    /// The inline, computed or server-side value of `property`.
    ///
    /// Falls back to [`DEFAULT_DISPLAY`] for a missing element and for any
    /// property without a value.
    pub fn lookup_style(&self, element: Option<&NodeRef>, property: &str, inline_only: bool) -> String {
        let mut value = String::new();
        if let Some(element) = element {
            value = self.lookup_inline_style(element, property);
            if value.is_empty() {
                value = self.sink.current_value(element, property, inline_only);
            }
        }

        let value = value.trim();
        if value.is_empty() {
            DEFAULT_DISPLAY.to_string()
        } else {
            value.to_string()
        }
    }

    /// Properties in lexicographic order, each property's values in ascending order.
    fn apply_multi_value_style_to_element(&self, styles: &StyleMap, element: &NodeRef) {
        for (property, values) in styles.iter() {
            for value in sorted_values(values) {
                self.sink.apply_one(element, property, value);
            }
        }
    }
}
