//! `fx-style` markup: declarations applied on every render, plus
//! `fx-style.<alias>` declarations applied while breakpoint `<alias>` is active.

use flexsheet_lib::dom::dom_tree::{Document, NodeRef};
use flexsheet_lib::media::BreakpointSignal;
use flexsheet_lib::style::inline::parse_style_attribute;
use flexsheet_lib::style::styler::StyleService;
use flexsheet_lib::style::value::StyleMap;
use log::debug;
use std::rc::Rc;

const FX_STYLE: &str = "fx-style";

struct FxStyleBinding {
    element: NodeRef,
    base: Option<StyleMap>,
    responsive: Vec<(String, StyleMap)>,
}

/// Applies base styles now and re-applies responsive ones on activation.
///
/// Returns the number of bound elements.
pub fn bind(document: &Document, styler: Rc<StyleService>, signal: &BreakpointSignal) -> usize {
    let bindings = collect_bindings(document);
    for binding in &bindings {
        if let Some(base) = &binding.base {
            styler.apply_styles_to_element(&binding.element, base);
        }
    }

    let count = bindings.len();
    debug!("bound {} fx-style element(s)", count);
    signal.subscribe(move |breakpoint, matches| {
        if !matches {
            return;
        }
        for binding in &bindings {
            for (alias, styles) in &binding.responsive {
                if *alias == breakpoint.alias {
                    styler.apply_styles_to_element(&binding.element, styles);
                }
            }
        }
    });
    count
}

fn collect_bindings(document: &Document) -> Vec<FxStyleBinding> {
    document
        .elements()
        .into_iter()
        .filter_map(|element| {
            let (base, responsive) = {
                let node = element.borrow();
                let elem = node.as_element()?;
                let mut base = None;
                let mut responsive = Vec::new();
                for (name, value) in &elem.attributes {
                    if name == FX_STYLE {
                        base = Some(to_style_map(value));
                    } else if let Some(alias) = name
                        .strip_prefix(FX_STYLE)
                        .and_then(|rest| rest.strip_prefix('.'))
                    {
                        responsive.push((alias.to_string(), to_style_map(value)));
                    }
                }
                (base, responsive)
            };
            if base.is_none() && responsive.is_empty() {
                return None;
            }
            Some(FxStyleBinding {
                element,
                base,
                responsive,
            })
        })
        .collect()
}

fn to_style_map(text: &str) -> StyleMap {
    parse_style_attribute(text)
        .into_iter()
        .map(|decl| (decl.property, decl.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexsheet_lib::media::{BreakPoint, MatchMedia};
    use flexsheet_lib::parser::html::create_dom_tree;
    use flexsheet_lib::style::virtual_sheet::VirtualStylesheet;

    #[test]
    fn responsive_styles_follow_the_signal() {
        let document = create_dom_tree(
            r#"<div id="a" fx-style="display: flex" fx-style.md="flex-direction: column"></div>
               <p id="b"></p>"#,
        );
        let sheet = Rc::new(VirtualStylesheet::new());
        let styler = Rc::new(StyleService::server(Rc::clone(&sheet)));
        let signal = BreakpointSignal::new();

        assert_eq!(bind(&document, styler, &signal), 1);
        let div = document.element_by_id("a").unwrap();
        assert_eq!(sheet.get_style_for_element(&div, "display"), "flex");

        sheet.clear_styles();
        signal.activate_breakpoint(&BreakPoint::new("sm", "screen", 900));
        assert!(sheet.is_empty());
        signal.activate_breakpoint(&BreakPoint::new("md", "screen", 800));
        assert_eq!(sheet.get_style_for_element(&div, "flex-direction"), "column");
    }
}
