//! Removes server-rendered styles once the client has booted.

use crate::dom::dom_tree::{self, Document};
use crate::renderer::Renderer;
use crate::server::{CLASS_NAME, SERVER_STYLE_CLASS};
use crate::style::styler::RenderMode;
use log::debug;
use std::rc::Rc;

/// Drops the injected `<style>` element and strips generated classes.
///
/// Only acts in browser mode. Classes not starting with the generated prefix
/// are kept. Returns the number of elements touched.
pub fn remove_styles(document: &Document, renderer: &dyn Renderer, mode: RenderMode) -> usize {
    if mode != RenderMode::Browser {
        return 0;
    }
    let elements = document.elements_with_class_containing(CLASS_NAME);
    for element in &elements {
        let (is_server_sheet, generated) = match element.borrow().as_element() {
            Some(elem) => (
                elem.has_class(SERVER_STYLE_CLASS),
                elem.classes()
                    .filter(|c| c.starts_with(CLASS_NAME))
                    .map(str::to_string)
                    .collect::<Vec<_>>(),
            ),
            None => continue,
        };

        if is_server_sheet {
            if let Some(parent) = dom_tree::parent_of(element) {
                renderer.remove_child(&parent, element);
            }
        } else {
            for class_name in &generated {
                renderer.remove_class(element, class_name);
            }
        }
    }
    debug!("removed server styles from {} element(s)", elements.len());
    elements.len()
}

/// Builds the bootstrap listener running [`remove_styles`] once.
pub fn bootstrap_listener<'a>(
    document: &'a Document,
    renderer: Rc<dyn Renderer>,
    mode: RenderMode,
) -> impl FnOnce() + 'a {
    move || {
        remove_styles(document, renderer.as_ref(), mode);
    }
}
