//! Turns the styles collected during a server render into static CSS.
//!
//! Every element styled by a directive gets a generated class, and each
//! breakpoint's styles become rules for those classes inside an `@media`
//! block. The result is one `<style>` element appended to the document head,
//! so the served page looks right before any script runs.

use crate::dom::dom_tree::{Document, NodeKey, NodeRef};
use crate::media::{BreakPoint, MatchMedia};
use crate::renderer::Renderer;
use crate::style::virtual_sheet::{StyleSnapshot, VirtualStylesheet};
use log::debug;
use std::collections::HashMap;
use std::fmt::Write;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Prefix of every generated class.
pub const CLASS_NAME: &str = "flex-layout-";

/// Class marking the injected `<style>` element.
pub const SERVER_STYLE_CLASS: &str = "flex-layout-ssr";

/// Hands out `flex-layout-<N>` class names.
///
/// The counter only moves forward. [`UNIQUE_CLASS`] is the process-wide
/// instance; a separate generator is only for isolated callers such as tests.
#[derive(Debug, Default)]
pub struct ClassNameGenerator {
    next: AtomicUsize,
}

impl ClassNameGenerator {
    pub const fn new() -> Self {
        Self {
            next: AtomicUsize::new(0),
        }
    }

    pub fn next_class_name(&self) -> String {
        format!("{}{}", CLASS_NAME, self.next.fetch_add(1, Ordering::Relaxed))
    }
}

pub static UNIQUE_CLASS: ClassNameGenerator = ClassNameGenerator::new();

/// Styles captured while one media condition was in force.
#[derive(Debug, Clone)]
pub struct BreakpointSnapshot {
    pub media_query: String,
    pub styles: StyleSnapshot,
}

/// Element to class name, shared by all blocks of one pass.
type ClassMap = HashMap<NodeKey, String>;

/// Formats one `@media` block, tagging each element with its class.
fn format_style(
    snapshot: &BreakpointSnapshot,
    renderer: &dyn Renderer,
    class_map: &mut ClassMap,
    classes: &ClassNameGenerator,
) -> String {
    let mut style_text = format!("@media {} {{\n", snapshot.media_query);
    for (key, styles) in &snapshot.styles {
        let declarations: Vec<String> = styles
            .iter()
            .filter(|(_, value)| value.is_set())
            .map(|(property, value)| format!("    {}: {};\n", property, value))
            .collect();
        if declarations.is_empty() {
            continue;
        }

        let class_name = class_map
            .entry(key.clone())
            .or_insert_with(|| classes.next_class_name());
        renderer.add_class(&key.0, class_name);

        let _ = writeln!(style_text, "  .{} {{", class_name);
        style_text.push_str(&declarations.concat());
        style_text.push_str("  }\n");
    }
    style_text.push_str("}\n");
    style_text
}

/// Collects the default styles and each breakpoint's styles into CSS text.
///
/// Breakpoints are walked in reverse registration order. For each one the
/// sheet is cleared, the breakpoint activated so directives write into the
/// sheet, the result captured, and the breakpoint deactivated again.
pub fn collect_server_css(
    renderer: &dyn Renderer,
    sheet: &VirtualStylesheet,
    breakpoints: &[BreakPoint],
    match_media: &dyn MatchMedia,
    classes: &ClassNameGenerator,
) -> String {
    let mut class_map = ClassMap::new();
    let defaults = BreakpointSnapshot {
        media_query: "all".to_string(),
        styles: sheet.snapshot(),
    };
    let mut style_text = format_style(&defaults, renderer, &mut class_map, classes);

    for breakpoint in breakpoints.iter().rev() {
        sheet.clear_styles();
        match_media.activate_breakpoint(breakpoint);
        let snapshot = BreakpointSnapshot {
            media_query: breakpoint.media_query.clone(),
            styles: sheet.snapshot(),
        };
        if !snapshot.styles.is_empty() {
            debug!(
                "breakpoint {} styled {} element(s)",
                breakpoint.alias,
                snapshot.styles.len()
            );
            style_text.push_str(&format_style(&snapshot, renderer, &mut class_map, classes));
        }
        match_media.deactivate_breakpoint(breakpoint);
    }
    style_text
}

/// Materializes the server styles into a `<style>` element in the head.
///
/// Returns the injected element, or `None` when the document has no head.
pub fn server_styles(
    renderer: &dyn Renderer,
    sheet: &VirtualStylesheet,
    breakpoints: &[BreakPoint],
    match_media: &dyn MatchMedia,
    document: &Document,
    classes: &ClassNameGenerator,
) -> Option<NodeRef> {
    let Some(head) = document.head() else {
        debug!("document has no <head>, skipping server styles");
        return None;
    };
    let style_text = collect_server_css(renderer, sheet, breakpoints, match_media, classes);

    let style_tag = renderer.create_element("style");
    renderer.add_class(&style_tag, SERVER_STYLE_CLASS);
    renderer.set_value(&style_tag, &style_text);
    renderer.append_child(&head, &style_tag);
    Some(style_tag)
}

/// Builds the "before serialization" callback of a server render.
///
/// The callback is a no-op without a document.
pub fn add_styles<'a>(
    sheet: Rc<VirtualStylesheet>,
    match_media: Rc<dyn MatchMedia>,
    document: Option<&'a Document>,
    renderer: Rc<dyn Renderer>,
    breakpoints: Vec<BreakPoint>,
) -> impl FnOnce() + 'a {
    move || {
        let Some(document) = document else {
            return;
        };
        server_styles(
            renderer.as_ref(),
            &sheet,
            &breakpoints,
            match_media.as_ref(),
            document,
            &UNIQUE_CLASS,
        );
    }
}
