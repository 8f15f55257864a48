extern crate criterion;

use criterion::{criterion_group, criterion_main, Criterion};

use flexsheet_lib::media::{default_breakpoints, BreakpointSignal};
use flexsheet_lib::parser::html::{create_dom_tree, serialize_document};
use flexsheet_lib::renderer::DomRenderer;
use flexsheet_lib::server::{server_styles, ClassNameGenerator};
use flexsheet_lib::style::styler::StyleService;
use flexsheet_lib::style::value::StyleMap;
use flexsheet_lib::style::virtual_sheet::VirtualStylesheet;
use std::rc::Rc;

fn bench_server_styles(c: &mut Criterion) {
    let mut big_html = String::with_capacity(1_000_000);
    big_html.push_str("<html><head></head><body>");
    for _ in 0..10_000 {
        big_html.push_str("<div><p>Test</p></div>");
    }
    big_html.push_str("</body></html>");

    let styles = StyleMap::new()
        .with("display", "flex")
        .with("flex-direction", "column")
        .with("order", 1);

    c.bench_function("server_styles", |b| {
        b.iter(|| {
            let document = create_dom_tree(&big_html);
            let sheet = Rc::new(VirtualStylesheet::new());
            let styler = StyleService::server(Rc::clone(&sheet));
            styler.apply_style_to_elements(&styles, &document.elements());
            server_styles(
                &DomRenderer,
                &sheet,
                &default_breakpoints(),
                &BreakpointSignal::new(),
                &document,
                &ClassNameGenerator::new(),
            );
            serialize_document(&document)
        })
    });
}

fn bench_apply_styles(c: &mut Criterion) {
    let document = create_dom_tree(&"<div></div>".repeat(1000));
    let elements = document.elements();
    let styles = StyleMap::new()
        .with("display", "inline-flex")
        .with("flex", "1 1 auto")
        .with("justify-content", "space-between");

    c.bench_function("apply_styles", |b| {
        b.iter(|| {
            let sheet = Rc::new(VirtualStylesheet::new());
            StyleService::server(Rc::clone(&sheet)).apply_style_to_elements(&styles, &elements);
            sheet.len()
        })
    });
}

criterion_group!(benches, bench_server_styles, bench_apply_styles);
criterion_main!(benches);
