mod directive;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flexsheet_lib::browser;
use flexsheet_lib::media::{default_breakpoints, BreakPoint, BreakpointSignal};
use flexsheet_lib::parser::html::{create_dom_tree, serialize_document};
use flexsheet_lib::renderer::{DomRenderer, Renderer};
use flexsheet_lib::server;
use flexsheet_lib::style::styler::{RenderMode, StyleService};
use flexsheet_lib::style::virtual_sheet::VirtualStylesheet;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "FlexSheet")]
#[command(about = "Pre-render responsive layout styles into static CSS")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render an HTML file on the server, extracting styles into a <style> block.
    Render {
        /// Input file name.
        input: PathBuf,

        /// Output file name. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Breakpoint as `alias=media query`, in registration order.
        /// Defaults to xs, sm, md, lg and xl.
        #[arg(short, long = "breakpoint", value_parser = parse_breakpoint)]
        breakpoints: Vec<BreakPoint>,
    },
    /// Strip server-rendered styles, as the client does once it boots.
    Hydrate {
        /// Input file name.
        input: PathBuf,

        /// Output file name. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_breakpoint(raw: &str) -> Result<BreakPoint, String> {
    let (alias, query) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected alias=query, got `{}`", raw))?;
    let (alias, query) = (alias.trim(), query.trim());
    if alias.is_empty() || query.is_empty() {
        return Err(format!("expected alias=query, got `{}`", raw));
    }
    Ok(BreakPoint::new(alias, query, 0))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Render {
            input,
            output,
            breakpoints,
        } => {
            let breakpoints = if breakpoints.is_empty() {
                default_breakpoints()
            } else {
                breakpoints
            };
            let html = read_input(&input)?;
            write_output(output.as_deref(), &render(&html, breakpoints))
        }
        Command::Hydrate { input, output } => {
            let html = read_input(&input)?;
            write_output(output.as_deref(), &hydrate(&html))
        }
    }
}

/// One server render: a fresh stylesheet, service and signal per document.
fn render(html: &str, breakpoints: Vec<BreakPoint>) -> String {
    let document = create_dom_tree(html);
    let sheet = Rc::new(VirtualStylesheet::new());
    let styler = Rc::new(StyleService::server(Rc::clone(&sheet)));
    let signal = Rc::new(BreakpointSignal::new());
    let bound = directive::bind(&document, styler, &signal);
    info!(
        "rendering {} styled element(s) across {} breakpoint(s)",
        bound,
        breakpoints.len()
    );

    let renderer: Rc<dyn Renderer> = Rc::new(DomRenderer);
    let before_serialize = server::add_styles(sheet, signal, Some(&document), renderer, breakpoints);
    before_serialize();
    serialize_document(&document)
}

fn hydrate(html: &str) -> String {
    let document = create_dom_tree(html);
    let removed = browser::remove_styles(&document, &DomRenderer, RenderMode::Browser);
    info!("cleaned {} element(s)", removed);
    serialize_document(&document)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_breakpoint_arguments() {
        let bp = parse_breakpoint("md = screen and (min-width: 960px)").unwrap();
        assert_eq!(bp.alias, "md");
        assert_eq!(bp.media_query, "screen and (min-width: 960px)");
        assert!(parse_breakpoint("md").is_err());
        assert!(parse_breakpoint("=screen").is_err());
    }

    #[test]
    fn render_then_hydrate_round_trip() {
        let page = r#"<html><head></head><body>
            <div id="a" class="card" fx-style="display: flex" fx-style.md="flex-direction: column"></div>
            </body></html>"#;
        let rendered = render(
            page,
            vec![BreakPoint::new("md", "screen and (min-width: 960px)", 800)],
        );
        assert!(rendered.contains("flex-layout-ssr"));
        assert!(rendered.contains("@media screen and (min-width: 960px) {"));

        let hydrated = hydrate(&rendered);
        assert!(!hydrated.contains("flex-layout-"));
        assert!(hydrated.contains(r#"class="card""#));
    }
}
