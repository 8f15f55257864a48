//! Responsive flex-layout styling with server-side style extraction.
//!
//! Directives call [`style::styler::StyleService`] to read and write element
//! styles. In the browser those writes become inline styles. On the server
//! they collect in a [`style::virtual_sheet::VirtualStylesheet`] which
//! [`server::add_styles`] turns into `@media`-scoped class rules just before
//! the page is serialized; [`browser::remove_styles`] takes them out again
//! once the client has booted.

pub mod browser;
pub mod dom;
pub mod media;
pub mod parser;
pub mod renderer;
pub mod server;
pub mod style;
