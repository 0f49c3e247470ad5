//! Document Export Module for Inkpanel
//!
//! Exports the edited document as a standalone themed HTML file or copies
//! it to the clipboard as HTML with a plain-text fallback.
//!
//! # Architecture
//!
//! - `html.rs` - HTML generation from block content, with theme CSS
//! - `clipboard.rs` - Platform clipboard operations

pub mod clipboard;
pub mod html;

pub use clipboard::copy_html_to_clipboard;
pub use html::{export_to_html_file, generate_html_document, generate_html_fragment};
