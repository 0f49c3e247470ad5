//! Clipboard Operations
//!
//! Copies document content to the system clipboard using arboard. Rich
//! targets (mail clients, word processors) receive HTML; everything else
//! gets the plain-text fallback.

use super::html::generate_html_fragment;
use crate::document::ContentState;
use crate::error::Result;
use arboard::Clipboard;
use log::debug;

/// Copy the document as HTML, with its plain text as fallback.
pub fn copy_html_to_clipboard(content: &ContentState) -> Result<()> {
    let (html, plain) = clipboard_payload(content)?;
    copy_html_with_fallback(&html, &plain)
}

/// HTML and plain-text forms of `content`.
pub fn clipboard_payload(content: &ContentState) -> Result<(String, String)> {
    Ok((generate_html_fragment(content)?, content.plain_text()))
}

/// Copy plain text to the clipboard.
pub fn copy_text_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    debug!("Copied {} chars of text to clipboard", text.chars().count());
    Ok(())
}

/// Copy HTML with a plain-text fallback.
pub fn copy_html_with_fallback(html: &str, plain_text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_html(html, Some(plain_text))?;
    debug!("Copied {} bytes of HTML to clipboard", html.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_payload_has_both_forms() {
        let content = ContentState::from_text("one\ntwo");
        let (html, plain) = clipboard_payload(&content).unwrap();
        assert!(html.contains("<p class=\"ink-unstyle\">one</p>"));
        assert_eq!(plain, "one\ntwo");
    }

    #[test]
    fn test_clipboard_error_kind() {
        let err = Error::Clipboard("unavailable".to_string());
        assert_eq!(err.kind(), "clipboard");
        assert!(err.to_string().contains("unavailable"));
    }
}
