//! Link descriptors and the link dialog's state.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A hyperlink being composed or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    pub text: String,
    pub link: String,
    /// Text is fixed because the link wraps existing content
    pub disabled: bool,
}

impl LinkDescriptor {
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
            disabled: false,
        }
    }
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // scheme:// URLs, mailto:, or site-relative paths and fragments
        Regex::new(r"^([a-zA-Z][a-zA-Z0-9+.-]*://\S+|mailto:\S+@\S+|/\S*|#\S*)$")
            .expect("URL pattern is valid")
    })
}

/// Check that `url` looks like something a link can point at.
pub fn validate_link_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::InvalidLink("URL is empty".to_string()));
    }
    if !url_pattern().is_match(url) {
        return Err(Error::InvalidLink(format!("'{}' is not a URL", url)));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Link Dialog State
// ─────────────────────────────────────────────────────────────────────────────

/// Form state of the link dialog.
///
/// The dialog is seeded with `open`, edited through `form_mut`, and hands
/// its descriptor back from `confirm`.
#[derive(Debug, Clone, Default)]
pub struct LinkDialog {
    visible: bool,
    form: LinkDescriptor,
    error: Option<String>,
}

impl LinkDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the form and show the dialog.
    pub fn open(&mut self, link: LinkDescriptor) {
        self.form = link;
        self.error = None;
        self.visible = true;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if !self.visible {
            self.error = None;
        }
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn form(&self) -> &LinkDescriptor {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LinkDescriptor {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Keep the dialog open and show why the link was rejected.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.visible = true;
    }

    /// Close the dialog and return the composed descriptor.
    pub fn confirm(&mut self) -> Option<LinkDescriptor> {
        if !self.visible {
            return None;
        }
        self.visible = false;
        self.error = None;
        Some(std::mem::take(&mut self.form))
    }

    pub fn cancel(&mut self) {
        self.visible = false;
        self.error = None;
    }
}
